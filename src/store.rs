//! Persistent records.
//!
//! Every persisted item is a small text record addressed by a
//! [`RecordKey`]. Each key has a stable file-style name (`alarm_3.txt`)
//! and a numeric key for the flash map. Writes replace the whole record;
//! last write wins.

use core::fmt::Write as _;

use heapless::{LinearMap, String, Vec};

use crate::error::Error;

/// Largest record body in bytes.
pub const RECORD_CAPACITY: usize = 16;

/// Records the in-memory store can hold.
pub const MEMORY_STORE_SLOTS: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordKey {
    /// `time_mode_config.txt`
    TimeMode,
    /// `timezone_config.txt`
    Timezone,
    /// `alarm_<id>.txt`
    Alarm(u8),
    /// `snooze_<id>.txt`
    Snooze(u8),
}

impl RecordKey {
    pub fn file_name(&self) -> String<24> {
        let mut name = String::new();
        // 24 bytes hold the longest name with a three-digit id.
        let _ = match self {
            RecordKey::TimeMode => name.push_str("time_mode_config.txt").map_err(|_| core::fmt::Error),
            RecordKey::Timezone => name.push_str("timezone_config.txt").map_err(|_| core::fmt::Error),
            RecordKey::Alarm(id) => write!(name, "alarm_{}.txt", id),
            RecordKey::Snooze(id) => write!(name, "snooze_{}.txt", id),
        };
        name
    }

    /// Key used in the flash map.
    pub fn flash_key(&self) -> u16 {
        match self {
            RecordKey::TimeMode => 0x0001,
            RecordKey::Timezone => 0x0002,
            RecordKey::Alarm(id) => 0x0100 | *id as u16,
            RecordKey::Snooze(id) => 0x0200 | *id as u16,
        }
    }
}

/// Key/value record persistence.
pub trait RecordStore {
    /// Copy the record into `buf`; `Ok(None)` when it does not exist.
    fn read(&mut self, key: RecordKey, buf: &mut [u8]) -> Result<Option<usize>, Error>;

    fn write(&mut self, key: RecordKey, data: &[u8]) -> Result<(), Error>;

    /// Removing a missing record is not an error.
    fn remove(&mut self, key: RecordKey) -> Result<(), Error>;
}

/// Read a record as UTF-8 text into `buf`.
pub fn read_text<'b>(
    store: &mut dyn RecordStore,
    key: RecordKey,
    buf: &'b mut [u8],
) -> Result<Option<&'b str>, Error> {
    match store.read(key, buf)? {
        Some(len) => core::str::from_utf8(&buf[..len])
            .map(Some)
            .map_err(|_| Error::CorruptRecord),
        None => Ok(None),
    }
}

/// RAM-backed store. Used by the host tests and as a stand-in when flash
/// is unavailable.
#[derive(Default)]
pub struct MemoryStore {
    records: LinearMap<RecordKey, Vec<u8, RECORD_CAPACITY>, MEMORY_STORE_SLOTS>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write/remove fail with [`Error::Storage`].
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn contains(&self, key: RecordKey) -> bool {
        self.records.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn read(&mut self, key: RecordKey, buf: &mut [u8]) -> Result<Option<usize>, Error> {
        match self.records.get(&key) {
            Some(data) => {
                let out = buf.get_mut(..data.len()).ok_or(Error::BufferOverflow)?;
                out.copy_from_slice(data);
                Ok(Some(data.len()))
            }
            None => Ok(None),
        }
    }

    fn write(&mut self, key: RecordKey, data: &[u8]) -> Result<(), Error> {
        if self.fail_writes {
            return Err(Error::Storage);
        }
        let body = Vec::from_slice(data).map_err(|_| Error::BufferOverflow)?;
        self.records
            .insert(key, body)
            .map(|_| ())
            .map_err(|_| Error::Storage)
    }

    fn remove(&mut self, key: RecordKey) -> Result<(), Error> {
        if self.fail_writes {
            return Err(Error::Storage);
        }
        self.records.remove(&key);
        Ok(())
    }
}
