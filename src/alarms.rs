//! Alarm and snooze records.
//!
//! Record layout (one per slot):
//! ```text
//! HH
//! MM
//! SS
//! ```
//! Alarms live in `alarm_<id>.txt`, the pending snooze in `snooze_<id>.txt`.
//! At most one snooze record may exist; finding two is unrecoverable.

use core::fmt::Write as _;

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use heapless::{String, Vec};

use crate::clock::DateTimeField;
use crate::config::MAX_ALARMS;
use crate::context::Text;
use crate::error::Error;
use crate::store::{read_text, RecordKey, RecordStore, RECORD_CAPACITY};

/// Time of day an alarm rings (local time).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl AlarmTime {
    pub fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self {
            hour,
            minute,
            second,
        })
    }

    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        Self {
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            second: dt.second() as u8,
        }
    }

    pub fn matches(&self, dt: &NaiveDateTime) -> bool {
        *self == Self::from_datetime(dt)
    }

    /// Set the hour, minute or second. Other fields and out-of-range
    /// values are rejected.
    pub fn set(&mut self, field: DateTimeField, value: i32) -> bool {
        let Ok(v) = u8::try_from(value) else {
            return false;
        };
        match field {
            DateTimeField::Hour if v < 24 => self.hour = v,
            DateTimeField::Minute if v < 60 => self.minute = v,
            DateTimeField::Second if v < 60 => self.second = v,
            _ => return false,
        }
        true
    }

    pub fn encode(&self) -> String<RECORD_CAPACITY> {
        let mut out = String::new();
        let _ = write!(out, "{:02}\n{:02}\n{:02}", self.hour, self.minute, self.second);
        out
    }

    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut fields = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let mut next = || -> Result<u8, Error> {
            fields
                .next()
                .and_then(|f| f.parse::<u8>().ok())
                .ok_or(Error::CorruptRecord)
        };
        let (hour, minute, second) = (next()?, next()?, next()?);
        Self::new(hour, minute, second).ok_or(Error::CorruptRecord)
    }

    /// `HH:MM:SS`
    pub fn label(&self) -> Text {
        let mut out = Text::new();
        let _ = write!(out, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
        out
    }
}

fn load(store: &mut dyn RecordStore, key: RecordKey) -> Result<Option<AlarmTime>, Error> {
    let mut buf = [0u8; RECORD_CAPACITY];
    match read_text(store, key, &mut buf)? {
        Some(text) => AlarmTime::parse(text).map(Some),
        None => Ok(None),
    }
}

pub fn load_alarm(store: &mut dyn RecordStore, id: u8) -> Result<Option<AlarmTime>, Error> {
    load(store, RecordKey::Alarm(id))
}

pub fn save_alarm(store: &mut dyn RecordStore, id: u8, time: AlarmTime) -> Result<(), Error> {
    store.write(RecordKey::Alarm(id), time.encode().as_bytes())
}

/// Store `time` in the lowest free slot and return its id.
pub fn new_alarm(store: &mut dyn RecordStore, time: AlarmTime) -> Result<u8, Error> {
    let mut buf = [0u8; RECORD_CAPACITY];
    for id in 0..MAX_ALARMS as u8 {
        if store.read(RecordKey::Alarm(id), &mut buf)?.is_none() {
            save_alarm(store, id, time)?;
            info!("alarm {} created", id);
            return Ok(id);
        }
    }
    Err(Error::AlarmSlotsFull)
}

pub fn delete_alarm(store: &mut dyn RecordStore, id: u8) -> Result<(), Error> {
    store.remove(RecordKey::Alarm(id))
}

/// Stored alarms in ascending id order. Corrupt records are skipped.
pub fn list_alarms(store: &mut dyn RecordStore) -> Result<Vec<(u8, AlarmTime), MAX_ALARMS>, Error> {
    let mut out = Vec::new();
    for id in 0..MAX_ALARMS as u8 {
        match load_alarm(store, id) {
            Ok(Some(time)) => {
                let _ = out.push((id, time));
            }
            Ok(None) => {}
            Err(Error::CorruptRecord) => warn!("alarm {} record corrupt, skipped", id),
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}

/// The pending snooze, if any.
pub fn snooze(store: &mut dyn RecordStore) -> Result<Option<(u8, AlarmTime)>, Error> {
    let mut found = None;
    for id in 0..MAX_ALARMS as u8 {
        if let Some(time) = load(store, RecordKey::Snooze(id))? {
            if found.is_some() {
                error!("more than one snooze record");
                return Err(Error::MultipleSnoozes);
            }
            found = Some((id, time));
        }
    }
    Ok(found)
}

/// Remove every snooze record, returning how many existed.
pub fn clear_snoozes(store: &mut dyn RecordStore) -> Result<usize, Error> {
    let mut buf = [0u8; RECORD_CAPACITY];
    let mut removed = 0;
    for id in 0..MAX_ALARMS as u8 {
        if store.read(RecordKey::Snooze(id), &mut buf)?.is_some() {
            store.remove(RecordKey::Snooze(id))?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Replace any pending snooze with one `minutes` after `now`.
pub fn new_snooze(
    store: &mut dyn RecordStore,
    now: &NaiveDateTime,
    minutes: i64,
) -> Result<(u8, AlarmTime), Error> {
    clear_snoozes(store)?;
    let at = now
        .checked_add_signed(TimeDelta::minutes(minutes))
        .unwrap_or(*now);
    let time = AlarmTime::from_datetime(&at);
    store.write(RecordKey::Snooze(0), time.encode().as_bytes())?;
    info!("snooze set for {}:{}:{}", time.hour, time.minute, time.second);
    Ok((0, time))
}
