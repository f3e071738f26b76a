//! Record store on the nRF52840's internal flash.
//!
//! Uses the `sequential-storage` map: each [`RecordKey`] maps to a `u16`
//! flash key and the record body is stored as raw bytes. The flash pages
//! are managed by `sequential-storage`, which handles wear levelling and
//! garbage collection.
//!
//! The library's [`RecordStore`] is synchronous, so every map call is run to
//! completion with `block_on`. The NVMC itself is blocking and wrapped with
//! `BlockingAsync`.

use core::ops::Range;

use clock_radio::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use clock_radio::store::{RecordKey, RecordStore, RECORD_CAPACITY};
use clock_radio::Error;
use defmt::{debug, error};
use embassy_futures::block_on;
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Scratch for one map item: key, length header and body, word aligned.
const SCRATCH_SIZE: usize = 64;

pub struct FlashStore<F> {
    flash: F,
}

impl<F: NorFlash> FlashStore<F> {
    pub fn new(flash: F) -> Self {
        Self { flash }
    }

    fn range() -> Range<u32> {
        STORAGE_START..STORAGE_END
    }
}

impl<F: NorFlash> RecordStore for FlashStore<F> {
    fn read(&mut self, key: RecordKey, buf: &mut [u8]) -> Result<Option<usize>, Error> {
        let mut scratch = [0u8; SCRATCH_SIZE];
        let fetched = block_on(map::fetch_item::<u16, &[u8], _>(
            &mut self.flash,
            Self::range(),
            &mut NoCache::new(),
            &mut scratch,
            &key.flash_key(),
        ));
        match fetched {
            Ok(Some(data)) => {
                let out = buf.get_mut(..data.len()).ok_or(Error::BufferOverflow)?;
                out.copy_from_slice(data);
                Ok(Some(data.len()))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                error!("flash read {}: {:?}", key, defmt::Debug2Format(&e));
                Err(Error::Storage)
            }
        }
    }

    fn write(&mut self, key: RecordKey, data: &[u8]) -> Result<(), Error> {
        if data.len() > RECORD_CAPACITY {
            return Err(Error::BufferOverflow);
        }
        let mut scratch = [0u8; SCRATCH_SIZE];
        block_on(map::store_item::<u16, &[u8], _>(
            &mut self.flash,
            Self::range(),
            &mut NoCache::new(),
            &mut scratch,
            &key.flash_key(),
            &data,
        ))
        .map_err(|e| {
            error!("flash write {}: {:?}", key, defmt::Debug2Format(&e));
            Error::Storage
        })?;
        debug!("stored {} ({} bytes)", key, data.len());
        Ok(())
    }

    fn remove(&mut self, key: RecordKey) -> Result<(), Error> {
        let mut scratch = [0u8; SCRATCH_SIZE];
        block_on(map::remove_item::<u16, _>(
            &mut self.flash,
            Self::range(),
            &mut NoCache::new(),
            &mut scratch,
            &key.flash_key(),
        ))
        .map_err(|e| {
            error!("flash remove {}: {:?}", key, defmt::Debug2Format(&e));
            Error::Storage
        })
    }
}
