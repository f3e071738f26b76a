//! Persisted user settings: 12h/24h mode and timezone.
//!
//! Both live in one-line records. A missing or unreadable record falls
//! back to the default (24h, UTC) so the clock always has something to
//! show.

use crate::error::Error;
use crate::store::{read_text, RecordKey, RecordStore, RECORD_CAPACITY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeMode {
    TwelveHour,
    #[default]
    TwentyFourHour,
}

impl TimeMode {
    /// Record digit: `0` = 12h, `1` = 24h.
    pub fn digit(self) -> u8 {
        match self {
            TimeMode::TwelveHour => 0,
            TimeMode::TwentyFourHour => 1,
        }
    }

    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(TimeMode::TwelveHour),
            1 => Some(TimeMode::TwentyFourHour),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeMode::TwelveHour => "12h",
            TimeMode::TwentyFourHour => "24h",
        }
    }
}

/// Fixed-offset timezone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timezone {
    pub code: &'static str,
    pub offset_hours: i8,
}

/// Supported zones, in editor order.
pub const TIMEZONES: [Timezone; 4] = [
    Timezone { code: "UTC", offset_hours: 0 },
    Timezone { code: "CST", offset_hours: -6 },
    Timezone { code: "CDT", offset_hours: -5 },
    Timezone { code: "PST", offset_hours: -8 },
];

pub const DEFAULT_TIMEZONE: Timezone = TIMEZONES[0];

/// Position of `code` in [`TIMEZONES`].
pub fn timezone_index(code: &str) -> Option<usize> {
    TIMEZONES.iter().position(|tz| tz.code == code)
}

pub fn timezone_by_code(code: &str) -> Option<Timezone> {
    timezone_index(code).map(|i| TIMEZONES[i])
}

pub fn load_time_mode(store: &mut dyn RecordStore) -> TimeMode {
    let mut buf = [0u8; RECORD_CAPACITY];
    match read_text(store, RecordKey::TimeMode, &mut buf) {
        Ok(Some(text)) => {
            let mode = text
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(TimeMode::from_digit);
            if mode.is_none() {
                warn!("time mode record unreadable, using 24h");
            }
            mode.unwrap_or_default()
        }
        Ok(None) => TimeMode::default(),
        Err(e) => {
            warn!("time mode read failed: {}", e);
            TimeMode::default()
        }
    }
}

pub fn save_time_mode(store: &mut dyn RecordStore, mode: TimeMode) -> Result<(), Error> {
    store.write(RecordKey::TimeMode, &[b'0' + mode.digit()])
}

pub fn load_timezone(store: &mut dyn RecordStore) -> Timezone {
    let mut buf = [0u8; RECORD_CAPACITY];
    match read_text(store, RecordKey::Timezone, &mut buf) {
        Ok(Some(text)) => timezone_by_code(text.trim()).unwrap_or_else(|| {
            warn!("unknown timezone record, using UTC");
            DEFAULT_TIMEZONE
        }),
        Ok(None) => DEFAULT_TIMEZONE,
        Err(e) => {
            warn!("timezone read failed: {}", e);
            DEFAULT_TIMEZONE
        }
    }
}

pub fn save_timezone(store: &mut dyn RecordStore, tz: Timezone) -> Result<(), Error> {
    store.write(RecordKey::Timezone, tz.code.as_bytes())
}
