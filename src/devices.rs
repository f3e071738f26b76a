//! Collaborator contracts.
//!
//! The core never talks to hardware directly. Displays, the RTC, the tuner,
//! the record store, the alarm sounder and the supply monitor are reached
//! through these traits; `main.rs` wires in the nRF52840 drivers and the
//! tests wire in fakes.

use chrono::NaiveDateTime;

use crate::config::{DISPLAY_COLS, DISPLAY_ROWS};
use crate::error::Error;
use crate::store::RecordStore;

/// Clamp a text position onto the display grid.
pub fn clamp_cell(col: u8, row: u8) -> (u8, u8) {
    (col.min(DISPLAY_COLS - 1), row.min(DISPLAY_ROWS - 1))
}

/// Character-grid text display.
///
/// `clear` and `update_text` only change the frame buffer; nothing reaches
/// the panel before `flush`. `update_text` blanks the target row before
/// drawing. Positions outside the grid are clamped; text past the right
/// edge is cut.
pub trait TextDisplay {
    fn clear(&mut self) -> Result<(), Error>;

    fn update_text(&mut self, text: &str, col: u8, row: u8) -> Result<(), Error>;

    /// Push the frame buffer to the panel.
    fn flush(&mut self) -> Result<(), Error>;

    fn clear_row(&mut self, row: u8) -> Result<(), Error> {
        self.update_text("", 0, row)
    }
}

/// Battery-backed real-time clock holding UTC.
pub trait Rtc {
    fn datetime(&mut self) -> Result<NaiveDateTime, Error>;

    /// The weekday is derived from the date.
    fn set_datetime(&mut self, dt: NaiveDateTime) -> Result<(), Error>;
}

/// FM tuner.
pub trait Radio {
    /// Tune to `tenths` of a MHz (1031 = 103.1 MHz).
    fn set_frequency(&mut self, tenths: u16) -> Result<(), Error>;

    /// Volume in `0..=15`.
    fn set_volume(&mut self, volume: u8) -> Result<(), Error>;

    fn toggle_mute(&mut self) -> Result<(), Error>;

    fn is_muted(&self) -> bool;

    fn frequency(&self) -> u16;

    fn volume(&self) -> u8;
}

/// Alarm buzzer / LED.
pub trait Sounder {
    fn set_active(&mut self, on: bool);

    fn is_active(&self) -> bool;
}

/// Supply voltage monitor.
pub trait Battery {
    fn millivolts(&mut self) -> Result<u16, Error>;
}

/// Everything a screen or the status monitor may touch.
pub struct Devices<'a> {
    /// Navigation panel, owned by the active screen.
    pub display: &'a mut dyn TextDisplay,
    /// Report panel, written only by the status monitor.
    pub report: &'a mut dyn TextDisplay,
    pub rtc: &'a mut dyn Rtc,
    pub radio: &'a mut dyn Radio,
    pub store: &'a mut dyn RecordStore,
    pub sounder: &'a mut dyn Sounder,
    pub battery: &'a mut dyn Battery,
}
