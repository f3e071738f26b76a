//! Unified error type for the clock-radio firmware.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Collaborators
    /// Text display rejected a write or a clear.
    Display,

    /// RTC bus transaction failed or timed out.
    Rtc,

    /// FM tuner bus transaction failed.
    Radio,

    /// Record store read/write/erase failed.
    Storage,

    /// Record contents could not be parsed.
    CorruptRecord,

    // Alarms
    /// Every alarm slot is taken.
    AlarmSlotsFull,

    /// More than one snooze record exists. Never recoverable.
    MultipleSnoozes,

    // Navigation
    /// A bounded queue rejected an item.
    QueueFull,

    /// A screen needed a context field that was not supplied.
    MissingContext,

    /// The requested screen id is not in the screen table.
    UnknownScreen,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

impl Error {
    /// Whether the firmware must stop instead of falling back to `main_menu`.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::MultipleSnoozes)
    }
}
