//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, limits, and wiring notes live here so they can be
//! tuned in one place.

// Input

/// Debounce window for the encoder A/B channels (ms).
///
/// Encoder contacts settle much faster than the push-button.
pub const ENCODER_DEBOUNCE_MS: u64 = 2;

/// Debounce window for push-buttons, including the encoder's own switch (ms).
pub const SWITCH_DEBOUNCE_MS: u64 = 10;

/// A full quadrature cycle must complete within this gap between two
/// consecutive transitions, otherwise the partial cycle is discarded (ms).
pub const QUADRATURE_TIMEOUT_MS: u64 = 150;

// Scheduling

/// Navigation polling period (ms).
pub const POLL_PERIOD_MS: u64 = 100;

/// Status refresh period for the report display (ms).
pub const STATUS_PERIOD_MS: u64 = 1000;

/// How long the battery banner stays on the report display after boot (s).
pub const BOOT_BANNER_SECS: u64 = 5;

// Mailbox capacities

/// Pending screen-to-screen contexts. Normal operation holds at most one.
pub const NAVIGATION_QUEUE_DEPTH: usize = 2;

/// Pending auxiliary events (alarm fired, radio power, ...).
pub const AUXILIARY_QUEUE_DEPTH: usize = 8;

/// Pending status messages for the report display.
pub const REPORTING_QUEUE_DEPTH: usize = 8;

// Alarms

/// Number of alarm slots (`alarm_0.txt` .. `alarm_7.txt`).
pub const MAX_ALARMS: usize = 8;

/// Snooze length (minutes).
pub const SNOOZE_MINUTES: i64 = 1;

// Display grid
//
// 128x64 px panels addressed as a text grid of 8x8 px cells.

/// Panel width in pixels.
pub const DISPLAY_WIDTH_PX: u32 = 128;

/// Panel height in pixels.
pub const DISPLAY_HEIGHT_PX: u32 = 64;

/// Character cell edge (px).
pub const CELL_PX: u32 = 8;

/// Text columns.
pub const DISPLAY_COLS: u8 = (DISPLAY_WIDTH_PX / CELL_PX) as u8;

/// Text rows.
pub const DISPLAY_ROWS: u8 = (DISPLAY_HEIGHT_PX / CELL_PX) as u8;

/// Longest text a single row can hold.
pub const LINE_CAPACITY: usize = 16;

// Radio

/// Lowest tunable frequency, whole MHz.
pub const RADIO_MHZ_MIN: i32 = 88;

/// Highest tunable frequency, whole MHz.
pub const RADIO_MHZ_MAX: i32 = 108;

/// Volume range accepted by the tuner.
pub const RADIO_VOLUME_MAX: u8 = 15;

/// Station tuned at power-up, tenths of MHz.
pub const RADIO_DEFAULT_FREQ: u16 = 1031;

/// Volume at power-up.
pub const RADIO_DEFAULT_VOLUME: u8 = 2;

// Date editor

/// Earliest year offered by the date editor.
pub const YEAR_MIN: i32 = 2020;

/// Latest year offered by the date editor.
pub const YEAR_MAX: i32 = 2030;

// Battery thresholds (mV)

/// At or above this the supply is reported as "Good".
pub const BATTERY_GOOD_MV: u16 = 3300;

/// Below this the supply is reported as "Critical".
pub const BATTERY_CRITICAL_MV: u16 = 3000;

// Wiring (nRF52840-DK defaults)
//
// Logical names only; the concrete `embassy_nrf::peripherals::*` pins are
// picked in `main.rs`.
//
//   Encoder A        → P0.11
//   Encoder B        → P0.12
//   Encoder switch   → P0.24
//   Radio power key  → P0.25
//   Buzzer / LED     → P0.13
//   I²C SDA          → P0.26
//   I²C SCL          → P0.27
//
// Shared I²C bus: navigation OLED 0x3C, report OLED 0x3D,
// DS1307 RTC 0x68, RDA5807M tuner 0x11.

/// Pin number of the encoder switch, used to tag log lines.
pub const ENCODER_SWITCH_PIN: u8 = 24;

/// Pin number of the radio power key, used to tag log lines.
pub const RADIO_POWER_PIN: u8 = 25;

/// I²C address of the navigation OLED.
pub const NAV_DISPLAY_ADDR: u8 = 0x3C;

/// I²C address of the report OLED.
pub const REPORT_DISPLAY_ADDR: u8 = 0x3D;

// Flash storage

/// Flash page index where the record store starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 248;

/// Number of flash pages reserved for the record store.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
