//! nRF52840 drivers behind the library's collaborator traits.
//!
//! Four I²C devices share TWISPI0 (two OLEDs, the RTC and the tuner); the
//! record store sits on the NVMC and the supply is measured with SAADC.

pub mod display;
pub mod flash;
pub mod inputs;
pub mod power;
pub mod radio;
pub mod rtc;

use core::cell::RefCell;

use embassy_embedded_hal::shared_bus::blocking::i2c::I2cDevice;
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::Twim;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// The TWIM peripheral behind the shared bus.
pub type I2cBus = Mutex<NoopRawMutex, RefCell<Twim<'static, TWISPI0>>>;

/// One device's handle on the shared bus. Only the control task touches
/// I²C, so a no-op mutex is enough.
pub type SharedI2c = I2cDevice<'static, NoopRawMutex, Twim<'static, TWISPI0>>;
