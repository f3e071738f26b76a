//! Alarm buzzer and supply voltage measurement.

use clock_radio::devices::{Battery, Sounder};
use clock_radio::Error;
use defmt::{debug, warn};
use embassy_futures::block_on;
use embassy_nrf::gpio::Output;
use embassy_nrf::saadc::Saadc;

/// SAADC full scale with gain 1/6 and the 0.6 V internal reference (mV).
const FULL_SCALE_MV: u32 = 3600;

/// Default SAADC resolution is 12 bits.
const FULL_SCALE_COUNTS: u32 = 4096;

/// Buzzer (or LED) on a push-pull output, active-high.
pub struct Buzzer {
    pin: Output<'static>,
    active: bool,
}

impl Buzzer {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin, active: false }
    }
}

impl Sounder for Buzzer {
    fn set_active(&mut self, on: bool) {
        if on == self.active {
            return;
        }
        if on {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
        self.active = on;
        debug!("buzzer {}", on);
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// VDD measured on one SAADC channel.
pub struct SupplyMonitor {
    adc: Saadc<'static, 1>,
}

impl SupplyMonitor {
    pub fn new(adc: Saadc<'static, 1>) -> Self {
        Self { adc }
    }
}

impl Battery for SupplyMonitor {
    fn millivolts(&mut self) -> Result<u16, Error> {
        let mut sample = [0i16; 1];
        block_on(self.adc.sample(&mut sample));
        if sample[0] < 0 {
            warn!("SAADC returned {}", sample[0]);
            return Ok(0);
        }
        let mv = sample[0] as u32 * FULL_SCALE_MV / FULL_SCALE_COUNTS;
        Ok(mv as u16)
    }
}
