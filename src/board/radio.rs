//! RDA5807M FM tuner, random-access register mode.
//!
//! Only registers 0x02 (control), 0x03 (channel) and 0x05 (volume) are
//! written. Tuned frequency, volume and mute state are mirrored in RAM and
//! only updated after the bus write succeeded.

use clock_radio::config::{RADIO_MHZ_MAX, RADIO_MHZ_MIN, RADIO_VOLUME_MAX};
use clock_radio::devices::Radio;
use clock_radio::Error;
use defmt::{debug, info};

/// Random-access I²C address.
pub const RDA5807M_ADDR: u8 = 0x11;

const REG_CTRL: u8 = 0x02;
const REG_CHAN: u8 = 0x03;
const REG_VOLUME: u8 = 0x05;

// REG_CTRL
const DHIZ: u16 = 1 << 15;
const DMUTE: u16 = 1 << 14;
const SOFT_RESET: u16 = 1 << 1;
const ENABLE: u16 = 1 << 0;

// REG_CHAN: band 87-108 MHz, 100 kHz spacing.
const TUNE: u16 = 1 << 4;
const BAND_BOTTOM_TENTHS: u16 = 870;

// REG_VOLUME: interrupt mode, seek threshold 8, LNA on LNAN.
const VOLUME_BASE: u16 = 0x8880;

pub struct Rda5807m<I2C> {
    i2c: I2C,
    frequency: u16,
    volume: u8,
    muted: bool,
}

impl<I2C> Rda5807m<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C, frequency: u16, volume: u8) -> Self {
        Self {
            i2c,
            frequency,
            volume,
            muted: false,
        }
    }

    /// Reset the chip and tune to the stored frequency and volume, unmuted.
    pub fn power_up(&mut self) -> Result<(), Error> {
        self.muted = false;
        self.write_reg(REG_CTRL, DHIZ | DMUTE | SOFT_RESET | ENABLE)?;
        self.write_reg(REG_CTRL, self.control())?;
        self.set_frequency(self.frequency)?;
        self.set_volume(self.volume)?;
        info!("tuner up, {} tenths of MHz", self.frequency);
        Ok(())
    }

    fn control(&self) -> u16 {
        if self.muted {
            DHIZ | ENABLE
        } else {
            DHIZ | DMUTE | ENABLE
        }
    }

    fn write_reg(&mut self, reg: u8, value: u16) -> Result<(), Error> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(RDA5807M_ADDR, &[reg, hi, lo])
            .map_err(|_| Error::Radio)
    }
}

impl<I2C> Radio for Rda5807m<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn set_frequency(&mut self, tenths: u16) -> Result<(), Error> {
        let lo = (RADIO_MHZ_MIN * 10) as u16;
        let hi = (RADIO_MHZ_MAX * 10 + 9) as u16;
        let tenths = tenths.clamp(lo, hi);
        let channel = tenths - BAND_BOTTOM_TENTHS;
        self.write_reg(REG_CHAN, (channel << 6) | TUNE)?;
        self.frequency = tenths;
        debug!("tuned to {}", tenths);
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), Error> {
        let volume = volume.min(RADIO_VOLUME_MAX);
        self.write_reg(REG_VOLUME, VOLUME_BASE | volume as u16)?;
        self.volume = volume;
        Ok(())
    }

    fn toggle_mute(&mut self) -> Result<(), Error> {
        self.muted = !self.muted;
        if let Err(e) = self.write_reg(REG_CTRL, self.control()) {
            self.muted = !self.muted;
            return Err(e);
        }
        info!("radio muted={}", self.muted);
        Ok(())
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn frequency(&self) -> u16 {
        self.frequency
    }

    fn volume(&self) -> u8 {
        self.volume
    }
}
