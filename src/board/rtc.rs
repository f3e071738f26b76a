//! DS1307 real-time clock.
//!
//! Seven BCD registers from 0x00: seconds, minutes, hours, weekday, date,
//! month, year. The clock runs in 24-hour mode and holds UTC.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use clock_radio::clock::{bcd_decode, bcd_encode};
use clock_radio::devices::Rtc;
use clock_radio::Error;
use defmt::{debug, warn};

/// 7-bit I²C address.
pub const DS1307_ADDR: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;

/// Clock-halt flag in the seconds register.
const CH: u8 = 0x80;

pub struct Ds1307<I2C> {
    i2c: I2C,
}

impl<I2C> Ds1307<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Restart the oscillator if the clock-halt flag is set.
    pub fn start(&mut self) -> Result<(), Error> {
        let mut seconds = [0u8; 1];
        self.i2c
            .write_read(DS1307_ADDR, &[REG_SECONDS], &mut seconds)
            .map_err(|_| Error::Rtc)?;
        if seconds[0] & CH != 0 {
            warn!("DS1307 was halted, starting oscillator");
            self.i2c
                .write(DS1307_ADDR, &[REG_SECONDS, seconds[0] & !CH])
                .map_err(|_| Error::Rtc)?;
        }
        Ok(())
    }
}

impl<I2C> Rtc for Ds1307<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn datetime(&mut self) -> Result<NaiveDateTime, Error> {
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(DS1307_ADDR, &[REG_SECONDS], &mut regs)
            .map_err(|_| Error::Rtc)?;

        let second = bcd_decode(regs[0] & 0x7F) as u32;
        let minute = bcd_decode(regs[1] & 0x7F) as u32;
        let hour = bcd_decode(regs[2] & 0x3F) as u32;
        let day = bcd_decode(regs[4] & 0x3F) as u32;
        let month = bcd_decode(regs[5] & 0x1F) as u32;
        let year = 2000 + bcd_decode(regs[6]) as i32;

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or(Error::Rtc)
    }

    fn set_datetime(&mut self, dt: NaiveDateTime) -> Result<(), Error> {
        let year = dt.year().clamp(2000, 2099) - 2000;
        let frame = [
            REG_SECONDS,
            bcd_encode(dt.second() as u8),
            bcd_encode(dt.minute() as u8),
            bcd_encode(dt.hour() as u8),
            dt.weekday().number_from_sunday() as u8,
            bcd_encode(dt.day() as u8),
            bcd_encode(dt.month() as u8),
            bcd_encode(year as u8),
        ];
        self.i2c
            .write(DS1307_ADDR, &frame)
            .map_err(|_| Error::Rtc)?;
        debug!("RTC set to {:?}", defmt::Debug2Format(&dt));
        Ok(())
    }
}
