//! Calendar helpers on top of `chrono`.
//!
//! The RTC keeps UTC. Everything shown to or entered by the user is local
//! time in the configured fixed-offset zone.

use core::fmt::Write as _;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::context::Text;
use crate::settings::{TimeMode, Timezone};

/// A settable calendar field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateTimeField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

pub fn to_local(utc: NaiveDateTime, tz: Timezone) -> NaiveDateTime {
    shift(utc, tz.offset_hours as i64)
}

pub fn to_utc(local: NaiveDateTime, tz: Timezone) -> NaiveDateTime {
    shift(local, -(tz.offset_hours as i64))
}

fn shift(dt: NaiveDateTime, hours: i64) -> NaiveDateTime {
    dt.checked_add_signed(TimeDelta::hours(hours)).unwrap_or(dt)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&d| NaiveDate::from_ymd_opt(year, month, d).is_some())
        .unwrap_or(28)
}

/// Replace one field of `dt`. The day is clamped to the month length so
/// that moving from Jan 31 to February lands on the last day of February.
pub fn set_field(dt: NaiveDateTime, field: DateTimeField, value: i32) -> Option<NaiveDateTime> {
    let date = dt.date();
    let time = dt.time();
    let value_u = u32::try_from(value).ok()?;
    match field {
        DateTimeField::Year => {
            let day = date.day().min(days_in_month(value, date.month()));
            NaiveDate::from_ymd_opt(value, date.month(), day).map(|d| d.and_time(time))
        }
        DateTimeField::Month => {
            let day = date.day().min(days_in_month(date.year(), value_u));
            NaiveDate::from_ymd_opt(date.year(), value_u, day).map(|d| d.and_time(time))
        }
        DateTimeField::Day => {
            let day = value_u.min(days_in_month(date.year(), date.month()));
            date.with_day(day).map(|d| d.and_time(time))
        }
        DateTimeField::Hour => dt.with_hour(value_u),
        DateTimeField::Minute => dt.with_minute(value_u),
        DateTimeField::Second => dt.with_second(value_u),
    }
}

/// `HH:MM:SS` in 24h mode, `hh:MM:SS AM` in 12h mode.
pub fn format_time(dt: &NaiveDateTime, mode: TimeMode) -> Text {
    let mut out = Text::new();
    let _ = match mode {
        TimeMode::TwentyFourHour => write!(
            out,
            "{:02}:{:02}:{:02}",
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        TimeMode::TwelveHour => {
            let (pm, hour) = dt.hour12();
            write!(
                out,
                "{:02}:{:02}:{:02} {}",
                hour,
                dt.minute(),
                dt.second(),
                if pm { "PM" } else { "AM" }
            )
        }
    };
    out
}

/// `YYYY-MM-DD-TZ`.
pub fn format_date(dt: &NaiveDateTime, tz: Timezone) -> Text {
    let mut out = Text::new();
    let _ = write!(
        out,
        "{:04}-{:02}-{:02}-{}",
        dt.year(),
        dt.month(),
        dt.day(),
        tz.code
    );
    out
}

/// Binary-coded decimal, as used by the RTC registers.
pub fn bcd_encode(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

pub fn bcd_decode(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}
