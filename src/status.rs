//! Report display and alarm evaluation, refreshed once a second.
//!
//! The monitor reads the RTC, settings and alarm records and writes the
//! report panel. It never touches the active screen: when an alarm is due
//! it switches the sounder on and leaves an [`AuxEvent::AlarmFired`] for
//! the polling loop.
//!
//! ## Layout
//!
//! ```text
//! row 0   battery (boot banner only)
//! row 1   date, or battery label during the banner
//! row 2   time
//! row 3   radio
//! row 4.. snooze, then alarms
//! row 7   latest report
//! ```

use core::fmt::Write as _;

use chrono::NaiveDateTime;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::alarms::{self, AlarmTime};
use crate::clock;
use crate::config::{BATTERY_CRITICAL_MV, BATTERY_GOOD_MV, BOOT_BANNER_SECS, DISPLAY_ROWS};
use crate::context::Text;
use crate::devices::{Devices, TextDisplay};
use crate::error::Error;
use crate::mailbox::{AuxEvent, EventMailbox, Report};
use crate::settings;

const DATE_ROW: u8 = 1;
const TIME_ROW: u8 = 2;
const RADIO_ROW: u8 = 3;
const FIRST_ALARM_ROW: u8 = 4;
const REPORT_ROW: u8 = DISPLAY_ROWS - 1;

/// Battery health label for a supply voltage.
pub fn battery_label(millivolts: u16) -> &'static str {
    if millivolts >= BATTERY_GOOD_MV {
        "Good"
    } else if millivolts >= BATTERY_CRITICAL_MV {
        "Low"
    } else {
        "Critical"
    }
}

/// Report-panel text for a status message.
pub fn report_text(report: Report) -> Text {
    let mut text = Text::new();
    let _ = match report {
        Report::SnoozeActive(time) => write!(text, "Snooze {}", time.label().as_str()),
        Report::SnoozeDisabled => write!(text, "Snooze off"),
        Report::AlarmDisabled => write!(text, "Alarm off"),
        Report::AlarmDeleted(id) => write!(text, "Alarm {} deleted", id),
    };
    text
}

/// `"103.1MHz Vol: 2"`.
pub fn radio_text(tenths: u16, volume: u8) -> Text {
    let mut text = Text::new();
    let _ = write!(text, "{}.{}MHz Vol: {}", tenths / 10, tenths % 10, volume);
    text
}

fn put(display: &mut dyn TextDisplay, text: &str, row: u8) {
    if let Err(e) = display.update_text(text, 0, row) {
        warn!("report row {}: {}", row, e);
    }
}

fn blank(display: &mut dyn TextDisplay, row: u8) {
    if let Err(e) = display.clear_row(row) {
        warn!("report row {}: {}", row, e);
    }
}

pub struct StatusMonitor<'m, M: RawMutex> {
    mailbox: &'m EventMailbox<M>,
    boot_ms: u64,
    banner_cleared: bool,
}

impl<'m, M: RawMutex> StatusMonitor<'m, M> {
    pub fn new(mailbox: &'m EventMailbox<M>, boot_ms: u64) -> Self {
        Self {
            mailbox,
            boot_ms,
            banner_cleared: false,
        }
    }

    pub fn in_banner(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.boot_ms) < BOOT_BANNER_SECS * 1000
    }

    /// One refresh. Only an invariant violation in the snooze records is
    /// returned; everything else is logged and retried next tick.
    ///
    /// Alarms are evaluated on every tick, banner or not.
    pub fn tick(&mut self, devices: &mut Devices<'_>, now_ms: u64) -> Result<(), Error> {
        let banner = self.in_banner(now_ms);
        if banner {
            self.show_battery(devices);
        } else {
            if !self.banner_cleared {
                blank(devices.report, 0);
                blank(devices.report, DATE_ROW);
                self.banner_cleared = true;
            }
            self.show_radio(devices);
        }
        self.show_clock(devices, !banner)?;
        self.show_reports(devices);
        if let Err(e) = devices.report.flush() {
            warn!("report flush failed: {}", e);
        }
        Ok(())
    }

    fn show_battery(&mut self, devices: &mut Devices<'_>) {
        match devices.battery.millivolts() {
            Ok(mv) => {
                let mut text = Text::new();
                let _ = write!(text, "Battery {}mV", mv);
                put(devices.report, &text, 0);
                put(devices.report, battery_label(mv), 1);
            }
            Err(e) => warn!("battery read failed: {}", e),
        }
    }

    fn show_radio(&mut self, devices: &mut Devices<'_>) {
        if devices.radio.is_muted() {
            blank(devices.report, RADIO_ROW);
        } else {
            let text = radio_text(devices.radio.frequency(), devices.radio.volume());
            put(devices.report, &text, RADIO_ROW);
        }
    }

    fn show_clock(&mut self, devices: &mut Devices<'_>, with_rows: bool) -> Result<(), Error> {
        let tz = settings::load_timezone(devices.store);
        let mode = settings::load_time_mode(devices.store);
        let utc = match devices.rtc.datetime() {
            Ok(dt) => dt,
            Err(e) => {
                warn!("RTC read failed: {}, keeping last time", e);
                return Ok(());
            }
        };
        let now = clock::to_local(utc, tz);
        if with_rows {
            put(devices.report, &clock::format_date(&now, tz), DATE_ROW);
            put(devices.report, &clock::format_time(&now, mode), TIME_ROW);
        }

        self.evaluate_alarms(devices, &now)
    }

    fn evaluate_alarms(&mut self, devices: &mut Devices<'_>, now: &NaiveDateTime) -> Result<(), Error> {
        let snooze = match alarms::snooze(devices.store) {
            Ok(snooze) => snooze,
            Err(Error::MultipleSnoozes) => return Err(Error::MultipleSnoozes),
            Err(e) => {
                warn!("snooze read failed: {}", e);
                None
            }
        };

        let mut row = FIRST_ALARM_ROW;
        let mut fired = false;

        if let Some((_, time)) = snooze {
            put(devices.report, &labelled("Snooze", time), row);
            row += 1;
            if time.matches(now) {
                if let Err(e) = alarms::clear_snoozes(devices.store) {
                    warn!("consuming snooze failed: {}", e);
                }
                self.fire(devices);
                fired = true;
            }
        }

        let stored = alarms::list_alarms(devices.store).unwrap_or_else(|e| {
            warn!("alarm list failed: {}", e);
            heapless::Vec::new()
        });
        for (id, time) in stored {
            if row < REPORT_ROW {
                put(devices.report, &labelled("Alarm", time), row);
                row += 1;
            }
            if snooze.is_none() && !fired && time.matches(now) {
                info!("alarm {} due", id);
                self.fire(devices);
                fired = true;
            }
        }

        while row < REPORT_ROW {
            blank(devices.report, row);
            row += 1;
        }
        Ok(())
    }

    fn fire(&mut self, devices: &mut Devices<'_>) {
        devices.sounder.set_active(true);
        if self.mailbox.auxiliary.push(AuxEvent::AlarmFired).is_err() {
            warn!("auxiliary queue full, alarm event dropped");
        }
    }

    /// Drain the reporting queue; the newest message wins the last row.
    fn show_reports(&mut self, devices: &mut Devices<'_>) {
        let mut latest = None;
        while let Some(report) = self.mailbox.reporting.pop() {
            latest = Some(report);
        }
        if let Some(report) = latest {
            put(devices.report, &report_text(report), REPORT_ROW);
        }
    }
}

fn labelled(prefix: &str, time: AlarmTime) -> Text {
    let mut text = Text::new();
    let _ = write!(text, "{} {}", prefix, time.label().as_str());
    text
}
