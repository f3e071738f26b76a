//! Bounded number editor.
//!
//! Editors come in chains: hour -> minute -> second, year -> month -> day,
//! MHz -> tenths. Confirming writes the value into its collaborator and
//! hands the next link its header and bounds; the last link returns to
//! the main menu.

use core::fmt::Write as _;

use super::{menus, Env, Frame, Line};
use crate::alarms::{self, AlarmTime};
use crate::clock::{self, DateTimeField};
use crate::config::{RADIO_MHZ_MAX, RADIO_MHZ_MIN, RADIO_VOLUME_MAX, YEAR_MAX, YEAR_MIN};
use crate::context::{keys, truncated, Context, Text};
use crate::input::Trigger;
use crate::settings::{self, TIMEZONES};

/// What the edited number means and where it is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditorField {
    /// A field of the RTC date/time, entered as local time.
    Clock(DateTimeField),
    /// Hour, minute or second of an alarm record.
    Alarm(DateTimeField),
    Volume,
    FrequencyMhz,
    FrequencyTenths,
    /// Index into the timezone table.
    Timezone,
}

impl EditorField {
    /// Header text, which doubles as the field name in the context.
    pub fn header(self) -> &'static str {
        match self {
            EditorField::Clock(f) | EditorField::Alarm(f) => match f {
                DateTimeField::Year => "year",
                DateTimeField::Month => "month",
                DateTimeField::Day => "day",
                DateTimeField::Hour => "hour",
                DateTimeField::Minute => "minute",
                DateTimeField::Second => "second",
            },
            EditorField::Volume => "volume",
            EditorField::FrequencyMhz => "mhz",
            EditorField::FrequencyTenths => "tenths",
            EditorField::Timezone => "timezone",
        }
    }

    /// Bounds used when the context does not supply any.
    pub fn default_bounds(self) -> (i32, i32) {
        match self {
            EditorField::Clock(f) | EditorField::Alarm(f) => match f {
                DateTimeField::Year => (YEAR_MIN, YEAR_MAX),
                DateTimeField::Month => (1, 12),
                DateTimeField::Day => (1, 31),
                DateTimeField::Hour => (0, 23),
                DateTimeField::Minute | DateTimeField::Second => (0, 59),
            },
            EditorField::Volume => (0, RADIO_VOLUME_MAX as i32),
            EditorField::FrequencyMhz => (RADIO_MHZ_MIN, RADIO_MHZ_MAX),
            EditorField::FrequencyTenths => (0, 9),
            EditorField::Timezone => (0, TIMEZONES.len() as i32 - 1),
        }
    }

    /// Screen id that edits this field.
    pub fn screen(self) -> &'static str {
        match self {
            EditorField::Clock(DateTimeField::Year | DateTimeField::Month | DateTimeField::Day) => {
                menus::SET_DATE
            }
            EditorField::Clock(_) => menus::SET_TIME,
            EditorField::Alarm(_) => menus::SET_ALARM,
            EditorField::Volume => menus::SET_VOLUME,
            EditorField::FrequencyMhz | EditorField::FrequencyTenths => menus::SET_FREQUENCY,
            EditorField::Timezone => menus::SET_TIMEZONE,
        }
    }

    /// Next link of the chain, `None` at the end.
    pub fn next(self) -> Option<EditorField> {
        let step = |f: DateTimeField| match f {
            DateTimeField::Year => Some(DateTimeField::Month),
            DateTimeField::Month => Some(DateTimeField::Day),
            DateTimeField::Hour => Some(DateTimeField::Minute),
            DateTimeField::Minute => Some(DateTimeField::Second),
            DateTimeField::Day | DateTimeField::Second => None,
        };
        match self {
            EditorField::Clock(f) => step(f).map(EditorField::Clock),
            EditorField::Alarm(f) => step(f).map(EditorField::Alarm),
            EditorField::FrequencyMhz => Some(EditorField::FrequencyTenths),
            _ => None,
        }
    }

    /// Volume follows the knob while held, so it confirms on release.
    pub fn trigger(self) -> Trigger {
        match self {
            EditorField::Volume => Trigger::OnRelease,
            _ => Trigger::OnPress,
        }
    }
}

/// Time-of-day field named by `header`, hour when absent or unknown.
pub fn time_field(header: Option<&str>) -> DateTimeField {
    match header {
        Some("minute") => DateTimeField::Minute,
        Some("second") => DateTimeField::Second,
        _ => DateTimeField::Hour,
    }
}

/// Date field named by `header`, year when absent or unknown.
pub fn date_field(header: Option<&str>) -> DateTimeField {
    match header {
        Some("month") => DateTimeField::Month,
        Some("day") => DateTimeField::Day,
        _ => DateTimeField::Year,
    }
}

#[derive(Clone, Debug)]
pub struct ValueEditor {
    header: Text,
    field: EditorField,
    min: i32,
    max: i32,
    value: i32,
    alarm_id: Option<u8>,
    integer: Option<i32>,
}

impl ValueEditor {
    /// Editor for `field`, bounds and carried ids taken from `context`.
    pub fn new(field: EditorField, context: &Context) -> Self {
        let (dmin, dmax) = field.default_bounds();
        let min = context.int_or(keys::MIN, dmin);
        let max = context.int_or(keys::MAX, dmax);
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            header: truncated(context.text(keys::HEADER).unwrap_or(field.header())),
            field,
            min,
            max,
            value: min,
            alarm_id: context
                .int(keys::ALARM_ID)
                .and_then(|id| u8::try_from(id).ok()),
            integer: context.int(keys::INTEGER),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn field(&self) -> EditorField {
        self.field
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn alarm_id(&self) -> Option<u8> {
        self.alarm_id
    }

    pub fn update(&mut self, value: i32) -> bool {
        let value = value.clamp(self.min, self.max);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Start the editor at `value` (used to show the current setting).
    pub fn preset(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn confirm(&mut self, env: &mut Env<'_, '_>) -> Context {
        self.apply(env);

        let Some(next) = self.field.next() else {
            return Context::to(menus::MAIN_MENU);
        };
        let (min, max) = next.default_bounds();
        let mut context = Context::to(next.screen())
            .with_text(keys::HEADER, next.header())
            .with_int(keys::MIN, min)
            .with_int(keys::MAX, max);
        if let Some(id) = self.alarm_id {
            context = context.with_int(keys::ALARM_ID, id as i32);
        }
        if self.field == EditorField::FrequencyMhz {
            context = context.with_int(keys::INTEGER, self.value);
        }
        context
    }

    fn apply(&mut self, env: &mut Env<'_, '_>) {
        let value = self.value;
        match self.field {
            EditorField::Clock(field) => write_clock(env, field, value),
            EditorField::Alarm(field) => self.write_alarm(env, field),
            EditorField::Volume => {
                if let Err(e) = env.devices.radio.set_volume(value as u8) {
                    warn!("setting volume failed: {}", e);
                }
            }
            EditorField::FrequencyMhz => {}
            EditorField::FrequencyTenths => {
                let mhz = self.integer.unwrap_or(RADIO_MHZ_MIN);
                let tenths = (mhz * 10 + value) as u16;
                match env.devices.radio.set_frequency(tenths) {
                    Ok(()) => info!("tuned to {} x 0.1 MHz", tenths),
                    Err(e) => warn!("tuning failed: {}", e),
                }
            }
            EditorField::Timezone => {
                let tz = TIMEZONES[(value.max(0) as usize).min(TIMEZONES.len() - 1)];
                if let Err(e) = settings::save_timezone(env.devices.store, tz) {
                    warn!("saving timezone failed: {}", e);
                }
            }
        }
    }

    /// Create the alarm on the first link, update it on the later ones.
    fn write_alarm(&mut self, env: &mut Env<'_, '_>, field: DateTimeField) {
        let store = &mut *env.devices.store;
        let existing = match self.alarm_id {
            Some(id) => alarms::load_alarm(store, id).unwrap_or_else(|e| {
                warn!("reading alarm {} failed: {}", id, e);
                None
            }),
            None => None,
        };

        let mut time: AlarmTime = existing.unwrap_or_default();
        time.set(field, self.value);

        match (self.alarm_id, existing) {
            (Some(id), Some(_)) => {
                if let Err(e) = alarms::save_alarm(store, id, time) {
                    warn!("saving alarm {} failed: {}", id, e);
                }
            }
            _ => match alarms::new_alarm(store, time) {
                Ok(id) => self.alarm_id = Some(id),
                Err(e) => warn!("creating alarm failed: {}", e),
            },
        }
    }

    pub fn render(&self) -> Frame {
        let mut frame = Frame::new();
        let _ = frame.push(Line::new(&self.header, 0, 0));

        let mut text = Text::new();
        let _ = match self.field {
            EditorField::Timezone => {
                let index = (self.value.max(0) as usize).min(TIMEZONES.len() - 1);
                text.push_str(TIMEZONES[index].code).map_err(|_| core::fmt::Error)
            }
            EditorField::FrequencyMhz => write!(text, "{} MHz", self.value),
            EditorField::FrequencyTenths => write!(
                text,
                "{}.{} MHz",
                self.integer.unwrap_or(RADIO_MHZ_MIN),
                self.value
            ),
            _ => write!(text, "{}", self.value),
        };
        let _ = frame.push(Line {
            text,
            col: 0,
            row: 1,
        });
        frame
    }
}

/// Replace one field of the RTC's local time.
fn write_clock(env: &mut Env<'_, '_>, field: DateTimeField, value: i32) {
    let tz = settings::load_timezone(env.devices.store);
    let utc = match env.devices.rtc.datetime() {
        Ok(dt) => dt,
        Err(e) => {
            warn!("reading RTC failed: {}", e);
            return;
        }
    };
    let Some(local) = clock::set_field(clock::to_local(utc, tz), field, value) else {
        warn!("{} out of range for {}", value, field);
        return;
    };
    if let Err(e) = env.devices.rtc.set_datetime(clock::to_utc(local, tz)) {
        warn!("writing RTC failed: {}", e);
    }
}
