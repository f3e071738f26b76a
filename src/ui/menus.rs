//! Screen table.
//!
//! Each screen id maps to a builder that reads the incoming context, claims
//! the encoder with the bounds it needs, paints itself and returns the
//! screen. A builder error leaves nothing attached.

use core::fmt::Write as _;

use heapless::Vec;

use super::list_menu::MAX_ITEMS;
use super::value_editor::{date_field, time_field};
use super::{
    paint, ConfirmPrompt, EditorField, Env, ListMenu, MenuItem, ModeToggle, PromptAction, Screen,
    ValueEditor,
};
use crate::alarms;
use crate::clock::{self, DateTimeField};
use crate::config::SNOOZE_MINUTES;
use crate::context::{keys, Context, Text};
use crate::error::Error;
use crate::input::{Encoder, Trigger};
use crate::mailbox::Report;
use crate::settings;

pub const MAIN_MENU: &str = "main_menu";
pub const SET_DATE: &str = "set_date";
pub const TIME_MENU: &str = "time_menu";
pub const SET_TIME: &str = "set_time";
pub const SET_TIME_MODE: &str = "set_time_mode";
pub const SET_TIMEZONE: &str = "set_timezone";
pub const ALARM_MENU: &str = "alarm_menu";
pub const SET_ALARM: &str = "set_alarm";
pub const LIST_ALARMS: &str = "list_alarms";
pub const DELETE_ALARM: &str = "delete_alarm";
pub const RADIO_MENU: &str = "radio_menu";
pub const SET_FREQUENCY: &str = "set_frequency";
pub const SET_VOLUME: &str = "set_volume";
pub const ALARM_DISABLE: &str = "alarm_disable";
pub const ALARM_SNOOZE: &str = "alarm_snooze";

/// Builds a screen from the context handed over by its predecessor.
pub type Builder = fn(&mut Env<'_, '_>, Context) -> Result<Screen, Error>;

/// Initial state and fallback of the router.
pub const MAIN_MENU_BUILDER: Builder = main_menu;

pub static SCREENS: &[(&str, Builder)] = &[
    (MAIN_MENU, main_menu),
    (SET_DATE, set_date),
    (TIME_MENU, time_menu),
    (SET_TIME, set_time),
    (SET_TIME_MODE, set_time_mode),
    (SET_TIMEZONE, set_timezone),
    (ALARM_MENU, alarm_menu),
    (SET_ALARM, set_alarm),
    (LIST_ALARMS, list_alarms),
    (DELETE_ALARM, delete_alarm),
    (RADIO_MENU, radio_menu),
    (SET_FREQUENCY, set_frequency),
    (SET_VOLUME, set_volume),
    (ALARM_DISABLE, alarm_disable),
    (ALARM_SNOOZE, alarm_snooze),
];

/// Table entry for `id`, with the id in its `'static` form.
pub fn resolve(id: &str) -> Result<(&'static str, Builder), Error> {
    SCREENS
        .iter()
        .find(|(name, _)| *name == id)
        .copied()
        .ok_or(Error::UnknownScreen)
}

/// Claim the encoder over `[min, max]` and draw `screen`.
fn activate(
    env: &mut Env<'_, '_>,
    screen: Screen,
    (min, max): (i32, i32),
    trigger: Trigger,
    initial: Option<i32>,
) -> Result<Screen, Error> {
    // The press that opened this screen belongs to the previous one, so the
    // switch starts out released and its trailing release is not an edge.
    let mut levels = env.encoder.levels();
    levels.switch = true;
    env.encoder
        .attach(Encoder::bounded(levels, min, max, true, trigger));
    if let Some(value) = initial {
        env.encoder.set_counter(value);
    }
    if let Err(e) = paint(env, &screen.render()) {
        env.encoder.detach();
        return Err(e);
    }
    Ok(screen)
}

fn menu(env: &mut Env<'_, '_>, header: &str, items: Vec<MenuItem, MAX_ITEMS>) -> Result<Screen, Error> {
    let menu = ListMenu::new(header, items);
    let range = menu.counter_range();
    activate(env, Screen::ListMenu(menu), range, Trigger::OnPress, None)
}

fn items<const N: usize>(entries: [MenuItem; N]) -> Vec<MenuItem, MAX_ITEMS> {
    let mut out = Vec::new();
    for item in entries {
        let _ = out.push(item);
    }
    out
}

fn editor(env: &mut Env<'_, '_>, mut screen: ValueEditor, preset: Option<i32>) -> Result<Screen, Error> {
    if let Some(value) = preset {
        screen.preset(value);
    }
    let bounds = screen.bounds();
    let trigger = screen.field().trigger();
    let initial = Some(screen.value());
    activate(env, Screen::ValueEditor(screen), bounds, trigger, initial)
}

fn prompt(env: &mut Env<'_, '_>, screen: ConfirmPrompt) -> Result<Screen, Error> {
    activate(env, Screen::ConfirmPrompt(screen), (0, 1), Trigger::OnPress, Some(0))
}

fn field_context(field: EditorField) -> Context {
    let (min, max) = field.default_bounds();
    Context::default()
        .with_text(keys::HEADER, field.header())
        .with_int(keys::MIN, min)
        .with_int(keys::MAX, max)
}

fn main_menu(env: &mut Env<'_, '_>, _context: Context) -> Result<Screen, Error> {
    let date = field_context(EditorField::Clock(DateTimeField::Year));
    menu(
        env,
        "Main Menu",
        items([
            MenuItem::new("Date", SET_DATE).with_context(date),
            MenuItem::new("Time", TIME_MENU),
            MenuItem::new("Alarm", ALARM_MENU),
            MenuItem::new("Radio", RADIO_MENU),
        ]),
    )
}

fn time_menu(env: &mut Env<'_, '_>, _context: Context) -> Result<Screen, Error> {
    let hour = field_context(EditorField::Clock(DateTimeField::Hour));
    menu(
        env,
        "Time",
        items([
            MenuItem::new("Set Time", SET_TIME).with_context(hour),
            MenuItem::new("Time Mode", SET_TIME_MODE),
            MenuItem::new("Timezone", SET_TIMEZONE),
            MenuItem::new("Back", MAIN_MENU),
        ]),
    )
}

fn set_date(env: &mut Env<'_, '_>, context: Context) -> Result<Screen, Error> {
    let field = EditorField::Clock(date_field(context.text(keys::HEADER)));
    editor(env, ValueEditor::new(field, &context), None)
}

fn set_time(env: &mut Env<'_, '_>, context: Context) -> Result<Screen, Error> {
    let field = EditorField::Clock(time_field(context.text(keys::HEADER)));
    editor(env, ValueEditor::new(field, &context), None)
}

fn set_time_mode(env: &mut Env<'_, '_>, _context: Context) -> Result<Screen, Error> {
    let mode = settings::load_time_mode(env.devices.store);
    let initial = Some(mode.digit() as i32);
    activate(
        env,
        Screen::ModeToggle(ModeToggle::new("Time Mode", mode)),
        (0, 1),
        Trigger::OnPress,
        initial,
    )
}

fn set_timezone(env: &mut Env<'_, '_>, context: Context) -> Result<Screen, Error> {
    let current = settings::load_timezone(env.devices.store);
    let index = settings::timezone_index(current.code).unwrap_or(0) as i32;
    editor(env, ValueEditor::new(EditorField::Timezone, &context), Some(index))
}

fn alarm_menu(env: &mut Env<'_, '_>, _context: Context) -> Result<Screen, Error> {
    let hour = field_context(EditorField::Alarm(DateTimeField::Hour));
    menu(
        env,
        "Alarm",
        items([
            MenuItem::new("New Alarm", SET_ALARM).with_context(hour),
            MenuItem::new("List Alarms", LIST_ALARMS),
            MenuItem::new("Back", MAIN_MENU),
        ]),
    )
}

fn set_alarm(env: &mut Env<'_, '_>, context: Context) -> Result<Screen, Error> {
    let field = EditorField::Alarm(time_field(context.text(keys::HEADER)));
    editor(env, ValueEditor::new(field, &context), None)
}

fn list_alarms(env: &mut Env<'_, '_>, _context: Context) -> Result<Screen, Error> {
    let mut entries: Vec<MenuItem, MAX_ITEMS> = Vec::new();
    for (id, time) in alarms::list_alarms(env.devices.store)? {
        let item = MenuItem::new(&time.label(), DELETE_ALARM)
            .with_context(Context::default().with_int(keys::ALARM_ID, id as i32));
        let _ = entries.push(item);
    }
    let _ = entries.push(MenuItem::new("Back", MAIN_MENU));
    menu(env, "Alarms", entries)
}

fn delete_alarm(env: &mut Env<'_, '_>, context: Context) -> Result<Screen, Error> {
    let id = context
        .int(keys::ALARM_ID)
        .and_then(|id| u8::try_from(id).ok())
        .ok_or(Error::MissingContext)?;

    let mut header = Text::new();
    match alarms::load_alarm(env.devices.store, id)? {
        Some(time) => {
            let _ = write!(header, "Delete {}?", time.label().as_str());
        }
        None => {
            let _ = header.push_str("Delete alarm?");
        }
    }
    prompt(env, ConfirmPrompt::new(&header, PromptAction::DeleteAlarm(id)))
}

fn radio_menu(env: &mut Env<'_, '_>, _context: Context) -> Result<Screen, Error> {
    let mhz = field_context(EditorField::FrequencyMhz);
    menu(
        env,
        "Radio",
        items([
            MenuItem::new("Frequency", SET_FREQUENCY).with_context(mhz),
            MenuItem::new("Volume", SET_VOLUME),
            MenuItem::new("Back", MAIN_MENU),
        ]),
    )
}

fn set_frequency(env: &mut Env<'_, '_>, context: Context) -> Result<Screen, Error> {
    let tenths = env.devices.radio.frequency() as i32;
    let (field, preset) = match context.text(keys::HEADER) {
        Some("tenths") => (EditorField::FrequencyTenths, tenths % 10),
        _ => (EditorField::FrequencyMhz, tenths / 10),
    };
    editor(env, ValueEditor::new(field, &context), Some(preset))
}

fn set_volume(env: &mut Env<'_, '_>, context: Context) -> Result<Screen, Error> {
    let volume = env.devices.radio.volume() as i32;
    editor(env, ValueEditor::new(EditorField::Volume, &context), Some(volume))
}

fn alarm_disable(env: &mut Env<'_, '_>, context: Context) -> Result<Screen, Error> {
    let header = context.text(keys::HEADER).unwrap_or("Disable Alarm");
    let screen = ConfirmPrompt::new(header, PromptAction::DisableAlarm);
    prompt(env, screen)
}

fn alarm_snooze(env: &mut Env<'_, '_>, context: Context) -> Result<Screen, Error> {
    if context.flag(keys::SNOOZE) {
        env.devices.sounder.set_active(false);
        let tz = settings::load_timezone(env.devices.store);
        let now = clock::to_local(env.devices.rtc.datetime()?, tz);
        let (_, time) = alarms::new_snooze(env.devices.store, &now, SNOOZE_MINUTES)?;
        env.reports.report(Report::SnoozeActive(time));
    }
    prompt(env, ConfirmPrompt::new("Disable Snooze?", PromptAction::DisableSnooze))
}
