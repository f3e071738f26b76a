//! Navigation context - the data an exiting screen hands to the next one.
//!
//! `router` says where to go, `ui` carries whatever the next screen needs
//! to set itself up (header, bounds, alarm id, ...). A context is produced
//! once and consumed once.

use heapless::{LinearMap, String};

use crate::config::LINE_CAPACITY;

/// Longest screen id.
pub const SCREEN_NAME_LEN: usize = 16;

/// Most `ui` fields a context carries.
pub const UI_FIELDS: usize = 6;

pub type ScreenName = String<SCREEN_NAME_LEN>;

/// Short display text, one row wide.
pub type Text = String<LINE_CAPACITY>;

/// Well-known `ui` keys.
pub mod keys {
    pub const HEADER: &str = "header";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const ALARM_ID: &str = "alarm_id";
    pub const SNOOZE: &str = "snooze";
    pub const INTEGER: &str = "integer";
}

/// Copy `s` into a row-sized string, cutting at a char boundary if needed.
pub fn truncated(s: &str) -> Text {
    let mut out = Text::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i32),
    Text(Text),
    Flag(bool),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouterContext {
    pub next_screen_id: Option<ScreenName>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context {
    pub router: RouterContext,
    pub ui: LinearMap<&'static str, Value, UI_FIELDS>,
}

impl Context {
    /// Context routing to `screen` with an empty `ui` map.
    pub fn to(screen: &str) -> Self {
        let next = ScreenName::try_from(screen).ok();
        if next.is_none() {
            warn!("screen id too long: {}", screen);
        }
        Self {
            router: RouterContext {
                next_screen_id: next,
            },
            ui: LinearMap::new(),
        }
    }

    pub fn next_screen_id(&self) -> Option<&str> {
        self.router.next_screen_id.as_deref()
    }

    /// Set a `ui` field; dropped with a warning when the map is full.
    pub fn set(&mut self, key: &'static str, value: Value) {
        if self.ui.insert(key, value).is_err() {
            warn!("context full, dropping {}", key);
        }
    }

    pub fn with_int(mut self, key: &'static str, value: i32) -> Self {
        self.set(key, Value::Int(value));
        self
    }

    pub fn with_text(mut self, key: &'static str, value: &str) -> Self {
        self.set(key, Value::Text(truncated(value)));
        self
    }

    pub fn with_flag(mut self, key: &'static str, value: bool) -> Self {
        self.set(key, Value::Flag(value));
        self
    }

    pub fn int(&self, key: &str) -> Option<i32> {
        match self.ui.get(key) {
            Some(Value::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn int_or(&self, key: &str, default: i32) -> i32 {
        self.int(key).unwrap_or(default)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.ui.get(key) {
            Some(Value::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Missing or non-flag fields read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.ui.get(key), Some(Value::Flag(true)))
    }
}
