//! User interface - the screens of the navigation state machine.
//!
//! Every screen owns one encoder for as long as it is active and
//! implements the same four operations: `poll` (pick up encoder movement),
//! `confirm` (act on the button and say where to go next), `stop` (release
//! the encoder and the panel) and `render` (describe what to draw).
//!
//! ## Variants
//!
//! - **ListMenu**: selectable items with a cursor
//! - **ValueEditor**: a bounded number (hour, volume, frequency digit, ...)
//! - **ConfirmPrompt**: yes/no before a destructive action
//! - **ModeToggle**: 12h/24h clock

pub mod confirm;
pub mod list_menu;
pub mod menus;
pub mod mode_toggle;
pub mod value_editor;

use heapless::Vec;

pub use confirm::{ConfirmPrompt, PromptAction};
pub use list_menu::{ListMenu, MenuItem};
pub use mode_toggle::ModeToggle;
pub use value_editor::{EditorField, ValueEditor};

use crate::config::DISPLAY_ROWS;
use crate::context::{truncated, Context, Text};
use crate::devices::Devices;
use crate::error::Error;
use crate::input::EncoderPort;
use crate::mailbox::ReportSink;

/// One piece of text at a grid position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: Text,
    pub col: u8,
    pub row: u8,
}

impl Line {
    pub fn new(text: &str, col: u8, row: u8) -> Self {
        Self {
            text: truncated(text),
            col,
            row,
        }
    }
}

/// A full screen worth of text.
pub type Frame = Vec<Line, { DISPLAY_ROWS as usize }>;

/// What a screen may reach while it is active.
pub struct Env<'a, 'd> {
    pub devices: &'a mut Devices<'d>,
    pub encoder: &'a dyn EncoderPort,
    pub reports: &'a dyn ReportSink,
}

/// Draw `frame` on the navigation panel, replacing what was there.
pub fn paint(env: &mut Env<'_, '_>, frame: &Frame) -> Result<(), Error> {
    env.devices.display.clear()?;
    for line in frame {
        env.devices.display.update_text(&line.text, line.col, line.row)?;
    }
    env.devices.display.flush()
}

/// Active screen.
#[derive(Debug)]
pub enum Screen {
    ListMenu(ListMenu),
    ValueEditor(ValueEditor),
    ConfirmPrompt(ConfirmPrompt),
    ModeToggle(ModeToggle),
}

impl Screen {
    /// Pick up encoder movement. Returns `true` when a repaint is due.
    pub fn poll(&mut self, env: &mut Env<'_, '_>) -> bool {
        let Some((value, _)) = env.encoder.counter() else {
            return false;
        };
        match self {
            Screen::ListMenu(s) => s.update(value),
            Screen::ValueEditor(s) => s.update(value),
            Screen::ConfirmPrompt(s) => s.update(value),
            Screen::ModeToggle(s) => s.update(value),
        }
    }

    /// Button confirmed: perform the screen's action and build the context
    /// for the next screen.
    pub fn confirm(&mut self, env: &mut Env<'_, '_>) -> Context {
        match self {
            Screen::ListMenu(s) => s.confirm(),
            Screen::ValueEditor(s) => s.confirm(env),
            Screen::ConfirmPrompt(s) => s.confirm(env),
            Screen::ModeToggle(s) => s.confirm(env),
        }
    }

    /// Release the encoder and blank the frame buffer. Safe to call twice.
    pub fn stop(&mut self, env: &mut Env<'_, '_>) {
        env.encoder.detach();
        if let Err(e) = env.devices.display.clear() {
            warn!("display clear failed on stop: {}", e);
        }
    }

    pub fn render(&self) -> Frame {
        match self {
            Screen::ListMenu(s) => s.render(),
            Screen::ValueEditor(s) => s.render(),
            Screen::ConfirmPrompt(s) => s.render(),
            Screen::ModeToggle(s) => s.render(),
        }
    }

    pub fn header(&self) -> &str {
        match self {
            Screen::ListMenu(s) => s.header(),
            Screen::ValueEditor(s) => s.header(),
            Screen::ConfirmPrompt(s) => s.header(),
            Screen::ModeToggle(s) => s.header(),
        }
    }
}
