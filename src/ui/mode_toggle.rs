//! 12h / 24h clock toggle.

use super::{menus, Env, Frame, Line};
use crate::context::{truncated, Context, Text};
use crate::settings::{self, TimeMode};

#[derive(Clone, Debug)]
pub struct ModeToggle {
    header: Text,
    mode: TimeMode,
}

impl ModeToggle {
    pub fn new(header: &str, mode: TimeMode) -> Self {
        Self {
            header: truncated(header),
            mode,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    /// Encoder value is the record digit (0 = 12h, 1 = 24h).
    pub fn update(&mut self, value: i32) -> bool {
        let mode = u8::try_from(value)
            .ok()
            .and_then(TimeMode::from_digit)
            .unwrap_or(self.mode);
        let changed = mode != self.mode;
        self.mode = mode;
        changed
    }

    pub fn confirm(&mut self, env: &mut Env<'_, '_>) -> Context {
        match settings::save_time_mode(env.devices.store, self.mode) {
            Ok(()) => info!("time mode set to {}", self.mode.label()),
            Err(e) => warn!("saving time mode failed: {}", e),
        }
        Context::to(menus::MAIN_MENU)
    }

    pub fn render(&self) -> Frame {
        let mut frame = Frame::new();
        let _ = frame.push(Line::new(&self.header, 0, 0));
        let _ = frame.push(Line::new(self.mode.label(), 0, 1));
        frame
    }
}
