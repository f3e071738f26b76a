//! Yes/No prompt guarding a destructive action.

use super::{menus, Env, Frame, Line};
use crate::alarms;
use crate::context::{keys, truncated, Context, Text};
use crate::mailbox::Report;

/// Encoder value meaning "yes".
pub const YES: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PromptAction {
    /// Silence a ringing alarm. "No" snoozes instead.
    DisableAlarm,
    /// Remove a stored alarm.
    DeleteAlarm(u8),
    /// Drop the pending snooze.
    DisableSnooze,
}

#[derive(Clone, Debug)]
pub struct ConfirmPrompt {
    header: Text,
    action: PromptAction,
    value: i32,
}

impl ConfirmPrompt {
    pub fn new(header: &str, action: PromptAction) -> Self {
        Self {
            header: truncated(header),
            action,
            value: 0,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn action(&self) -> PromptAction {
        self.action
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn update(&mut self, value: i32) -> bool {
        let changed = value != self.value;
        self.value = value;
        changed
    }

    pub fn confirm(&mut self, env: &mut Env<'_, '_>) -> Context {
        let yes = self.value == YES;
        match self.action {
            PromptAction::DisableAlarm => {
                env.devices.sounder.set_active(false);
                if yes {
                    info!("alarm disabled");
                    env.reports.report(Report::AlarmDisabled);
                } else {
                    return Context::to(menus::ALARM_SNOOZE).with_flag(keys::SNOOZE, true);
                }
            }
            PromptAction::DeleteAlarm(id) if yes => match alarms::delete_alarm(env.devices.store, id) {
                Ok(()) => {
                    info!("alarm {} deleted", id);
                    env.reports.report(Report::AlarmDeleted(id));
                }
                Err(e) => error!("deleting alarm {} failed: {}", id, e),
            },
            PromptAction::DisableSnooze if yes => {
                env.devices.sounder.set_active(false);
                if let Err(e) = alarms::clear_snoozes(env.devices.store) {
                    error!("clearing snooze failed: {}", e);
                }
                env.reports.report(Report::SnoozeDisabled);
            }
            _ => {}
        }
        Context::to(menus::MAIN_MENU)
    }

    pub fn render(&self) -> Frame {
        let mut frame = Frame::new();
        let _ = frame.push(Line::new(&self.header, 0, 0));
        let answer = if self.value == YES { "Yes" } else { "No" };
        let _ = frame.push(Line::new(answer, 0, 1));
        frame
    }
}
