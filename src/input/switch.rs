//! Debounced push-button.
//!
//! One contact, one pending timer at most. The first edge arms the timer;
//! edges that arrive while it is pending are contact bounce and ignored.
//! When the timer fires the level is sampled once and compared with the
//! last stable level.

use super::{Debounce, SwitchEdge, Trigger};

/// A single debounced contact (active-low, pulled up).
#[derive(Clone, Debug)]
pub struct DebouncedSwitch {
    pin: u8,
    raw_level: bool,
    stable_level: bool,
    last_edge_ms: u64,
    window_ms: u64,
    trigger: Trigger,
    pending: bool,
    enabled: bool,
    epoch: u32,
}

impl DebouncedSwitch {
    /// Create a switch whose current level is `level`.
    pub fn new(pin: u8, level: bool, window_ms: u64, trigger: Trigger) -> Self {
        Self {
            pin,
            raw_level: level,
            stable_level: level,
            last_edge_ms: 0,
            window_ms,
            trigger,
            pending: false,
            enabled: true,
            epoch: 0,
        }
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Last debounced level.
    pub fn stable_level(&self) -> bool {
        self.stable_level
    }

    /// Last sampled level, debounced or not.
    pub fn raw_level(&self) -> bool {
        self.raw_level
    }

    /// `true` while the contact is held down.
    pub fn is_pressed(&self) -> bool {
        !self.stable_level
    }

    pub fn last_edge_ms(&self) -> u64 {
        self.last_edge_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub(crate) fn set_epoch(&mut self, epoch: u32) {
        self.epoch = epoch;
    }

    /// Edge seen on the pin. Arms the debounce timer unless one is pending.
    pub fn on_edge_interrupt(&mut self) -> Debounce {
        if !self.enabled || self.pending {
            return Debounce::Ignore;
        }
        self.pending = true;
        Debounce::Arm {
            delay_ms: self.window_ms,
            epoch: self.epoch,
        }
    }

    /// Debounce timer fired with the pin sampled at `level`.
    ///
    /// Returns the settled edge when it matches the configured trigger.
    /// Timers armed before the last [`disable`](Self::disable) are dropped.
    pub fn on_timer_fire(&mut self, level: bool, epoch: u32, now_ms: u64) -> Option<SwitchEdge> {
        if !self.enabled || !self.pending || epoch != self.epoch {
            return None;
        }
        self.pending = false;
        self.raw_level = level;

        if level == self.stable_level {
            return None;
        }
        self.stable_level = level;
        self.last_edge_ms = now_ms;

        let edge = if level {
            SwitchEdge::Release
        } else {
            SwitchEdge::Press
        };
        trace!("switch {}: {}", self.pin, edge);
        self.trigger.matches(edge).then_some(edge)
    }

    /// Detach from the pin. No timer can be armed afterwards and a timer
    /// already in flight is discarded when it fires. Safe to call twice.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.pending = false;
        self.epoch = self.epoch.wrapping_add(1);
    }
}
