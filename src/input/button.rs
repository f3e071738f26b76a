//! Stand-alone push-buttons that raise auxiliary events.

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::{Debounce, DebouncedSwitch, Trigger};
use crate::config::SWITCH_DEBOUNCE_MS;
use crate::mailbox::{AuxEvent, AuxiliaryQueue};

/// A debounced key bound to one [`AuxEvent`].
#[derive(Clone, Debug)]
pub struct AuxButton {
    switch: DebouncedSwitch,
    event: AuxEvent,
}

impl AuxButton {
    pub fn new(pin: u8, level: bool, event: AuxEvent) -> Self {
        Self {
            switch: DebouncedSwitch::new(pin, level, SWITCH_DEBOUNCE_MS, Trigger::OnPress),
            event,
        }
    }

    pub fn switch(&self) -> &DebouncedSwitch {
        &self.switch
    }

    pub fn on_edge_interrupt(&mut self) -> Debounce {
        self.switch.on_edge_interrupt()
    }

    /// Settle the key; a press queues the bound event. Returns `true` when
    /// an event was queued.
    pub fn on_timer_fire<M: RawMutex>(
        &mut self,
        level: bool,
        epoch: u32,
        now_ms: u64,
        queue: &AuxiliaryQueue<M>,
    ) -> bool {
        if self.switch.on_timer_fire(level, epoch, now_ms).is_none() {
            return false;
        }
        match queue.push(self.event) {
            Ok(()) => {
                debug!("key {}: {}", self.switch.pin(), self.event);
                true
            }
            Err(_) => {
                warn!("auxiliary queue full, {} dropped", self.event);
                false
            }
        }
    }
}
