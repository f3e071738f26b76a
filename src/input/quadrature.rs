//! Quadrature decoding for a detented rotary encoder.
//!
//! Channel states are combined as `a * 2 + b`:
//!
//! ```text
//! Clockwise:          0 -> 1 -> 3 -> 2 -> 0
//! Counter-clockwise:  0 -> 2 -> 3 -> 1 -> 0
//! ```
//!
//! A detent is one full cycle. The counter only moves after four
//! consecutive distinct states that all step along the same cycle, each
//! within `timeout_ms` of the previous one. Anything shorter, slower or
//! mixed is contact noise and leaves the counter alone.

use super::{quadrature_state, Debounce, Direction};
use crate::config::{ENCODER_DEBOUNCE_MS, QUADRATURE_TIMEOUT_MS};

/// Transitions that make up one detent.
const TRANSITIONS_PER_DETENT: u8 = 4;

/// Direction of a single `from -> to` step, `None` for an impossible step
/// (both channels changed at once, or no change).
pub fn step_direction(from: u8, to: u8) -> Option<Direction> {
    match (from, to) {
        (0, 1) | (1, 3) | (3, 2) | (2, 0) => Some(Direction::Clockwise),
        (0, 2) | (2, 3) | (3, 1) | (1, 0) => Some(Direction::CounterClockwise),
        _ => None,
    }
}

/// Bounded encoder counter fed by debounced channel samples.
#[derive(Clone, Debug)]
pub struct QuadratureDecoder {
    state: u8,
    last_state: u8,
    transition_count: u8,
    partial: Direction,
    last_transition_ms: u64,
    timeout_ms: u64,
    counter: i32,
    min: i32,
    max: i32,
    rollover: bool,
    direction: Direction,
    window_ms: u64,
    pending: bool,
    enabled: bool,
    epoch: u32,
}

impl QuadratureDecoder {
    /// Create a decoder over `[min, max]` with the counter at `min`.
    ///
    /// `initial_state` is the channel state sampled right now, so the first
    /// edge is measured against reality rather than a guess.
    pub fn new(initial_state: u8, min: i32, max: i32, rollover: bool) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            state: initial_state & 0b11,
            last_state: initial_state & 0b11,
            transition_count: 0,
            partial: Direction::None,
            last_transition_ms: 0,
            timeout_ms: QUADRATURE_TIMEOUT_MS,
            counter: min,
            min,
            max,
            rollover,
            direction: Direction::None,
            window_ms: ENCODER_DEBOUNCE_MS,
            pending: false,
            enabled: true,
            epoch: 0,
        }
    }

    /// Override the debounce window and the quadrature timeout.
    pub fn with_timing(mut self, window_ms: u64, timeout_ms: u64) -> Self {
        self.window_ms = window_ms;
        self.timeout_ms = timeout_ms;
        self
    }

    /// Current value and the direction of the last counted detent.
    pub fn get_counter(&self) -> (i32, Direction) {
        (self.counter, self.direction)
    }

    pub fn reset_counter(&mut self) {
        self.counter = self.min;
        self.direction = Direction::None;
    }

    /// Accept `value` only when it lies within `[min, max]`.
    pub fn set_counter(&mut self, value: i32) -> bool {
        if (self.min..=self.max).contains(&value) {
            self.counter = value;
            true
        } else {
            false
        }
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn state(&self) -> u8 {
        self.state
    }

    pub fn transition_count(&self) -> u8 {
        self.transition_count
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_epoch(&mut self, epoch: u32) {
        self.epoch = epoch;
    }

    /// Edge on either channel. Arms the debounce timer unless one is pending.
    pub fn on_channel_edge_interrupt(&mut self) -> Debounce {
        if !self.enabled || self.pending {
            return Debounce::Ignore;
        }
        self.pending = true;
        Debounce::Arm {
            delay_ms: self.window_ms,
            epoch: self.epoch,
        }
    }

    /// Debounce timer fired with both channels sampled.
    ///
    /// Returns the direction when this sample completed a detent.
    pub fn on_timer_fire(&mut self, a: bool, b: bool, epoch: u32, now_ms: u64) -> Option<Direction> {
        if !self.enabled || !self.pending || epoch != self.epoch {
            return None;
        }
        self.pending = false;

        let state = quadrature_state(a, b);
        self.state = state;

        if now_ms.saturating_sub(self.last_transition_ms) > self.timeout_ms {
            self.transition_count = 0;
            self.partial = Direction::None;
        }

        if state == self.last_state {
            return None;
        }
        self.last_transition_ms = now_ms;

        let mut counted = None;
        match step_direction(self.last_state, state) {
            None => {
                // Skipped a state: nothing trustworthy left in this cycle.
                self.transition_count = 0;
                self.partial = Direction::None;
            }
            Some(step) => {
                if self.transition_count > 0 && step != self.partial {
                    self.transition_count = 0;
                }
                self.partial = step;
                self.transition_count += 1;

                if self.transition_count == TRANSITIONS_PER_DETENT {
                    self.transition_count = 0;
                    self.partial = Direction::None;
                    self.apply(step);
                    counted = Some(step);
                }
            }
        }
        self.last_state = state;
        counted
    }

    fn apply(&mut self, step: Direction) {
        match step {
            Direction::Clockwise => {
                self.counter += 1;
                if self.counter > self.max {
                    self.counter = if self.rollover { self.min } else { self.max };
                }
            }
            Direction::CounterClockwise => {
                self.counter -= 1;
                if self.counter < self.min {
                    self.counter = if self.rollover { self.max } else { self.min };
                }
            }
            Direction::None => return,
        }
        self.direction = step;
    }

    /// Stop reacting to the channels. Idempotent; a timer already in
    /// flight is discarded when it fires.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.pending = false;
        self.epoch = self.epoch.wrapping_add(1);
    }
}
