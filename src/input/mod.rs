//! Input subsystem - rotary encoder and push-buttons.
//!
//! Edge handlers never touch decoder state directly. They report an
//! [`InputEvent`] and get back a [`Debounce`] decision telling them whether
//! to arm a one-shot timer. When that timer fires the freshly sampled pin
//! levels are reported as a second event, and that is where state changes.
//!
//! ## Components
//!
//! - **DebouncedSwitch**: single contact, press/release edges
//! - **QuadratureDecoder**: A/B channels into a bounded counter
//! - **EncoderHub**: mutex-guarded home of the active screen's encoder
//! - **AuxButton**: a debounced key that queues an auxiliary event

pub mod button;
pub mod hub;
pub mod quadrature;
pub mod switch;

pub use button::AuxButton;
pub use hub::{Encoder, EncoderHub, EncoderPort};
pub use quadrature::QuadratureDecoder;
pub use switch::DebouncedSwitch;

/// Rotation direction of the last counted cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    None,
    Clockwise,
    CounterClockwise,
}

/// A settled switch transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchEdge {
    Press,
    Release,
}

/// Which settled edge invokes the switch callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    OnPress,
    OnRelease,
}

impl Trigger {
    pub fn matches(self, edge: SwitchEdge) -> bool {
        matches!(
            (self, edge),
            (Trigger::OnPress, SwitchEdge::Press) | (Trigger::OnRelease, SwitchEdge::Release)
        )
    }
}

/// Raw pin levels of the encoder (`true` = high).
///
/// All inputs use pull-ups, so an idle switch reads high.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Levels {
    pub a: bool,
    pub b: bool,
    pub switch: bool,
}

impl Levels {
    pub const IDLE: Levels = Levels {
        a: false,
        b: false,
        switch: true,
    };

    /// Quadrature state `a * 2 + b`.
    pub fn quadrature(&self) -> u8 {
        quadrature_state(self.a, self.b)
    }
}

impl Default for Levels {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Combine the two channel levels into a state in `0..=3`.
pub fn quadrature_state(a: bool, b: bool) -> u8 {
    (a as u8) * 2 + b as u8
}

/// Events delivered by edge handlers and debounce timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Any edge on encoder channel A or B.
    ChannelEdge,
    /// Encoder debounce timer fired; channels sampled.
    ChannelSettled { a: bool, b: bool, epoch: u32 },
    /// Any edge on the encoder switch.
    SwitchEdge,
    /// Switch debounce timer fired; level sampled.
    SwitchSettled { level: bool, epoch: u32 },
}

/// What an edge handler has to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Debounce {
    /// A timer is already pending, or the input is detached.
    Ignore,
    /// Arm a one-shot timer and report the sampled level with `epoch`.
    Arm { delay_ms: u64, epoch: u32 },
}
