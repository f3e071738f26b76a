//! Shared home of the active screen's encoder.
//!
//! Edge handlers and debounce timers run in their own contexts while the
//! polling loop reads the counter, so every access goes through one
//! blocking mutex. A screen attaches its [`Encoder`] when it is built and
//! detaches it in `stop()`; while nothing is attached, edges are ignored.
//!
//! Every attach starts a new generation. Debounce timers carry the
//! generation they were armed under, so a timer that fires after its
//! screen was torn down cannot reach the next screen's encoder.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::{Debounce, DebouncedSwitch, Direction, InputEvent, Levels, QuadratureDecoder, Trigger};
use crate::config::{ENCODER_SWITCH_PIN, SWITCH_DEBOUNCE_MS};

/// Decoder plus its integrated push-button.
#[derive(Clone, Debug)]
pub struct Encoder {
    decoder: QuadratureDecoder,
    switch: DebouncedSwitch,
    confirmed: bool,
}

impl Encoder {
    pub fn new(decoder: QuadratureDecoder, switch: DebouncedSwitch) -> Self {
        Self {
            decoder,
            switch,
            confirmed: false,
        }
    }

    /// Encoder over `[min, max]` seeded from the current pin levels.
    pub fn bounded(levels: Levels, min: i32, max: i32, rollover: bool, trigger: Trigger) -> Self {
        Self::new(
            QuadratureDecoder::new(levels.quadrature(), min, max, rollover),
            DebouncedSwitch::new(ENCODER_SWITCH_PIN, levels.switch, SWITCH_DEBOUNCE_MS, trigger),
        )
    }

    pub fn decoder(&self) -> &QuadratureDecoder {
        &self.decoder
    }

    pub fn switch(&self) -> &DebouncedSwitch {
        &self.switch
    }

    fn set_epoch(&mut self, epoch: u32) {
        self.decoder.set_epoch(epoch);
        self.switch.set_epoch(epoch);
    }

    /// Route one input event to the decoder or the switch.
    pub fn handle(&mut self, event: InputEvent, now_ms: u64) -> Debounce {
        match event {
            InputEvent::ChannelEdge => self.decoder.on_channel_edge_interrupt(),
            InputEvent::ChannelSettled { a, b, epoch } => {
                self.decoder.on_timer_fire(a, b, epoch, now_ms);
                Debounce::Ignore
            }
            InputEvent::SwitchEdge => self.switch.on_edge_interrupt(),
            InputEvent::SwitchSettled { level, epoch } => {
                if self.switch.on_timer_fire(level, epoch, now_ms).is_some() {
                    self.confirmed = true;
                }
                Debounce::Ignore
            }
        }
    }

    /// Consume the latched confirm edge.
    pub fn take_confirm(&mut self) -> bool {
        core::mem::take(&mut self.confirmed)
    }

    pub fn disable(&mut self) {
        self.decoder.disable();
        self.switch.disable();
        self.confirmed = false;
    }
}

struct Slot {
    encoder: Option<Encoder>,
    levels: Levels,
    generation: u32,
}

/// Mutex-guarded slot holding the encoder of the active screen.
pub struct EncoderHub<M: RawMutex> {
    inner: Mutex<M, RefCell<Slot>>,
}

impl<M: RawMutex> EncoderHub<M> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Slot {
                encoder: None,
                levels: Levels::IDLE,
                generation: 0,
            })),
        }
    }

    /// Record pin levels sampled outside the debounce path (at boot).
    pub fn prime(&self, levels: Levels) {
        self.inner.lock(|slot| slot.borrow_mut().levels = levels);
    }

    /// Last known pin levels.
    pub fn levels(&self) -> Levels {
        self.inner.lock(|slot| slot.borrow().levels)
    }

    /// Install `encoder` as the active one under a new generation.
    pub fn attach(&self, mut encoder: Encoder) {
        self.inner.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some(old) = slot.encoder.as_mut() {
                warn!("encoder attached over a live one, detaching it first");
                old.disable();
            }
            slot.generation = slot.generation.wrapping_add(1);
            encoder.set_epoch(slot.generation);
            slot.encoder = Some(encoder);
        });
    }

    /// Disable and drop the active encoder. Returns `false` if none was attached.
    pub fn detach(&self) -> bool {
        self.inner.lock(|slot| match slot.borrow_mut().encoder.take() {
            Some(mut encoder) => {
                encoder.disable();
                true
            }
            None => false,
        })
    }

    pub fn is_attached(&self) -> bool {
        self.inner.lock(|slot| slot.borrow().encoder.is_some())
    }

    /// Feed one event from an edge handler or a debounce timer.
    pub fn dispatch(&self, event: InputEvent, now_ms: u64) -> Debounce {
        self.inner.lock(|slot| {
            let mut slot = slot.borrow_mut();
            match event {
                InputEvent::ChannelSettled { a, b, .. } => {
                    slot.levels.a = a;
                    slot.levels.b = b;
                }
                InputEvent::SwitchSettled { level, .. } => slot.levels.switch = level,
                _ => {}
            }
            match slot.encoder.as_mut() {
                Some(encoder) => encoder.handle(event, now_ms),
                None => Debounce::Ignore,
            }
        })
    }

    /// Counter of the active encoder.
    pub fn counter(&self) -> Option<(i32, Direction)> {
        self.inner
            .lock(|slot| slot.borrow().encoder.as_ref().map(|e| e.decoder.get_counter()))
    }

    pub fn set_counter(&self, value: i32) -> bool {
        self.inner.lock(|slot| {
            slot.borrow_mut()
                .encoder
                .as_mut()
                .is_some_and(|e| e.decoder.set_counter(value))
        })
    }

    pub fn reset_counter(&self) {
        self.inner.lock(|slot| {
            if let Some(e) = slot.borrow_mut().encoder.as_mut() {
                e.decoder.reset_counter();
            }
        });
    }

    /// Consume a pending confirm edge of the active encoder.
    pub fn take_confirm(&self) -> bool {
        self.inner.lock(|slot| {
            slot.borrow_mut()
                .encoder
                .as_mut()
                .is_some_and(|e| e.take_confirm())
        })
    }
}

impl<M: RawMutex> Default for EncoderHub<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen-side view of the encoder slot.
pub trait EncoderPort {
    fn attach(&self, encoder: Encoder);
    fn detach(&self) -> bool;
    fn levels(&self) -> Levels;
    fn counter(&self) -> Option<(i32, Direction)>;
    fn set_counter(&self, value: i32) -> bool;
    fn reset_counter(&self);
    fn take_confirm(&self) -> bool;
}

impl<M: RawMutex> EncoderPort for EncoderHub<M> {
    fn attach(&self, encoder: Encoder) {
        EncoderHub::attach(self, encoder)
    }

    fn detach(&self) -> bool {
        EncoderHub::detach(self)
    }

    fn levels(&self) -> Levels {
        EncoderHub::levels(self)
    }

    fn counter(&self) -> Option<(i32, Direction)> {
        EncoderHub::counter(self)
    }

    fn set_counter(&self, value: i32) -> bool {
        EncoderHub::set_counter(self, value)
    }

    fn reset_counter(&self) {
        EncoderHub::reset_counter(self)
    }

    fn take_confirm(&self) -> bool {
        EncoderHub::take_confirm(self)
    }
}
