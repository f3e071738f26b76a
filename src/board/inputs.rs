//! GPIO input tasks.
//!
//! Inputs (active-low with internal pull-up):
//!   - Encoder A/B   - quadrature channels of the rotary encoder
//!   - Encoder SW    - confirm, routed to the active screen's encoder
//!   - Radio power   - auxiliary key, queues `RadioPower`
//!
//! Each task waits for a GPIO edge, asks the library whether to debounce,
//! sleeps for the returned window, samples the pin once and reports the
//! settled level. All decoding happens in the library.

use clock_radio::input::{AuxButton, Debounce, EncoderHub, InputEvent};
use clock_radio::mailbox::EventMailbox;
use defmt::trace;
use embassy_futures::select::select;
use embassy_nrf::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Instant, Timer};

pub type Hub = EncoderHub<CriticalSectionRawMutex>;
pub type Mailbox = EventMailbox<CriticalSectionRawMutex>;

pub fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Encoder A/B channels.
#[embassy_executor::task]
pub async fn encoder_channels_task(
    mut a: Input<'static>,
    mut b: Input<'static>,
    hub: &'static Hub,
) -> ! {
    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        if let Debounce::Arm { delay_ms, epoch } = hub.dispatch(InputEvent::ChannelEdge, now_ms()) {
            Timer::after(Duration::from_millis(delay_ms)).await;
            let settled = InputEvent::ChannelSettled {
                a: a.is_high(),
                b: b.is_high(),
                epoch,
            };
            trace!("channels settled: {}", settled);
            hub.dispatch(settled, now_ms());
        }
    }
}

/// Encoder push-button.
#[embassy_executor::task]
pub async fn encoder_switch_task(mut sw: Input<'static>, hub: &'static Hub) -> ! {
    loop {
        sw.wait_for_any_edge().await;

        if let Debounce::Arm { delay_ms, epoch } = hub.dispatch(InputEvent::SwitchEdge, now_ms()) {
            Timer::after(Duration::from_millis(delay_ms)).await;
            let settled = InputEvent::SwitchSettled {
                level: sw.is_high(),
                epoch,
            };
            hub.dispatch(settled, now_ms());
        }
    }
}

/// A stand-alone key that queues an auxiliary event.
#[embassy_executor::task]
pub async fn aux_button_task(
    mut pin: Input<'static>,
    mut button: AuxButton,
    mailbox: &'static Mailbox,
) -> ! {
    loop {
        pin.wait_for_any_edge().await;

        if let Debounce::Arm { delay_ms, epoch } = button.on_edge_interrupt() {
            Timer::after(Duration::from_millis(delay_ms)).await;
            button.on_timer_fire(pin.is_high(), epoch, now_ms(), &mailbox.auxiliary);
        }
    }
}
