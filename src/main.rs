//! Clock-radio firmware for the nRF52840.
//!
//! Task layout:
//!   - `encoder_channels_task` / `encoder_switch_task`: debounce the rotary
//!     encoder into the shared `EncoderHub`
//!   - `aux_button_task`: radio power key, queues `RadioPower`
//!   - main: owns every bus device and runs the control loop, polling
//!     navigation every 100 ms and refreshing the report panel every second
//!
//! Usage: `cargo run --release --features embedded --target thumbv7em-none-eabihf`

#![no_std]
#![no_main]

mod board;

use core::cell::RefCell;

use board::display::Oled;
use board::flash::FlashStore;
use board::inputs::{self, Hub, Mailbox};
use board::power::{Buzzer, SupplyMonitor};
use board::radio::Rda5807m;
use board::rtc::Ds1307;
use board::{I2cBus, SharedI2c};
use clock_radio::config::{
    NAV_DISPLAY_ADDR, POLL_PERIOD_MS, RADIO_DEFAULT_FREQ, RADIO_DEFAULT_VOLUME, RADIO_POWER_PIN,
    REPORT_DISPLAY_ADDR, STATUS_PERIOD_MS,
};
use clock_radio::devices::Devices;
use clock_radio::input::{AuxButton, Levels};
use clock_radio::mailbox::AuxEvent;
use clock_radio::orchestrator::ConcurrencyOrchestrator;
use defmt::{error, info, unwrap, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_embedded_hal::shared_bus::blocking::i2c::I2cDevice;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc, VddInput};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SAADC => saadc::InterruptHandler;
});

static MAILBOX: StaticCell<Mailbox> = StaticCell::new();
static ENCODER: StaticCell<Hub> = StaticCell::new();
static I2C_BUS: StaticCell<I2cBus> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("clock-radio starting");

    let mailbox: &'static Mailbox = MAILBOX.init(Mailbox::new());
    let hub: &'static Hub = ENCODER.init(Hub::new());

    // Inputs
    let enc_a = Input::new(p.P0_11, Pull::Up);
    let enc_b = Input::new(p.P0_12, Pull::Up);
    let enc_sw = Input::new(p.P0_24, Pull::Up);
    let radio_key = Input::new(p.P0_25, Pull::Up);

    hub.prime(Levels {
        a: enc_a.is_high(),
        b: enc_b.is_high(),
        switch: enc_sw.is_high(),
    });
    let power_button = AuxButton::new(RADIO_POWER_PIN, radio_key.is_high(), AuxEvent::RadioPower);

    unwrap!(spawner.spawn(inputs::encoder_channels_task(enc_a, enc_b, hub)));
    unwrap!(spawner.spawn(inputs::encoder_switch_task(enc_sw, hub)));
    unwrap!(spawner.spawn(inputs::aux_button_task(radio_key, power_button, mailbox)));

    // Shared I²C bus
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let bus: &'static I2cBus = I2C_BUS.init(Mutex::new(RefCell::new(twim)));
    let device = || -> SharedI2c { I2cDevice::new(bus) };

    let mut nav_display = Oled::new(device(), NAV_DISPLAY_ADDR);
    if let Err(e) = nav_display.init() {
        error!("navigation display: {}", e);
    }
    let mut report_display = Oled::new(device(), REPORT_DISPLAY_ADDR);
    if let Err(e) = report_display.init() {
        warn!("report display: {}", e);
    }

    let mut rtc = Ds1307::new(device());
    if let Err(e) = rtc.start() {
        warn!("RTC: {}", e);
    }

    let mut radio = Rda5807m::new(device(), RADIO_DEFAULT_FREQ, RADIO_DEFAULT_VOLUME);
    if let Err(e) = radio.power_up() {
        warn!("tuner: {}", e);
    }

    // Flash, buzzer, supply
    let mut store = FlashStore::new(BlockingAsync::new(Nvmc::new(p.NVMC)));
    let mut buzzer = Buzzer::new(Output::new(p.P0_13, Level::Low, OutputDrive::Standard));

    let adc = Saadc::new(
        p.SAADC,
        Irqs,
        saadc::Config::default(),
        [ChannelConfig::single_ended(VddInput)],
    );
    adc.calibrate().await;
    let mut battery = SupplyMonitor::new(adc);

    let mut devices = Devices {
        display: &mut nav_display,
        report: &mut report_display,
        rtc: &mut rtc,
        radio: &mut radio,
        store: &mut store,
        sounder: &mut buzzer,
        battery: &mut battery,
    };

    let mut orchestrator = ConcurrencyOrchestrator::new(mailbox, hub, inputs::now_ms());
    if let Err(e) = orchestrator.boot(&mut devices) {
        defmt::panic!("boot failed: {}", e);
    }

    // Control loop: navigation and status never overlap.
    let mut poll = Ticker::every(Duration::from_millis(POLL_PERIOD_MS));
    let mut status = Ticker::every(Duration::from_millis(STATUS_PERIOD_MS));
    loop {
        match select(poll.next(), status.next()).await {
            // The router already fell back to main_menu; an error here
            // means even that could not be built.
            Either::First(()) => {
                if let Err(e) = orchestrator.poll(&mut devices) {
                    defmt::panic!("no screen to fall back to: {}", e);
                }
            }
            Either::Second(()) => match orchestrator.status_tick(&mut devices, inputs::now_ms()) {
                Err(e) if e.is_fatal() => defmt::panic!("fatal: {}", e),
                Err(e) => warn!("status tick: {}", e),
                Ok(()) => {}
            },
        }
        if orchestrator.is_stopped() {
            break;
        }
    }

    info!("control loop halted, status panel frozen");
}
