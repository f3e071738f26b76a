//! The polling loop and the status tick, bundled.
//!
//! On target one Embassy task calls [`ConcurrencyOrchestrator::poll`] every
//! 100 ms and [`ConcurrencyOrchestrator::status_tick`] every second, so a
//! navigation transition and a status refresh never overlap. Edge handlers
//! and debounce timers run in their own tasks and only reach the encoder
//! hub and the auxiliary queue.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::alarms;
use crate::context::{keys, Context};
use crate::devices::Devices;
use crate::error::Error;
use crate::input::EncoderPort;
use crate::mailbox::{AuxEvent, EventMailbox};
use crate::router::NavigationRouter;
use crate::status::StatusMonitor;
use crate::ui::menus;

pub struct ConcurrencyOrchestrator<'m, M: RawMutex> {
    mailbox: &'m EventMailbox<M>,
    encoder: &'m dyn EncoderPort,
    router: NavigationRouter<'m, M>,
    status: StatusMonitor<'m, M>,
    stopped: bool,
}

impl<'m, M: RawMutex> ConcurrencyOrchestrator<'m, M> {
    pub fn new(mailbox: &'m EventMailbox<M>, encoder: &'m dyn EncoderPort, boot_ms: u64) -> Self {
        Self {
            mailbox,
            encoder,
            router: NavigationRouter::new(mailbox, encoder),
            status: StatusMonitor::new(mailbox, boot_ms),
            stopped: false,
        }
    }

    /// Drop leftover snoozes and bring up `main_menu`.
    pub fn boot(&mut self, devices: &mut Devices<'_>) -> Result<(), Error> {
        match alarms::clear_snoozes(devices.store) {
            Ok(0) => {}
            Ok(n) => info!("cleared {} stale snooze records", n),
            Err(e) => warn!("clearing snoozes failed: {}", e),
        }
        self.router.boot(devices)
    }

    /// One pass of the polling loop: auxiliary events first, then encoder
    /// movement, then at most one confirm transition.
    pub fn poll(&mut self, devices: &mut Devices<'_>) -> Result<(), Error> {
        while !self.stopped {
            let Some(event) = self.mailbox.auxiliary.pop() else {
                break;
            };
            self.handle(devices, event)?;
        }
        if self.stopped {
            return Ok(());
        }

        self.router.poll(devices);
        if self.encoder.take_confirm() {
            self.router.confirm(devices)?;
        }
        Ok(())
    }

    fn handle(&mut self, devices: &mut Devices<'_>, event: AuxEvent) -> Result<(), Error> {
        info!("aux event {}", event);
        match event {
            AuxEvent::AlarmFired => {
                let context =
                    Context::to(menus::ALARM_DISABLE).with_text(keys::HEADER, "Disable Alarm");
                self.router.navigate(devices, context)
            }
            AuxEvent::RadioPower => {
                devices.sounder.set_active(false);
                if let Err(e) = devices.radio.toggle_mute() {
                    warn!("radio mute toggle failed: {}", e);
                }
                let target = if devices.radio.is_muted() {
                    menus::MAIN_MENU
                } else {
                    menus::SET_VOLUME
                };
                self.router.navigate(devices, Context::to(target))
            }
            AuxEvent::Snooze => {
                let context = Context::to(menus::ALARM_SNOOZE).with_flag(keys::SNOOZE, true);
                self.router.navigate(devices, context)
            }
            AuxEvent::Stop => {
                devices.sounder.set_active(false);
                self.router.stop(devices);
                self.stopped = true;
                Ok(())
            }
        }
    }

    /// Jump to the screen named by `context`.
    pub fn navigate(&mut self, devices: &mut Devices<'_>, context: Context) -> Result<(), Error> {
        self.router.navigate(devices, context)
    }

    /// Refresh the report display and evaluate alarms.
    pub fn status_tick(&mut self, devices: &mut Devices<'_>, now_ms: u64) -> Result<(), Error> {
        self.status.tick(devices, now_ms)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn current_screen(&self) -> Option<&'static str> {
        self.router.current_id()
    }

    pub fn router(&self) -> &NavigationRouter<'m, M> {
        &self.router
    }
}
