//! Navigation state machine.
//!
//! States are the screen ids of [`menus::SCREENS`]. A transition runs the
//! active screen's `confirm`, parks the resulting context in the
//! navigation queue, stops the old screen and builds the new one from the
//! popped context. `main_menu` is both the initial state and the fallback
//! when a screen cannot be built.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::context::Context;
use crate::devices::Devices;
use crate::error::Error;
use crate::input::EncoderPort;
use crate::mailbox::EventMailbox;
use crate::ui::{menus, paint, Env, Screen};

pub struct NavigationRouter<'m, M: RawMutex> {
    mailbox: &'m EventMailbox<M>,
    encoder: &'m dyn EncoderPort,
    screen: Option<Screen>,
    current: Option<&'static str>,
}

impl<'m, M: RawMutex> NavigationRouter<'m, M> {
    pub fn new(mailbox: &'m EventMailbox<M>, encoder: &'m dyn EncoderPort) -> Self {
        Self {
            mailbox,
            encoder,
            screen: None,
            current: None,
        }
    }

    /// Build `main_menu`. Failure here is fatal: without a working panel
    /// and encoder there is no UI to fall back to.
    pub fn boot(&mut self, devices: &mut Devices<'_>) -> Result<(), Error> {
        let (encoder, reports) = (self.encoder, self.mailbox);
        let mut env = Env {
            devices,
            encoder,
            reports,
        };
        match (menus::MAIN_MENU_BUILDER)(&mut env, Context::default()) {
            Ok(screen) => {
                info!("boot: {}", menus::MAIN_MENU);
                self.screen = Some(screen);
                self.current = Some(menus::MAIN_MENU);
                Ok(())
            }
            Err(e) => {
                error!("boot: building {} failed: {}", menus::MAIN_MENU, e);
                Err(e)
            }
        }
    }

    /// Id of the active screen, `None` before boot or after `stop`.
    pub fn current_id(&self) -> Option<&'static str> {
        self.current
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    /// Pick up encoder movement and repaint on change.
    pub fn poll(&mut self, devices: &mut Devices<'_>) -> bool {
        let (encoder, reports) = (self.encoder, self.mailbox);
        let Some(screen) = self.screen.as_mut() else {
            return false;
        };
        let mut env = Env {
            devices,
            encoder,
            reports,
        };
        if !screen.poll(&mut env) {
            return false;
        }
        if let Err(e) = paint(&mut env, &screen.render()) {
            warn!("repaint of {} failed: {}", screen.header(), e);
        }
        true
    }

    /// The active screen's button fired: run its action and move on.
    pub fn confirm(&mut self, devices: &mut Devices<'_>) -> Result<(), Error> {
        let (encoder, reports) = (self.encoder, self.mailbox);
        let Some(screen) = self.screen.as_mut() else {
            return Ok(());
        };
        let context = {
            let mut env = Env {
                devices: &mut *devices,
                encoder,
                reports,
            };
            screen.confirm(&mut env)
        };
        self.navigate(devices, context)
    }

    /// Transition to `context.router.next_screen_id`.
    ///
    /// An unknown id leaves the current screen untouched. A builder error
    /// falls back to `main_menu`; only a failing `main_menu` is returned.
    pub fn navigate(&mut self, devices: &mut Devices<'_>, context: Context) -> Result<(), Error> {
        let target = context.next_screen_id().unwrap_or("<none>");
        let (id, build) = match menus::resolve(target) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("{} {}, staying on {}", e, target, self.current.unwrap_or("<none>"));
                return Ok(());
            }
        };

        let stale = self.mailbox.navigation.clear();
        if stale > 0 {
            warn!("dropped {} stale navigation contexts", stale);
        }
        if let Err(e) = self.mailbox.navigation.push(context) {
            warn!("navigation queue: {}", e);
        }

        let (encoder, reports) = (self.encoder, self.mailbox);
        let mut env = Env {
            devices,
            encoder,
            reports,
        };

        if let Some(mut old) = self.screen.take() {
            old.stop(&mut env);
        }
        self.current = None;

        let incoming = self.mailbox.navigation.pop().unwrap_or_default();
        let screen = match build(&mut env, incoming) {
            Ok(screen) => {
                debug!("now on {}", id);
                self.current = Some(id);
                screen
            }
            Err(e) => {
                error!("building {} failed: {}, back to {}", id, e, menus::MAIN_MENU);
                let screen = (menus::MAIN_MENU_BUILDER)(&mut env, Context::default()).inspect_err(|e| {
                    error!("building {} failed: {}", menus::MAIN_MENU, e);
                })?;
                self.current = Some(menus::MAIN_MENU);
                screen
            }
        };
        self.screen = Some(screen);
        Ok(())
    }

    /// Tear down the active screen without building another.
    pub fn stop(&mut self, devices: &mut Devices<'_>) {
        if let Some(mut screen) = self.screen.take() {
            let mut env = Env {
                devices,
                encoder: self.encoder,
                reports: self.mailbox,
            };
            screen.stop(&mut env);
            if let Err(e) = env.devices.display.flush() {
                warn!("display flush failed on stop: {}", e);
            }
            info!("navigation stopped");
        }
        self.current = None;
    }
}
