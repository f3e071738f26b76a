//! Event mailbox - the only data path between input/timer contexts, the
//! polling loop, and consecutive screens.
//!
//! Three independent FIFOs, each behind its own blocking mutex so a
//! producer in one context never observes a half-updated queue in another.
//! Items are always popped before use; nothing peeks.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Deque;

use crate::alarms::AlarmTime;
use crate::config::{AUXILIARY_QUEUE_DEPTH, NAVIGATION_QUEUE_DEPTH, REPORTING_QUEUE_DEPTH};
use crate::context::Context;
use crate::error::Error;

/// Bounded, non-blocking, mutex-guarded FIFO.
pub struct Fifo<M: RawMutex, T, const N: usize> {
    inner: Mutex<M, RefCell<Deque<T, N>>>,
}

impl<M: RawMutex, T, const N: usize> Fifo<M, T, N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Append `item`; fails without blocking when the queue is full.
    pub fn push(&self, item: T) -> Result<(), Error> {
        self.inner
            .lock(|q| q.borrow_mut().push_back(item).map_err(|_| Error::QueueFull))
    }

    /// Remove and return the oldest item.
    pub fn pop(&self) -> Option<T> {
        self.inner.lock(|q| q.borrow_mut().pop_front())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock(|q| q.borrow().is_empty())
    }

    pub fn size(&self) -> usize {
        self.inner.lock(|q| q.borrow().len())
    }

    /// Drop every queued item, returning how many were dropped.
    pub fn clear(&self) -> usize {
        self.inner.lock(|q| {
            let mut q = q.borrow_mut();
            let n = q.len();
            q.clear();
            n
        })
    }
}

impl<M: RawMutex, T, const N: usize> Default for Fifo<M, T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Requests for the polling loop from timers and auxiliary buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuxEvent {
    /// An alarm or snooze matched the current time.
    AlarmFired,
    /// Radio power key pressed.
    RadioPower,
    /// Snooze requested while an alarm rings.
    Snooze,
    /// Stop navigation and silence everything.
    Stop,
}

/// Status messages for the report display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    SnoozeActive(AlarmTime),
    SnoozeDisabled,
    AlarmDisabled,
    AlarmDeleted(u8),
}

pub type NavigationQueue<M> = Fifo<M, Context, NAVIGATION_QUEUE_DEPTH>;
pub type AuxiliaryQueue<M> = Fifo<M, AuxEvent, AUXILIARY_QUEUE_DEPTH>;
pub type ReportingQueue<M> = Fifo<M, Report, REPORTING_QUEUE_DEPTH>;

/// The three queues, constructed once and passed by reference.
pub struct EventMailbox<M: RawMutex> {
    /// Screen-to-screen contexts.
    pub navigation: NavigationQueue<M>,
    /// Timer/button requests for the polling loop.
    pub auxiliary: AuxiliaryQueue<M>,
    /// Acknowledgements for the report display.
    pub reporting: ReportingQueue<M>,
}

impl<M: RawMutex> EventMailbox<M> {
    pub const fn new() -> Self {
        Self {
            navigation: Fifo::new(),
            auxiliary: Fifo::new(),
            reporting: Fifo::new(),
        }
    }
}

impl<M: RawMutex> Default for EventMailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Where screens post status messages.
pub trait ReportSink {
    fn report(&self, report: Report);
}

impl<M: RawMutex> ReportSink for EventMailbox<M> {
    fn report(&self, report: Report) {
        if self.reporting.push(report).is_err() {
            warn!("reporting queue full, dropped {}", report);
        }
    }
}
