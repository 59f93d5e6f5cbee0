//! Platform abstraction layer
//!
//! The simulation is driven by host ticks (vsync / animation frames). This
//! module defines the "request next tick" seam plus a manual scheduler for
//! headless runs and tests. The browser backend lives in `web`.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Handle for one pending tick request. Ids are never reused by a
/// scheduler, so a handle from a torn-down session can't match a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickRequest(pub u64);

/// Delivers ticks to the game, one per request
pub trait Scheduler {
    /// Ask for the step function to be invoked once more
    fn request_tick(&mut self) -> TickRequest;

    /// Drop a pending request; it must never be delivered afterwards
    fn cancel(&mut self, request: TickRequest);
}

impl<S: Scheduler> Scheduler for Rc<RefCell<S>> {
    fn request_tick(&mut self) -> TickRequest {
        self.borrow_mut().request_tick()
    }

    fn cancel(&mut self, request: TickRequest) {
        self.borrow_mut().cancel(request);
    }
}

/// Scheduler the host pumps by hand
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<TickRequest>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests waiting to be delivered, oldest first
    pub fn pending(&self) -> &[TickRequest] {
        &self.pending
    }

    /// Remove and return everything waiting, for the host to deliver
    pub fn take_pending(&mut self) -> Vec<TickRequest> {
        std::mem::take(&mut self.pending)
    }
}

impl Scheduler for ManualScheduler {
    fn request_tick(&mut self) -> TickRequest {
        self.next_id += 1;
        let request = TickRequest(self.next_id);
        self.pending.push(request);
        request
    }

    fn cancel(&mut self, request: TickRequest) {
        self.pending.retain(|r| *r != request);
    }
}
