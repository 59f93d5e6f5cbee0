//! Browser tick source backed by `requestAnimationFrame`

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{Scheduler, TickRequest};

/// Callback receiving delivered ticks with their frame timestamp (ms)
pub type TickSink = Rc<RefCell<Option<Box<dyn FnMut(TickRequest, f64)>>>>;

/// Schedules ticks on animation frames. At most one frame is outstanding.
pub struct RafScheduler {
    window: web_sys::Window,
    sink: TickSink,
    next_id: u64,
    outstanding: Option<(TickRequest, i32)>,
}

impl RafScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            sink: Rc::new(RefCell::new(None)),
            next_id: 0,
            outstanding: None,
        }
    }

    /// Shared slot the owner fills with the tick handler once it exists
    pub fn sink(&self) -> TickSink {
        self.sink.clone()
    }
}

impl Scheduler for RafScheduler {
    fn request_tick(&mut self) -> TickRequest {
        self.next_id += 1;
        let request = TickRequest(self.next_id);
        let sink = self.sink.clone();
        let callback = Closure::once_into_js(move |timestamp: f64| {
            if let Some(handler) = sink.borrow_mut().as_mut() {
                handler(request, timestamp);
            }
        });

        match self
            .window
            .request_animation_frame(callback.unchecked_ref())
        {
            Ok(handle) => self.outstanding = Some((request, handle)),
            Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
        }
        request
    }

    fn cancel(&mut self, request: TickRequest) {
        if let Some((pending, handle)) = self.outstanding {
            if pending == request {
                let _ = self.window.cancel_animation_frame(handle);
                self.outstanding = None;
            }
        }
    }
}
