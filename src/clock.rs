//! Host timestamps to simulation timesteps
//!
//! Hosts deliver a monotonic timestamp in milliseconds with every tick. The
//! first tick after a (re)start has nothing to measure against and yields
//! no step at all; after that the gap is clamped so a stalled tab cannot
//! push the simulation through a huge step.

/// Tracks the last tick time and turns new timestamps into clamped `dt`
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
    /// Steps whose raw gap exceeded `max_dt`
    pub clamped_steps: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
            clamped_steps: 0,
        }
    }

    /// Record a tick. Returns `None` for the warm-up tick, otherwise the
    /// elapsed seconds clamped to `[0, max_dt]`.
    pub fn advance(&mut self, timestamp_ms: f64) -> Option<f32> {
        let last = self.last_ms.replace(timestamp_ms)?;

        let raw = ((timestamp_ms - last) / 1000.0) as f32;
        if !raw.is_finite() || raw < 0.0 {
            log::warn!("Clock went backwards ({last} -> {timestamp_ms}), using zero step");
            return Some(0.0);
        }
        if raw > self.max_dt {
            self.clamped_steps += 1;
            log::debug!(
                "Tick gap {:.1}ms capped to {:.1}ms",
                raw * 1000.0,
                self.max_dt * 1000.0
            );
            return Some(self.max_dt);
        }
        Some(raw)
    }

    /// Forget the last timestamp; the next tick is a warm-up again
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    pub fn is_warm(&self) -> bool {
        self.last_ms.is_some()
    }
}
