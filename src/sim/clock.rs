/// Tick sources: decide when the next simulation step is due.
///
/// The frame loop polls `ready()` once per frame; at most one tick fires per
/// poll, so ticks never overlap and never pile up after a slow frame.

use std::time::{Duration, Instant};

pub trait TickSource {
    /// Is a tick due? Consumes it if so.
    fn ready(&mut self) -> bool;
    /// Stop firing until `start` is called.
    fn stop(&mut self);
    /// Resume firing; the first tick comes one full period later.
    fn start(&mut self);
}

/// Fixed-period wall-clock ticker.
pub struct IntervalTicker {
    period: Duration,
    last_tick: Instant,
    running: bool,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        IntervalTicker { period, last_tick: Instant::now(), running: true }
    }
}

impl TickSource for IntervalTicker {
    fn ready(&mut self) -> bool {
        if !self.running { return false; }
        if self.last_tick.elapsed() >= self.period {
            self.last_tick = Instant::now();
            true
        } else {
            false
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn start(&mut self) {
        self.running = true;
        self.last_tick = Instant::now();
    }
}
