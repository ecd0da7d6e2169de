//! Fixed-rate frame pacing
//!
//! The limiter is the game clock: one simulation tick per frame interval.
//! A frame that overruns does not trigger catch-up ticks; the next deadline
//! is measured from the late frame instead.

use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            interval: Self::interval_for(ticks_per_second),
            next_deadline: None,
        }
    }

    fn interval_for(ticks_per_second: u32) -> Duration {
        Duration::from_secs(1) / ticks_per_second.max(1)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_rate(&mut self, ticks_per_second: u32) {
        let interval = Self::interval_for(ticks_per_second);
        if interval != self.interval {
            log::debug!("Frame interval {:?} -> {:?}", self.interval, interval);
            self.interval = interval;
        }
    }

    /// How long to sleep at `now` to hit the next deadline; advances the deadline
    pub fn delay(&mut self, now: Instant) -> Duration {
        let deadline = match self.next_deadline {
            Some(deadline) if deadline > now => deadline,
            // First frame or overrun: restart the schedule from now
            _ => now,
        };
        self.next_deadline = Some(deadline + self.interval);
        deadline - now
    }

    /// Block until the next frame is due
    pub fn wait(&mut self) {
        let delay = self.delay(Instant::now());
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}
