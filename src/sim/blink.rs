//! Blinking obstacle clock
//!
//! One flag drives both collision and visibility of blinking cells. The tick
//! stores the value it used, and frames report that same stored value.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_BLINK_INTERVAL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkClock {
    /// Ticks between flips
    interval: u32,
    /// Ticks elapsed since the level (re)started
    counter: u64,
    hazard_active: bool,
    /// Frozen clocks never flip (level variant without animated obstacles)
    frozen: bool,
}

impl Default for BlinkClock {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_INTERVAL)
    }
}

impl BlinkClock {
    /// A clock that starts hazard-active and flips every `interval` ticks
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            counter: 0,
            hazard_active: true,
            frozen: false,
        }
    }

    /// A clock that stays hazard-active forever
    pub fn frozen() -> Self {
        Self {
            frozen: true,
            ..Self::new(DEFAULT_BLINK_INTERVAL)
        }
    }

    pub fn tick(&mut self) {
        self.counter += 1;
        if !self.frozen && self.counter % u64::from(self.interval) == 0 {
            self.hazard_active = !self.hazard_active;
        }
    }

    pub fn is_hazard_active(&self) -> bool {
        self.hazard_active
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flips_every_interval() {
        let mut clock = BlinkClock::new(3);
        assert!(clock.is_hazard_active());
        clock.tick();
        clock.tick();
        assert!(clock.is_hazard_active());
        clock.tick();
        assert!(!clock.is_hazard_active());
        for _ in 0..3 {
            clock.tick();
        }
        assert!(clock.is_hazard_active());
    }

    #[test]
    fn test_frozen_never_flips() {
        let mut clock = BlinkClock::frozen();
        for _ in 0..100 {
            clock.tick();
            assert!(clock.is_hazard_active());
        }
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut clock = BlinkClock::new(0);
        clock.tick();
        assert!(!clock.is_hazard_active());
    }
}
