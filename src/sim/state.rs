//! Per-level simulation state
//!
//! Everything that is reset on level entry and on respawn lives here. Run
//! totals (score, lives, level index) belong to the game controller.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::blink::BlinkClock;
use super::food;
use super::grid::{Cell, Direction};
use super::snake::Snake;
use crate::level::LevelData;
use crate::settings::Settings;

/// Why the snake died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    SelfCollision,
    OutOfBounds,
    Obstacle,
    BlinkingObstacle,
}

/// Phase of the level in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    Running,
    Died(DeathCause),
    LevelComplete,
}

/// Rule parameters shared by every level of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Food needed to complete a level
    pub food_per_level: u32,
    /// Ticks between blink flips
    pub blink_interval: u32,
    /// When false, blinking cells stay hazardous permanently
    pub blinking_enabled: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Rules {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            food_per_level: settings.food_per_level,
            blink_interval: settings.blink_interval,
            blinking_enabled: settings.has_blinking_obstacles,
        }
    }

    pub fn blink_clock(&self) -> BlinkClock {
        if self.blinking_enabled {
            BlinkClock::new(self.blink_interval)
        } else {
            BlinkClock::frozen()
        }
    }
}

/// Mutable state of the level being played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelState {
    pub snake: Snake,
    /// Direction used by the last tick
    pub direction: Direction,
    /// Accepted direction change, applied at the start of the next tick
    pub pending_direction: Option<Direction>,
    pub food: Cell,
    pub food_eaten: u32,
    pub blink: BlinkClock,
    /// Hazard flag sampled by the last tick; used for collision and drawing
    pub hazard_active: bool,
    pub phase: LevelPhase,
    pub time_ticks: u64,
}

impl LevelState {
    /// Fresh state for entering (or respawning into) `level`
    pub fn new<R: Rng>(level: &LevelData, rules: &Rules, rng: &mut R) -> Self {
        let snake = Snake::new(level.start);
        let food = food::place(&snake, level, rng);
        let blink = rules.blink_clock();
        let hazard_active = blink.is_hazard_active();

        Self {
            snake,
            direction: Direction::default(),
            pending_direction: None,
            food,
            food_eaten: 0,
            blink,
            hazard_active,
            phase: LevelPhase::Running,
            time_ticks: 0,
        }
    }

    /// Request a direction change. Reversals of the current travel
    /// direction are ignored; returns whether the request was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn is_running(&self) -> bool {
        self.phase == LevelPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_state_starts_at_level_start() {
        let level = LevelData::parse("....\n.S..\n....\n").unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let state = LevelState::new(&level, &Rules::default(), &mut rng);

        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Cell::new(1, 1));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.food_eaten, 0);
        assert!(state.hazard_active);
        assert!(state.is_running());
        assert_ne!(state.food, level.start);
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let level = LevelData::empty(10, 10);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = LevelState::new(&level, &Rules::default(), &mut rng);

        assert!(!state.steer(Direction::Left));
        assert_eq!(state.pending_direction, None);
        assert!(state.steer(Direction::Up));
        assert!(state.steer(Direction::Right));
        assert_eq!(state.pending_direction, Some(Direction::Right));
    }

    #[test]
    fn test_disabled_blinking_freezes_clock() {
        let rules = Rules {
            blinking_enabled: false,
            ..Rules::default()
        };
        let mut clock = rules.blink_clock();
        for _ in 0..(rules.blink_interval * 3) {
            clock.tick();
        }
        assert!(clock.is_hazard_active());
    }
}
