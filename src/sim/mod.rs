//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall clock
//! - Randomness only through the RNG passed in
//! - Grid cells only, no pixel coordinates
//! - No rendering or platform dependencies

pub mod blink;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;

pub use blink::BlinkClock;
pub use grid::{Cell, Direction};
pub use snake::Snake;
pub use state::{DeathCause, LevelPhase, LevelState, Rules};
pub use tick::{TickOutcome, check_collision, tick};
