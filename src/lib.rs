//! Grid Snake - a level-based snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, blinking obstacles, food, tick)
//! - `level`: Level files and the fallback level
//! - `game`: Menu/run state machine driving the simulation
//! - `highscores`: Persisted best score
//! - `settings`: Configuration read once at startup
//! - `audio`: Sound cues
//! - `platform`: Terminal frontend, input mapping and frame pacing

pub mod audio;
pub mod game;
pub mod highscores;
pub mod level;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{Command, Frame, GameController, Screen};
pub use highscores::{FileHighScoreStore, HighScoreRecord, HighScoreStore};
pub use level::{LevelData, LevelLoader};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    use crate::sim::Cell;

    /// Ticks between blinking obstacle flips
    pub const DEFAULT_BLINK_INTERVAL: u32 = 15;
    /// Start cell when a level has no `S` marker
    pub const DEFAULT_START: Cell = Cell::new(1, 1);
    /// Default file locations, relative to the working directory
    pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";
    pub const DEFAULT_LEVELS_DIR: &str = "levels";
    pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";
}
