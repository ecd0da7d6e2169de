//! Game settings
//!
//! Read once at startup from a JSON file and passed around by reference.
//! Unknown keys are ignored; a missing or unparsable file means defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_BLINK_INTERVAL;

/// Difficulty presets offered on the difficulty-select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Tick rate for this preset given the configured base rate
    pub fn ticks_per_second(&self, base: u32) -> u32 {
        match self {
            Difficulty::Easy => base.saturating_mul(3) / 4,
            Difficulty::Normal => base,
            Difficulty::Hard => base.saturating_mul(3) / 2,
        }
        .max(1)
    }

    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Normal => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Normal,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Pixels per grid cell
    #[serde(alias = "cellSize")]
    pub cell_size: u32,

    // === Pacing ===
    /// Simulation ticks per second at Normal difficulty
    #[serde(alias = "ticksPerSecond", alias = "fps")]
    pub ticks_per_second: u32,

    // === Progression ===
    /// First level index of a run
    #[serde(alias = "startLevel")]
    pub start_level: u32,
    /// Completing this level index wins the run
    #[serde(alias = "levelsToWin")]
    pub levels_to_win: u32,
    /// Food needed to complete a level
    #[serde(alias = "foodPerLevel")]
    pub food_per_level: u32,

    // === Rule variants ===
    /// Multiple lives with respawn; otherwise a single life
    #[serde(alias = "livesEnabled")]
    pub lives_enabled: bool,
    /// Lives per run when `lives_enabled`
    pub lives: u32,
    /// Blinking obstacles toggle; otherwise they are permanent
    #[serde(alias = "hasBlinkingObstacles")]
    pub has_blinking_obstacles: bool,
    /// Ticks between blink flips
    #[serde(alias = "blinkInterval")]
    pub blink_interval: u32,
    /// Offer the difficulty-select screen before a run
    #[serde(alias = "difficultySelect")]
    pub difficulty_select: bool,

    // === Audio ===
    #[serde(alias = "musicEnabled")]
    pub music_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            cell_size: 20,

            ticks_per_second: 6,

            start_level: 1,
            levels_to_win: 3,
            food_per_level: 5,

            lives_enabled: false,
            lives: 3,
            has_blinking_obstacles: true,
            blink_interval: DEFAULT_BLINK_INTERVAL,
            difficulty_select: false,

            music_enabled: true,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Settings file {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace zero values of strictly positive fields with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fields = [
            (&mut self.width, defaults.width),
            (&mut self.height, defaults.height),
            (&mut self.cell_size, defaults.cell_size),
            (&mut self.ticks_per_second, defaults.ticks_per_second),
            (&mut self.start_level, defaults.start_level),
            (&mut self.food_per_level, defaults.food_per_level),
            (&mut self.blink_interval, defaults.blink_interval),
            (&mut self.lives, defaults.lives),
        ];
        for (value, default) in fields {
            if *value == 0 {
                *value = default;
            }
        }
        self
    }

    /// Grid columns of the fallback level
    pub fn grid_columns(&self) -> u32 {
        (self.width / self.cell_size).max(1)
    }

    /// Grid rows of the fallback level
    pub fn grid_rows(&self) -> u32 {
        (self.height / self.cell_size).max(1)
    }

    /// Lives a run starts with
    pub fn starting_lives(&self) -> u32 {
        if self.lives_enabled { self.lives } else { 1 }
    }
}
