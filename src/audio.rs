//! Sound cues
//!
//! The game controller only queues cues. The platform layer hands them to an
//! `AudioManager`, which drops them while muted. On a terminal the only
//! instrument available is the bell.

use std::io::{self, Write};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Snake ate food
    FoodPickup,
    /// Snake collided
    Death,
    /// Food threshold reached
    LevelComplete,
    /// Last level cleared
    Win,
    /// New high score recorded
    HighScore,
}

impl SoundEffect {
    /// Bell rings for this effect
    fn bells(&self) -> usize {
        match self {
            SoundEffect::FoodPickup => 1,
            SoundEffect::Death => 2,
            SoundEffect::LevelComplete => 1,
            SoundEffect::Win | SoundEffect::HighScore => 3,
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    music_enabled: bool,
    muted: bool,
}

impl AudioManager {
    pub fn new(music_enabled: bool) -> Self {
        Self {
            music_enabled,
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        if muted != self.muted {
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether background music should currently be audible
    pub fn music_playing(&self) -> bool {
        self.music_enabled && !self.muted
    }

    /// Play an effect on `out`. Returns whether anything was emitted.
    pub fn play<W: Write>(&self, effect: SoundEffect, out: &mut W) -> io::Result<bool> {
        if self.muted {
            return Ok(false);
        }
        log::debug!("Sound: {:?}", effect);
        for _ in 0..effect.bells() {
            out.write_all(b"\x07")?;
        }
        Ok(true)
    }
}
