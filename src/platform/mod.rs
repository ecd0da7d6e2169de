//! Platform layer
//!
//! Everything outside the deterministic core:
//! - Input polling and key mapping
//! - Drawing frames
//! - Frame pacing (the game clock)
//! - Playing sound cues

pub mod limiter;
pub mod terminal;

use std::io;

use crate::audio::AudioManager;
use crate::game::{GameController, Screen};
use crate::highscores::HighScoreStore;

pub use limiter::FrameLimiter;
pub use terminal::{TerminalFrontend, map_key};

/// Run the game in the terminal until the player quits.
///
/// Per frame: poll input, tick once, play cues, draw, wait for the next
/// frame. Quit is honored as soon as it is polled.
pub fn run<S: HighScoreStore>(
    controller: &mut GameController<S>,
    audio: &mut AudioManager,
) -> io::Result<()> {
    let mut term = TerminalFrontend::enter()?;
    let mut limiter = FrameLimiter::new(controller.ticks_per_second());

    loop {
        let text_entry = matches!(controller.screen(), Screen::NameEntry { .. });
        for command in term.poll_commands(text_entry)? {
            controller.handle(command);
            if controller.quit_requested() {
                return Ok(());
            }
        }

        controller.update();

        audio.set_muted(controller.muted());
        for effect in controller.drain_sounds() {
            audio.play(effect, term.out())?;
        }

        term.draw(&controller.frame(), audio.music_playing())?;

        limiter.set_rate(controller.ticks_per_second());
        limiter.wait();
    }
}
