//! Terminal frontend
//!
//! Draws frames with crossterm and turns key presses into commands. Each grid
//! cell is two terminal columns wide so the board looks roughly square.

use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::game::{Command, Frame, LevelView, Screen};
use crate::sim::{Cell, DeathCause, Direction};

/// Map a key press to a command.
///
/// On the name-entry screen printable keys are text; elsewhere `m` mutes and
/// `q` quits. Escape and Ctrl-C always quit.
pub fn map_key(key: KeyEvent, text_entry: bool) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Up => Some(Command::Steer(Direction::Up)),
        KeyCode::Down => Some(Command::Steer(Direction::Down)),
        KeyCode::Left => Some(Command::Steer(Direction::Left)),
        KeyCode::Right => Some(Command::Steer(Direction::Right)),
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Backspace if text_entry => Some(Command::Backspace),
        KeyCode::Char(c) if text_entry => Some(Command::Text(c)),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMute),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Raw-mode terminal session; restores the terminal on drop
pub struct TerminalFrontend {
    out: Stdout,
}

impl TerminalFrontend {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self { out })
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }

    /// Drain every pending key event without blocking
    pub fn poll_commands(&mut self, text_entry: bool) -> io::Result<Vec<Command>> {
        let mut commands = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()?
                && let Some(command) = map_key(key, text_entry)
            {
                commands.push(command);
            }
        }
        Ok(commands)
    }

    pub fn draw(&mut self, frame: &Frame<'_>, music_playing: bool) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;

        match frame.screen {
            Screen::Playing => {
                if let Some(level) = &frame.level {
                    self.draw_level(level)?;
                    let hud_row = term_row(level.data.height).saturating_add(1);
                    self.draw_hud(frame, hud_row, music_playing)?;
                }
            }
            screen => {
                let lines = screen_lines(screen, frame);
                for (row, line) in lines.iter().enumerate() {
                    queue!(self.out, MoveTo(2, term_row(row).saturating_add(1)), Print(line))?;
                }
            }
        }

        self.out.flush()
    }

    fn draw_level(&mut self, level: &LevelView<'_>) -> io::Result<()> {
        let head = level.snake.head();
        for row in 0..level.data.height as i32 {
            queue!(self.out, MoveTo(0, term_row(row)))?;
            for col in 0..level.data.width as i32 {
                let cell = Cell::new(col, row);
                let glyph = if cell == head {
                    "@@".yellow()
                } else if level.snake.contains(cell) {
                    "[]".green()
                } else if cell == level.food {
                    "<>".red()
                } else if level.data.obstacles.contains(&cell) {
                    "##".grey()
                } else if level.blinking_visible && level.data.blinking.contains(&cell) {
                    "**".magenta()
                } else {
                    "  ".stylize()
                };
                queue!(self.out, PrintStyledContent(glyph))?;
            }
        }
        Ok(())
    }

    fn draw_hud(&mut self, frame: &Frame<'_>, row: u16, music_playing: bool) -> io::Result<()> {
        let mut hud = format!(
            "Score: {}  Level: {}",
            frame.run.score, frame.run.level_index
        );
        if let Some(level) = &frame.level {
            hud.push_str(&format!("  Food: {}/{}", level.food_eaten, level.food_per_level));
        }
        if frame.lives_enabled {
            hud.push_str(&format!("  Lives: {}", frame.run.lives));
        }
        if frame.muted {
            hud.push_str("  [muted]");
        } else if music_playing {
            hud.push_str("  [music]");
        }
        queue!(
            self.out,
            MoveTo(0, row),
            Print(hud),
            MoveTo(0, row + 1),
            Print("Arrows: move  M: mute  Q/Esc: quit")
        )
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Terminal row for a grid or text row; clamps instead of wrapping
fn term_row<T: TryInto<u16>>(row: T) -> u16 {
    row.try_into().unwrap_or(u16::MAX)
}

fn death_text(cause: DeathCause) -> &'static str {
    match cause {
        DeathCause::SelfCollision => "You bit yourself",
        DeathCause::OutOfBounds => "You left the arena",
        DeathCause::Obstacle => "You hit a wall",
        DeathCause::BlinkingObstacle => "You hit a blinking wall",
    }
}

/// Text for every non-playing screen
fn screen_lines(screen: &Screen, frame: &Frame<'_>) -> Vec<String> {
    let high = format!("High Score: {} - {}", frame.high_score.name, frame.high_score.score);
    match screen {
        Screen::Menu => vec![
            "SNAKE GAME".to_string(),
            String::new(),
            "Press ENTER to Start".to_string(),
            String::new(),
            high,
        ],
        Screen::DifficultySelect { selected } => {
            let mut lines = vec!["SELECT DIFFICULTY".to_string(), String::new()];
            for difficulty in crate::settings::Difficulty::ALL {
                let marker = if difficulty == *selected { ">" } else { " " };
                lines.push(format!("{} {}", marker, difficulty.as_str()));
            }
            lines.push(String::new());
            lines.push("Up/Down to choose, ENTER to start".to_string());
            lines
        }
        Screen::NameEntry { name, .. } => vec![
            "NEW HIGH SCORE!".to_string(),
            String::new(),
            "Enter your name:".to_string(),
            format!("{}_", name),
        ],
        Screen::GameOver => {
            let mut lines = vec!["GAME OVER".to_string(), String::new()];
            if let Some(cause) = frame.last_death {
                lines.push(death_text(cause).to_string());
            }
            lines.push(format!("Your Score: {}", frame.run.score));
            lines.push(high);
            lines.push(String::new());
            lines.push("Press ENTER to Return to Menu".to_string());
            lines
        }
        Screen::Win => vec![
            "YOU WIN!".to_string(),
            String::new(),
            format!("Your Score: {}", frame.run.score),
            high,
            String::new(),
            "Press ENTER to return to menu".to_string(),
        ],
        Screen::Playing => Vec::new(),
    }
}
