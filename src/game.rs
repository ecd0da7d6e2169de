//! Game controller
//!
//! Top-level state machine around the simulation:
//!
//! ```text
//! Menu -> [DifficultySelect] -> Playing(level) --died, lives left--> Playing(level)
//!                                    |  \--level complete--> Playing(level + 1)
//!                                    |   \--last level complete--> [NameEntry] -> Win
//!                                    \--died, no lives--> [NameEntry] -> GameOver
//! GameOver | Win --confirm--> Menu
//! ```
//!
//! The controller never draws or plays sound. Each frame the platform feeds
//! in commands, calls `update` once, drains sound cues and draws `frame()`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::SoundEffect;
use crate::highscores::{HighScoreRecord, HighScoreStore, MAX_NAME_LEN};
use crate::level::{LevelData, LevelLoader};
use crate::settings::{Difficulty, Settings};
use crate::sim::{self, Cell, DeathCause, Direction, LevelState, Rules, Snake, TickOutcome};

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    ToggleMute,
    Quit,
    Confirm,
    /// Character typed on the name-entry screen
    Text(char),
    Backspace,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    GameOver,
    Win,
}

impl RunOutcome {
    fn screen(self) -> Screen {
        match self {
            RunOutcome::GameOver => Screen::GameOver,
            RunOutcome::Win => Screen::Win,
        }
    }
}

/// Current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    DifficultySelect { selected: Difficulty },
    Playing,
    /// New high score; typing a name before the outcome screen
    NameEntry { name: String, outcome: RunOutcome },
    GameOver,
    Win,
}

/// Totals carried across levels and respawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    pub level_index: u32,
    pub score: u64,
    pub lives: u32,
    pub difficulty: Difficulty,
}

/// The level being played and its mutable state
#[derive(Debug, Clone)]
struct ActiveLevel {
    data: LevelData,
    state: LevelState,
}

/// What the renderer needs for the level in progress
#[derive(Debug, Clone, Copy)]
pub struct LevelView<'a> {
    pub data: &'a LevelData,
    pub snake: &'a Snake,
    pub food: Cell,
    /// Hazard flag of the last tick; blinking cells are drawn only when set
    pub blinking_visible: bool,
    pub food_eaten: u32,
    pub food_per_level: u32,
}

/// Per-frame snapshot for drawing
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub screen: &'a Screen,
    /// Present only while playing
    pub level: Option<LevelView<'a>>,
    pub run: &'a RunState,
    pub lives_enabled: bool,
    pub high_score: &'a HighScoreRecord,
    pub last_death: Option<DeathCause>,
    pub muted: bool,
}

pub struct GameController<S: HighScoreStore> {
    settings: Settings,
    rules: Rules,
    loader: LevelLoader,
    store: S,
    rng: Pcg32,
    screen: Screen,
    run: RunState,
    level: Option<ActiveLevel>,
    high_score: HighScoreRecord,
    last_death: Option<DeathCause>,
    muted: bool,
    quit: bool,
    sounds: Vec<SoundEffect>,
}

impl<S: HighScoreStore> GameController<S> {
    pub fn new(settings: Settings, loader: LevelLoader, store: S, seed: u64) -> Self {
        let high_score = store.load();
        let rules = Rules::from_settings(&settings);
        let run = RunState {
            level_index: settings.start_level,
            score: 0,
            lives: settings.starting_lives(),
            difficulty: Difficulty::default(),
        };
        log::info!("Seed {}, high score {}", seed, high_score.to_line());

        Self {
            settings,
            rules,
            loader,
            store,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::Menu,
            run,
            level: None,
            high_score,
            last_death: None,
            muted: false,
            quit: false,
            sounds: Vec::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn high_score(&self) -> &HighScoreRecord {
        &self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Food eaten in the current level, if one is in progress
    pub fn food_eaten(&self) -> Option<u32> {
        self.level.as_ref().map(|active| active.state.food_eaten)
    }

    /// Frame rate the platform should pace `update` at
    pub fn ticks_per_second(&self) -> u32 {
        self.run.difficulty.ticks_per_second(self.settings.ticks_per_second)
    }

    /// Sound cues queued since the last drain
    pub fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }

    pub fn frame(&self) -> Frame<'_> {
        let level = match (&self.screen, &self.level) {
            (Screen::Playing, Some(active)) => Some(LevelView {
                data: &active.data,
                snake: &active.state.snake,
                food: active.state.food,
                blinking_visible: active.state.hazard_active,
                food_eaten: active.state.food_eaten,
                food_per_level: self.rules.food_per_level,
            }),
            _ => None,
        };

        Frame {
            screen: &self.screen,
            level,
            run: &self.run,
            lives_enabled: self.settings.lives_enabled,
            high_score: &self.high_score,
            last_death: self.last_death,
            muted: self.muted,
        }
    }

    /// Apply one input command
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Quit => {
                log::info!("Quit requested");
                self.quit = true;
                return;
            }
            Command::ToggleMute => {
                self.muted = !self.muted;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Menu => {
                if command == Command::Confirm {
                    self.leave_menu();
                }
            }
            Screen::DifficultySelect { .. } => self.handle_difficulty(command),
            Screen::Playing => {
                if let (Command::Steer(direction), Some(active)) = (command, self.level.as_mut()) {
                    active.state.steer(direction);
                }
            }
            Screen::NameEntry { .. } => self.handle_name_entry(command),
            Screen::GameOver | Screen::Win => {
                if command == Command::Confirm {
                    self.high_score = self.store.load();
                    self.screen = Screen::Menu;
                }
            }
        }
    }

    /// Advance one frame. Only the playing screen ticks the simulation.
    pub fn update(&mut self) -> Option<TickOutcome> {
        if self.screen != Screen::Playing {
            return None;
        }
        let active = self.level.as_mut()?;
        let outcome = sim::tick(&mut active.state, &active.data, &self.rules, &mut self.rng);

        if outcome.ate_food() {
            self.run.score += 1;
            self.sounds.push(SoundEffect::FoodPickup);
        }

        match outcome {
            TickOutcome::Running { .. } => {}
            TickOutcome::Died(cause) => self.on_death(cause),
            TickOutcome::LevelComplete => self.on_level_complete(),
        }
        Some(outcome)
    }

    fn leave_menu(&mut self) {
        if self.settings.difficulty_select {
            self.screen = Screen::DifficultySelect {
                selected: self.run.difficulty,
            };
        } else {
            self.start_run(Difficulty::Normal);
        }
    }

    fn handle_difficulty(&mut self, command: Command) {
        let Screen::DifficultySelect { selected } = &mut self.screen else {
            return;
        };
        match command {
            Command::Steer(Direction::Up | Direction::Left) => *selected = selected.prev(),
            Command::Steer(Direction::Down | Direction::Right) => *selected = selected.next(),
            Command::Confirm => {
                let difficulty = *selected;
                self.start_run(difficulty);
            }
            _ => {}
        }
    }

    fn handle_name_entry(&mut self, command: Command) {
        let Screen::NameEntry { name, outcome } = &mut self.screen else {
            return;
        };
        match command {
            Command::Text(c) if !c.is_control() && name.chars().count() < MAX_NAME_LEN => {
                name.push(c);
            }
            Command::Backspace => {
                name.pop();
            }
            Command::Confirm if !name.is_empty() => {
                let record = HighScoreRecord::new(name.clone(), self.run.score);
                let outcome = *outcome;
                self.record_high_score(record, outcome);
            }
            _ => {}
        }
    }

    fn start_run(&mut self, difficulty: Difficulty) {
        self.high_score = self.store.load();
        self.run = RunState {
            level_index: self.settings.start_level,
            score: 0,
            lives: self.settings.starting_lives(),
            difficulty,
        };
        self.last_death = None;
        log::info!(
            "Run started: level {}, {} lives, {}",
            self.run.level_index,
            self.run.lives,
            difficulty.as_str()
        );

        if self.run.level_index > self.settings.levels_to_win {
            self.finish_run(RunOutcome::Win);
        } else {
            self.enter_level();
        }
    }

    fn enter_level(&mut self) {
        let data = self.loader.load(self.run.level_index);
        let state = LevelState::new(&data, &self.rules, &mut self.rng);
        self.level = Some(ActiveLevel { data, state });
        self.screen = Screen::Playing;
    }

    fn on_death(&mut self, cause: DeathCause) {
        self.sounds.push(SoundEffect::Death);
        self.last_death = Some(cause);
        self.run.lives = self.run.lives.saturating_sub(1);
        log::info!(
            "Died on level {} ({:?}), {} lives left",
            self.run.level_index,
            cause,
            self.run.lives
        );

        if self.run.lives == 0 {
            self.finish_run(RunOutcome::GameOver);
            return;
        }

        // Respawn: same level data, fresh snake/food/clock
        if let Some(active) = self.level.as_mut() {
            active.state = LevelState::new(&active.data, &self.rules, &mut self.rng);
        }
    }

    fn on_level_complete(&mut self) {
        log::info!("Level {} complete, score {}", self.run.level_index, self.run.score);
        self.run.level_index += 1;

        if self.run.level_index > self.settings.levels_to_win {
            self.sounds.push(SoundEffect::Win);
            self.finish_run(RunOutcome::Win);
        } else {
            self.sounds.push(SoundEffect::LevelComplete);
            self.enter_level();
        }
    }

    fn finish_run(&mut self, outcome: RunOutcome) {
        self.level = None;
        log::info!("Run over ({:?}), score {}", outcome, self.run.score);

        if self.high_score.beaten_by(self.run.score) {
            self.sounds.push(SoundEffect::HighScore);
            self.screen = Screen::NameEntry {
                name: String::new(),
                outcome,
            };
        } else {
            self.screen = outcome.screen();
        }
    }

    fn record_high_score(&mut self, record: HighScoreRecord, outcome: RunOutcome) {
        if let Err(e) = self.store.save(&record) {
            log::warn!("Could not save high score: {}", e);
        }
        self.high_score = record;
        self.screen = outcome.screen();
    }
}
