//! Level data and loading
//!
//! Levels are plain text grids, one character per cell:
//! - `#` static obstacle
//! - `*` or `A` blinking obstacle
//! - `S` start cell
//! - `F` fixed food cell
//! - anything else is open space
//!
//! A level that cannot be read or parsed is replaced by an empty fallback
//! level. Loading never fails.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::DEFAULT_START;
use crate::sim::Cell;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level has no rows")]
    Empty,
}

/// Immutable description of one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelData {
    pub width: u32,
    pub height: u32,
    pub obstacles: HashSet<Cell>,
    pub blinking: HashSet<Cell>,
    pub start: Cell,
    pub fixed_food: Option<Cell>,
}

impl LevelData {
    /// An open level of the given size with the default start cell
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            obstacles: HashSet::new(),
            blinking: HashSet::new(),
            start: DEFAULT_START,
            fixed_food: None,
        }
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.in_bounds(self.width, self.height)
    }

    /// Every in-grid cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height as i32).flat_map(move |row| (0..self.width as i32).map(move |col| Cell::new(col, row)))
    }

    /// Whether `cell` is a static or blinking obstacle, regardless of blink state
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell) || self.blinking.contains(&cell)
    }

    /// Parse a level description.
    ///
    /// Width is the longest line, height the line count. Only trailing
    /// whitespace is stripped, so leading spaces are open cells. Later `S`
    /// and `F` markers override earlier ones.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        // Trailing blank lines are not rows
        let row_count = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map(|i| i + 1)
            .ok_or(LevelError::Empty)?;
        let lines = &lines[..row_count];

        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let mut level = Self::empty(width as u32, row_count as u32);

        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::new(col as i32, row as i32);
                match ch {
                    '#' => {
                        level.obstacles.insert(cell);
                    }
                    '*' | 'A' => {
                        level.blinking.insert(cell);
                    }
                    'S' => level.start = cell,
                    'F' => level.fixed_food = Some(cell),
                    _ => {}
                }
            }
        }

        Ok(level)
    }
}

/// Resolves level indices to `level{N}.txt` files in a directory
#[derive(Debug, Clone)]
pub struct LevelLoader {
    dir: PathBuf,
    fallback_width: u32,
    fallback_height: u32,
}

impl LevelLoader {
    pub fn new(dir: impl Into<PathBuf>, fallback_width: u32, fallback_height: u32) -> Self {
        Self {
            dir: dir.into(),
            fallback_width,
            fallback_height,
        }
    }

    pub fn path_for(&self, index: u32) -> PathBuf {
        self.dir.join(format!("level{index}.txt"))
    }

    /// Load a level by index, falling back to an empty level on any error
    pub fn load(&self, index: u32) -> LevelData {
        let path = self.path_for(index);
        match Self::load_file(&path) {
            Ok(level) => {
                log::info!(
                    "Loaded level {} ({}x{}, {} obstacles, {} blinking)",
                    index,
                    level.width,
                    level.height,
                    level.obstacles.len(),
                    level.blinking.len()
                );
                level
            }
            Err(e) => {
                log::warn!("Level {}: {}; using fallback level", index, e);
                self.fallback()
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<LevelData, LevelError> {
        let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        LevelData::parse(&text)
    }

    pub fn fallback(&self) -> LevelData {
        LevelData::empty(self.fallback_width, self.fallback_height)
    }
}
