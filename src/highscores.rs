//! High score record
//!
//! A single best score with the player's name. Persisted as one line of text,
//! `name: score`, overwritten whenever a run beats it.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Maximum characters in a player name
pub const MAX_NAME_LEN: usize = 15;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed high score record {0:?}")]
    Malformed(String),
}

/// The stored best score
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScoreRecord {
    pub name: String,
    pub score: u64,
}

impl HighScoreRecord {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Whether `score` strictly beats this record
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.score
    }

    /// Parse `name: score`. The score follows the last colon.
    pub fn parse(line: &str) -> Result<Self, HighScoreError> {
        let line = line.trim();
        let (name, score) = line
            .rsplit_once(':')
            .ok_or_else(|| HighScoreError::Malformed(line.to_string()))?;
        let score = score
            .trim()
            .parse()
            .map_err(|_| HighScoreError::Malformed(line.to_string()))?;
        Ok(Self::new(name.trim(), score))
    }

    pub fn to_line(&self) -> String {
        format!("{}: {}", self.name, self.score)
    }
}

/// Where the high score lives. Load never fails; save may.
pub trait HighScoreStore {
    fn load(&self) -> HighScoreRecord;
    fn save(&mut self, record: &HighScoreRecord) -> Result<(), HighScoreError>;
}

/// Text-file backed store
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<HighScoreRecord, HighScoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        HighScoreRecord::parse(&text)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> HighScoreRecord {
        match self.read() {
            Ok(record) => record,
            Err(HighScoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score yet at {}", self.path.display());
                HighScoreRecord::default()
            }
            Err(e) => {
                log::warn!("{}; starting fresh", e);
                HighScoreRecord::default()
            }
        }
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<(), HighScoreError> {
        fs::write(&self.path, record.to_line()).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("High score saved: {}", record.to_line());
        Ok(())
    }
}

/// In-memory store; keeps every save for inspection
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub record: HighScoreRecord,
    pub saves: Vec<HighScoreRecord>,
    /// Make every save fail
    pub fail_saves: bool,
}

#[cfg(test)]
impl MemoryHighScoreStore {
    pub fn with_record(record: HighScoreRecord) -> Self {
        Self {
            record,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> HighScoreRecord {
        self.record.clone()
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<(), HighScoreError> {
        self.saves.push(record.clone());
        if self.fail_saves {
            return Err(HighScoreError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("save disabled"),
            });
        }
        self.record = record.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("grid_snake_{}_{}.txt", tag, std::process::id()))
    }

    #[test]
    fn test_parse_record() {
        assert_eq!(
            HighScoreRecord::parse("alice: 12\n").unwrap(),
            HighScoreRecord::new("alice", 12)
        );
        assert_eq!(
            HighScoreRecord::parse("a:b: 3").unwrap(),
            HighScoreRecord::new("a:b", 3)
        );
        assert!(HighScoreRecord::parse("no score here").is_err());
        assert!(HighScoreRecord::parse("bob: lots").is_err());
    }

    #[test]
    fn test_beaten_by_is_strict() {
        let record = HighScoreRecord::new("x", 10);
        assert!(!record.beaten_by(10));
        assert!(record.beaten_by(11));
        assert!(HighScoreRecord::default().beaten_by(1));
        assert!(!HighScoreRecord::default().beaten_by(0));
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("hs_roundtrip");
        let mut store = FileHighScoreStore::new(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(store.load(), HighScoreRecord::default());

        store.save(&HighScoreRecord::new("carol", 42)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "carol: 42");
        assert_eq!(store.load(), HighScoreRecord::new("carol", 42));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_malformed_loads_empty() {
        let path = temp_path("hs_malformed");
        fs::write(&path, "garbage").unwrap();
        let store = FileHighScoreStore::new(&path);
        assert_eq!(store.load(), HighScoreRecord::default());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_save_failure_is_reported() {
        let dir = std::env::temp_dir().join("grid_snake_missing_dir_for_hs");
        let _ = fs::remove_dir_all(&dir);
        let mut store = FileHighScoreStore::new(dir.join("hs.txt"));
        assert!(store.save(&HighScoreRecord::new("dan", 1)).is_err());
    }
}
