use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const APP_DIR: &str = "roam_snake";
const HIGH_SCORE_FILE: &str = "high_score.json";

/// Somewhere the best score can be read from and written back to
pub trait HighScoreStore {
    /// The stored best score, or `None` if nothing has been recorded yet
    fn load(&self) -> Result<Option<u32>>;

    /// Replace the stored best score
    fn save(&mut self, score: u32) -> Result<()>;
}

/// On-disk layout of the high score file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Stores the high score as a small JSON document
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store file inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(HIGH_SCORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<u32>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read high score from {:?}", self.path));
            }
        };
        let record: HighScoreRecord = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed high score file {:?}", self.path))?;
        Ok(Some(record.high_score))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })
            .context("Failed to serialize high score")?;

        // the old record stays readable until the rename lands
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("Failed to write high score to {:?}", tmp))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to move high score into {:?}", self.path))?;
        Ok(())
    }
}

/// Keeps the high score in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    saves: usize,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `score`
    pub fn with_score(score: u32) -> Self {
        Self {
            value: Some(score),
            ..Self::default()
        }
    }

    /// A store whose every operation fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// How many times `save` has succeeded
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>> {
        if self.fail {
            bail!("memory store is unavailable");
        }
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if self.fail {
            bail!("memory store is unavailable");
        }
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// The best score seen so far, backed by a [`HighScoreStore`]
///
/// Loaded once when the game starts up and written back every time a finished
/// game beats it.
#[derive(Debug)]
pub struct HighScores<S> {
    best: u32,
    store: S,
}

impl<S: HighScoreStore> HighScores<S> {
    /// Read the stored best score; an unreadable store counts as zero
    pub fn load(store: S) -> Self {
        let best = match store.load() {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                warn!("Could not load high score, starting from 0: {err:#}");
                0
            }
        };
        info!(best, "high score loaded");
        Self { best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Offer a finished game's score; returns true when it set a new record
    ///
    /// The in-memory best is updated even if persisting it fails.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match self.store.save(score) {
            Ok(()) => info!(score, "new high score saved"),
            Err(err) => warn!("Failed to persist high score {score}: {err:#}"),
        }
        true
    }
}

/// Where game data lives when no directory is given explicitly
///
/// `$XDG_DATA_HOME/roam_snake`, falling back to `~/.local/share/roam_snake`.
pub fn default_data_dir() -> Result<PathBuf> {
    let mut path = match std::env::var_os("XDG_DATA_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home = homedir::get_my_home()
                .map_err(|err| anyhow!("Failed to look up home directory: {err:?}"))?
                .ok_or_else(|| anyhow!("No home directory"))?;
            home.join(".local").join("share")
        }
    };
    path.push(APP_DIR);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_has_no_record() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let mut store = JsonFileStore::in_dir(&nested);
        store.save(6).unwrap();

        let reopened = JsonFileStore::in_dir(&nested);
        assert_eq!(reopened.load().unwrap(), Some(6));
        assert!(!reopened.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        std::fs::write(store.path(), "not json").unwrap();
        assert!(store.load().is_err());

        // and the tracker shrugs it off
        let scores = HighScores::load(store);
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_submit_only_writes_when_beaten() {
        let mut scores = HighScores::load(MemoryStore::with_score(5));
        assert_eq!(scores.best(), 5);

        assert!(!scores.submit(3));
        assert!(!scores.submit(5));
        assert_eq!(scores.store().saves(), 0);

        assert!(scores.submit(6));
        assert_eq!(scores.best(), 6);
        assert_eq!(scores.store().value(), Some(6));
        assert_eq!(scores.store().saves(), 1);
    }

    #[test]
    fn test_failing_store_keeps_best_in_memory() {
        let mut scores = HighScores::load(MemoryStore::failing());
        assert_eq!(scores.best(), 0);

        assert!(scores.submit(4));
        assert_eq!(scores.best(), 4);
        assert_eq!(scores.store().value(), None);
    }

    #[test]
    fn test_file_backed_high_score_survives_restart() {
        let dir = TempDir::new().unwrap();

        let mut first = HighScores::load(JsonFileStore::in_dir(dir.path()));
        assert!(first.submit(12));

        let second = HighScores::load(JsonFileStore::in_dir(dir.path()));
        assert_eq!(second.best(), 12);
    }
}
