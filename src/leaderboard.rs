use chrono::{DateTime, Local};
use itertools::Itertools;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::app_dirs::AppDirs;

/// One immutable leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub date: DateTime<Local>,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32, date: DateTime<Local>) -> Self {
        Self {
            name: name.into(),
            score,
            date,
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Database(rusqlite::Error),
    Serde(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "io error: {e}"),
            StoreError::Database(e) => write!(f, "database error: {e}"),
            StoreError::Serde(e) => write!(f, "serialization error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serde(e)
    }
}

/// The leaderboard collaborator: ordered top-N queries, inserts, and a
/// push-style subscription that delivers a fresh snapshot after every
/// successful insert. Ordering is score descending, ties by insertion.
pub trait ScoreStore {
    fn insert(&mut self, entry: &ScoreEntry) -> Result<(), StoreError>;
    fn top(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError>;
    fn subscribe(&mut self, limit: usize) -> Receiver<Vec<ScoreEntry>>;
}

/// rusqlite-backed leaderboard.
#[derive(Debug)]
pub struct SqliteScoreStore {
    conn: Connection,
    subscribers: Vec<(usize, Sender<Vec<ScoreEntry>>)>,
}

impl SqliteScoreStore {
    /// Open (and create if needed) the leaderboard under the app state dir.
    pub fn new() -> Result<Self, StoreError> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("tigerpat_leaderboard.db"));
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(Connection::open(db_path)?)
    }

    /// In-memory store, used by tests and as a last-resort fallback.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(Connection::open_in_memory()?)
    }

    fn open(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS leaderboard (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                score INTEGER NOT NULL,
                date TEXT NOT NULL
            )
            "#,
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_leaderboard_score ON leaderboard(score)",
            [],
        )?;
        Ok(Self {
            conn,
            subscribers: Vec::new(),
        })
    }

    /// Clear all entries (maintenance / `--reset-scores`).
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM leaderboard", [])?;
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        let snapshots: Vec<Option<Vec<ScoreEntry>>> = self
            .subscribers
            .iter()
            .map(|(limit, _)| self.top(*limit).ok())
            .collect();
        let mut alive = Vec::with_capacity(self.subscribers.len());
        for ((limit, tx), snapshot) in self.subscribers.drain(..).zip(snapshots) {
            let ok = match snapshot {
                Some(s) => tx.send(s).is_ok(),
                None => true,
            };
            if ok {
                alive.push((limit, tx));
            }
        }
        self.subscribers = alive;
    }
}

impl ScoreStore for SqliteScoreStore {
    fn insert(&mut self, entry: &ScoreEntry) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO leaderboard (name, score, date) VALUES (?1, ?2, ?3)",
            params![entry.name, entry.score, entry.date.to_rfc3339()],
        )?;
        self.notify();
        Ok(())
    }

    fn top(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            // id ASC gives the stable insertion-order tie-break
            "SELECT name, score, date FROM leaderboard ORDER BY score DESC, id ASC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit as i64], |row| {
            let date_str: String = row.get(2)?;
            let date = DateTime::parse_from_rfc3339(&date_str)
                .map_err(|_| {
                    rusqlite::Error::InvalidColumnType(
                        2,
                        "date".to_string(),
                        rusqlite::types::Type::Text,
                    )
                })?
                .with_timezone(&Local);
            Ok(ScoreEntry {
                name: row.get(0)?,
                score: row.get(1)?,
                date,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    fn subscribe(&mut self, limit: usize) -> Receiver<Vec<ScoreEntry>> {
        let (tx, rx) = mpsc::channel();
        // Initial snapshot so subscribers never wait for the first insert
        if let Ok(snapshot) = self.top(limit) {
            let _ = tx.send(snapshot);
        }
        self.subscribers.push((limit, tx));
        rx
    }
}

/// Device-local JSON list used when a leaderboard write fails. Pure
/// write-through: entries recorded here are never retried upstream.
#[derive(Debug, Clone)]
pub struct LocalScoreCache {
    path: PathBuf,
}

impl LocalScoreCache {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::local_scores_path()
            .unwrap_or_else(|| PathBuf::from("tigerpat_scores.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Vec<ScoreEntry> {
        fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    /// Append an entry, re-sort descending (stable, so ties keep insertion
    /// order), truncate to `limit`, persist, and return the resulting list.
    pub fn record(&self, entry: ScoreEntry, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        let mut entries = self.load();
        entries.push(entry);
        let entries: Vec<ScoreEntry> = entries
            .into_iter()
            .sorted_by(|a, b| b.score.cmp(&a.score))
            .take(limit)
            .collect();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;
        Ok(entries)
    }
}

/// File-backed store for running without sqlite (`--local-only`). Same
/// contract as the sqlite store, persisted through `LocalScoreCache`.
#[derive(Debug)]
pub struct JsonScoreStore {
    cache: LocalScoreCache,
    capacity: usize,
    subscribers: Vec<(usize, Sender<Vec<ScoreEntry>>)>,
}

impl JsonScoreStore {
    pub fn new(cache: LocalScoreCache, capacity: usize) -> Self {
        Self {
            cache,
            capacity,
            subscribers: Vec::new(),
        }
    }

    fn notify(&mut self) {
        let all = self.cache.load();
        self.subscribers.retain(|(limit, tx)| {
            let snapshot: Vec<ScoreEntry> = all.iter().take(*limit).cloned().collect();
            tx.send(snapshot).is_ok()
        });
    }
}

impl ScoreStore for JsonScoreStore {
    fn insert(&mut self, entry: &ScoreEntry) -> Result<(), StoreError> {
        self.cache.record(entry.clone(), self.capacity)?;
        self.notify();
        Ok(())
    }

    fn top(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.cache.load().into_iter().take(limit).collect())
    }

    fn subscribe(&mut self, limit: usize) -> Receiver<Vec<ScoreEntry>> {
        let (tx, rx) = mpsc::channel();
        if let Ok(snapshot) = self.top(limit) {
            let _ = tx.send(snapshot);
        }
        self.subscribers.push((limit, tx));
        rx
    }
}
