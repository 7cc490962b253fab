//! Score presentation and the high score store boundary.
//!
//! The session only reports scores through events. `Scoreboard` listens to
//! them, keeps the current and best score, and hands new records to a
//! `HighScoreStore` owned by the host application.

use tracing::{debug, warn};

use super::session::SessionListener;

/// Key the high score is stored under.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// External storage for the single persisted high score.
pub trait HighScoreStore {
    fn load(&self) -> Option<usize>;
    fn save(&mut self, score: usize) -> std::io::Result<()>;
}

/// In-memory store, for hosts without persistence and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    high_score: Option<usize>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: usize) -> Self {
        Self {
            high_score: Some(score),
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Option<usize> {
        self.high_score
    }

    fn save(&mut self, score: usize) -> std::io::Result<()> {
        self.high_score = Some(score);
        Ok(())
    }
}

/// Current and best score, as shown next to the play area.
#[derive(Debug)]
pub struct Scoreboard<S: HighScoreStore> {
    store: S,
    score: usize,
    high_score: usize,
}

impl<S: HighScoreStore> Scoreboard<S> {
    /// Load the stored high score. Until a game starts it is also shown as the score.
    pub fn new(store: S) -> Self {
        let high_score = store.load().unwrap_or(0);
        Self {
            store,
            score: high_score,
            high_score,
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn high_score(&self) -> usize {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "score": self.score,
            "high_score": self.high_score
        })
    }
}

impl<S: HighScoreStore> SessionListener for Scoreboard<S> {
    fn on_started(&mut self) {
        self.score = 0;
    }

    fn on_scored(&mut self, score: usize) {
        self.score = score;

        if score > self.high_score {
            debug!(score, previous = self.high_score, "New high score");
            self.high_score = score;
            if let Err(e) = self.store.save(score) {
                warn!(error = %e, key = HIGH_SCORE_KEY, "Failed to save high score");
            }
        }
    }

    fn on_reset(&mut self) {
        self.score = 0;
    }
}
