//! Game state module.
//!
//! - `line` - Colored segments and the line being drawn
//! - `rules` - Crossing rule and rule configuration
//! - `session` - Session state machine, events and multi-session manager
//! - `score` - Scoreboard listener and the high score store boundary
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          PlayArea                             │
//! │                                                               │
//! │  PointerEvent ──▶ ┌─────────────┐  SessionEvent ┌────────────┐ │
//! │  (begin/move/end) │   Session   │ ────────────▶ │ Scoreboard │ │
//! │                   │             │               │            │ │
//! │                   │ lines       │               │ score      │ │
//! │                   │ pending     │               │ high_score │ │
//! │                   │ next_color  │               └─────┬──────┘ │
//! │                   └──────┬──────┘                     │        │
//! │                          │ crossing rule              ▼        │
//! │                   ┌──────▼──────┐          HighScoreStore      │
//! │                   │  geometry   │          (host-provided)     │
//! │                   └─────────────┘                              │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod line;
pub mod rules;
pub mod score;
pub mod session;

// Re-export commonly used types
pub use line::{LineColor, PendingLine, Segment};
pub use rules::{Crossings, RulesConfig, BOOTSTRAP_LINES};
pub use score::{HighScoreStore, MemoryHighScoreStore, Scoreboard, HIGH_SCORE_KEY};
pub use session::{
    CommitOutcome, InvalidTransition, PointerEvent, Session, SessionEvent, SessionListener,
    SessionManager, SessionStatus,
};

/// A session wired to its scoreboard.
///
/// Events are delivered to the scoreboard after every operation.
#[derive(Debug)]
pub struct PlayArea<S: HighScoreStore> {
    pub session: Session,
    pub scoreboard: Scoreboard<S>,
}

impl<S: HighScoreStore> PlayArea<S> {
    pub fn new(rules: RulesConfig, store: S) -> Self {
        Self {
            session: Session::with_rules(rules),
            scoreboard: Scoreboard::new(store),
        }
    }

    /// Feed a pointer event and update the scoreboard.
    pub fn handle(
        &mut self,
        event: PointerEvent,
    ) -> Result<Option<CommitOutcome>, InvalidTransition> {
        let result = self.session.handle(event);
        self.session.dispatch(&mut self.scoreboard);
        result
    }

    /// Reset the session and update the scoreboard.
    pub fn reset(&mut self) {
        self.session.reset();
        self.session.dispatch(&mut self.scoreboard);
    }

    /// Snapshot of everything a renderer needs.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "session": self.session.to_json(),
            "scoreboard": self.scoreboard.to_json()
        })
    }
}
