//! Game session state machine.
//!
//! A session owns the accepted lines of one play area, the line currently
//! being drawn, whose color is next, and whether the pending line would be
//! legal if committed now.
//!
//! # State Diagram
//!
//! ```text
//!            begin_line                 update_line
//! ┌──────┐ ───────────────▶ ┌─────────┐ ◀──────────┐
//! │ Idle │                  │ Drawing │ ───────────┘
//! └──────┘ ◀─────────────── └─────────┘
//!    ▲       commit_line         │
//!    │  (accepted or rejected)   │ reset
//!    └───────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, instrument, warn};

use super::line::{LineColor, PendingLine, Segment};
use super::rules::{Crossings, RulesConfig};
use crate::geometry::Point;

/// Session state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No gesture in progress
    #[default]
    Idle,
    /// A pending line exists
    Drawing,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drawing => "drawing",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer input, one variant per gesture phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Begin(Point),
    Move(Point),
    End(Point),
}

/// Lifecycle events for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// First stroke of a fresh game
    Started,
    /// A line was accepted; `score` is the new line count
    Scored { score: usize },
    /// The session was reset
    Reset,
}

/// Receives session lifecycle events.
pub trait SessionListener {
    fn on_started(&mut self) {}
    fn on_scored(&mut self, _score: usize) {}
    fn on_reset(&mut self) {}

    /// Route an event to the matching hook.
    fn on_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Started => self.on_started(),
            SessionEvent::Scored { score } => self.on_scored(score),
            SessionEvent::Reset => self.on_reset(),
        }
    }
}

/// Result of committing a pending line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Accepted { score: usize },
    Rejected,
}

impl CommitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Error when a gesture arrives out of order.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidTransition {
    pub from: SessionStatus,
    pub event: PointerEvent,
    pub reason: &'static str,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} via {:?}: {}",
            self.from, self.event, self.reason
        )
    }
}

impl std::error::Error for InvalidTransition {}

/// Game session state.
#[derive(Debug, Clone)]
pub struct Session {
    rules: RulesConfig,

    /// Accepted lines in acceptance order
    lines: Vec<Segment>,

    /// Line being drawn
    pending: Option<PendingLine>,

    /// Color of the next line
    next_color: LineColor,

    /// End of the last accepted line; the next line starts here
    continuity_point: Option<Point>,

    /// Whether the pending line would be accepted right now
    pending_valid: bool,

    /// Events not yet delivered to a listener
    events: Vec<SessionEvent>,

    /// When the current game's first stroke began
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When the last line was accepted
    pub last_scored_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the default rules.
    pub fn new() -> Self {
        Self::with_rules(RulesConfig::default())
    }

    /// Create a session with custom rules.
    pub fn with_rules(rules: RulesConfig) -> Self {
        Self {
            rules,
            lines: Vec::new(),
            pending: None,
            next_color: rules.first_color,
            continuity_point: None,
            pending_valid: true,
            events: Vec::new(),
            started_at: None,
            last_scored_at: None,
        }
    }

    /// Restore a session from previously accepted lines.
    ///
    /// The next line continues from the last line's end in the other color.
    /// Lines that could never have been accepted (zero length, non-finite)
    /// are dropped.
    pub fn with_lines(rules: RulesConfig, lines: Vec<Segment>) -> Self {
        let mut session = Self::with_rules(rules);
        let total = lines.len();
        let lines: Vec<Segment> = lines.into_iter().filter(|l| l.is_drawable()).collect();
        if lines.len() < total {
            warn!(dropped = total - lines.len(), "Dropped undrawable lines on restore");
        }
        if let Some(last) = lines.last() {
            session.continuity_point = Some(last.end);
            session.next_color = last.color.flipped();
        }
        session.lines = lines;
        session.refresh_validity();
        session
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Accepted lines, oldest first.
    pub fn lines(&self) -> &[Segment] {
        &self.lines
    }

    pub fn pending(&self) -> Option<&PendingLine> {
        self.pending.as_ref()
    }

    pub fn pending_valid(&self) -> bool {
        self.pending_valid
    }

    pub fn next_color(&self) -> LineColor {
        self.next_color
    }

    pub fn continuity_point(&self) -> Option<Point> {
        self.continuity_point
    }

    /// Current score: the number of accepted lines.
    pub fn score(&self) -> usize {
        self.lines.len()
    }

    pub fn status(&self) -> SessionStatus {
        if self.pending.is_some() {
            SessionStatus::Drawing
        } else {
            SessionStatus::Idle
        }
    }

    /// Route a pointer event to the matching gesture operation.
    ///
    /// Returns the commit outcome for `End`, `None` otherwise.
    pub fn handle(
        &mut self,
        event: PointerEvent,
    ) -> Result<Option<CommitOutcome>, InvalidTransition> {
        match event {
            PointerEvent::Begin(point) => self.begin_line(point).map(|_| None),
            PointerEvent::Move(point) => self.update_line(point).map(|_| None),
            PointerEvent::End(point) => self.commit_line(point).map(Some),
        }
    }

    /// Start drawing a line.
    #[instrument(level = "debug", skip(self))]
    pub fn begin_line(&mut self, point: Point) -> Result<(), InvalidTransition> {
        if self.pending.is_some() {
            return Err(self.invalid(PointerEvent::Begin(point), "Line already in progress"));
        }

        if self.lines.is_empty() {
            info!("Game started");
            self.started_at = Some(chrono::Utc::now());
            self.events.push(SessionEvent::Started);
        }

        let start = self.continuity_point.unwrap_or(point);
        self.pending = Some(PendingLine::new(start, self.next_color));
        self.refresh_validity();

        Ok(())
    }

    /// Move the end of the pending line.
    #[instrument(level = "debug", skip(self))]
    pub fn update_line(&mut self, point: Point) -> Result<(), InvalidTransition> {
        let Some(pending) = self.pending.as_mut() else {
            return Err(self.invalid(PointerEvent::Move(point), "No line in progress"));
        };

        pending.end = Some(point);
        self.refresh_validity();

        Ok(())
    }

    /// Finish the pending line, accepting it if legal.
    #[instrument(level = "debug", skip(self))]
    pub fn commit_line(&mut self, point: Point) -> Result<CommitOutcome, InvalidTransition> {
        let Some(pending) = self.pending.as_mut() else {
            return Err(self.invalid(PointerEvent::End(point), "No line in progress"));
        };

        pending.end = Some(point);
        self.refresh_validity();

        let accepted = self
            .pending
            .take()
            .and_then(|p| p.segment())
            .filter(|_| self.pending_valid);

        let outcome = match accepted {
            Some(segment) => {
                self.lines.push(segment);
                self.continuity_point = Some(segment.end);
                self.next_color = self.next_color.flipped();
                self.last_scored_at = Some(chrono::Utc::now());

                let score = self.score();
                info!(score, color = segment.color.as_str(), "Line accepted");
                self.events.push(SessionEvent::Scored { score });
                CommitOutcome::Accepted { score }
            }
            None => {
                debug!(score = self.score(), "Line rejected");
                CommitOutcome::Rejected
            }
        };

        self.refresh_validity();

        Ok(outcome)
    }

    /// Clear the board and start over.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        info!(score = self.score(), "Session reset");

        self.lines.clear();
        self.pending = None;
        self.continuity_point = None;
        self.next_color = self.rules.first_color;
        self.pending_valid = true;
        self.started_at = None;
        self.last_scored_at = None;
        self.events.push(SessionEvent::Reset);
    }

    /// Take all undelivered events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver all undelivered events to a listener.
    pub fn dispatch<L: SessionListener + ?Sized>(&mut self, listener: &mut L) {
        for event in self.drain_events() {
            listener.on_event(event);
        }
    }

    /// Recompute `pending_valid` for the current pending line.
    fn refresh_validity(&mut self) {
        if !self.rules.is_enforced(self.lines.len()) {
            self.pending_valid = true;
            return;
        }

        let Some(pending) = &self.pending else {
            self.pending_valid = false;
            return;
        };

        // Not enough information yet; keep the last verdict
        let Some(candidate) = pending.segment() else {
            return;
        };

        let crossings = Crossings::count(&candidate, &self.lines);
        self.pending_valid = crossings.is_legal();
        debug!(
            same = crossings.same_color,
            opposite = crossings.opposite_color,
            valid = self.pending_valid,
            "Validated pending line"
        );
    }

    fn invalid(&self, event: PointerEvent, reason: &'static str) -> InvalidTransition {
        let err = InvalidTransition {
            from: self.status(),
            event,
            reason,
        };
        warn!(error = %err, "Rejected gesture");
        err
    }

    /// Convert session state to a JSON snapshot for rendering.
    pub fn to_json(&self) -> serde_json::Value {
        let lines: Vec<serde_json::Value> = self.lines.iter().map(|l| l.to_json()).collect();

        serde_json::json!({
            "status": self.status().as_str(),
            "score": self.score(),
            "lines": lines,
            "pending": self.pending.map(|p| p.to_json()),
            "pending_valid": self.pending_valid,
            "next_color": self.next_color.as_str(),
            "continuity_point": self.continuity_point.map(|p| p.to_json())
        })
    }
}

/// Session manager - tracks the sessions of several play areas.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<String, Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the session for a play area.
    pub fn get_or_create(&mut self, id: &str, rules: RulesConfig) -> &mut Session {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| Session::with_rules(rules))
    }

    /// Add a session, replacing any existing one with the same id.
    pub fn add(&mut self, id: String, session: Session) -> Option<Session> {
        self.sessions.insert(id, session)
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }

    /// Count sessions with a gesture in progress.
    pub fn active_count(&self) -> usize {
        self.sessions
            .values()
            .filter(|s| s.status() == SessionStatus::Drawing)
            .count()
    }

    /// Total session count.
    pub fn count(&self) -> usize {
        self.sessions.len()
    }
}
