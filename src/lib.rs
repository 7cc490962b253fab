//! Red/Blue Lines State Library
//!
//! This crate provides the rule engine for the red/blue lines game: two
//! players take turns drawing chained line segments in alternating colors.
//!
//! # Overview
//!
//! - **Geometry** - Orientation of point triplets and segment intersection,
//!   including touching and collinear cases.
//!
//! - **Session State Machine** - Accepted lines, the line being drawn, whose
//!   color is next, and whether the pending line is legal.
//!
//! - **Scoring** - Lifecycle events (started, scored, reset) and a scoreboard
//!   that tracks the high score through a host-provided store.
//!
//! # Rules
//!
//! The first three lines are free. After that a line must cross at least one
//! line of the other color and none of its own. Each line starts where the
//! previous accepted line ended.
//!
//! # Design Principles
//!
//! 1. **Rejection is state, not an error** - An illegal line is simply not
//!    accepted. Only out-of-order gestures return errors.
//!
//! 2. **No rendering, no storage** - Presenters read snapshots and listen to
//!    events; persistence sits behind `HighScoreStore`.
//!
//! # Example
//!
//! ```rust
//! use redblue_state::geometry::Point;
//! use redblue_state::state::{
//!     CommitOutcome, MemoryHighScoreStore, PlayArea, PointerEvent, RulesConfig,
//! };
//!
//! let mut area = PlayArea::new(RulesConfig::default(), MemoryHighScoreStore::new());
//!
//! area.handle(PointerEvent::Begin(Point::new(0.0, 0.0))).unwrap();
//! area.handle(PointerEvent::Move(Point::new(5.0, 5.0))).unwrap();
//! let outcome = area.handle(PointerEvent::End(Point::new(10.0, 10.0))).unwrap();
//!
//! assert_eq!(outcome, Some(CommitOutcome::Accepted { score: 1 }));
//! assert_eq!(area.scoreboard.high_score(), 1);
//!
//! // The next line starts where this one ended
//! area.handle(PointerEvent::Begin(Point::new(50.0, 50.0))).unwrap();
//! assert_eq!(area.session.pending().unwrap().start, Point::new(10.0, 10.0));
//! ```

pub mod geometry;
pub mod state;

// Re-export everything from state module at crate root
pub use geometry::{on_segment, orientation, segments_intersect, Orientation, Point};
pub use state::*;
