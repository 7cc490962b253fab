//! Line types.
//!
//! Accepted segments carry a color; the pending line is the stroke currently
//! being drawn and may not have an end point yet.

use serde::{Deserialize, Serialize};

use crate::geometry::{segments_intersect, Point};

/// Line colors. Players alternate between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineColor {
    #[default]
    White,
    Black,
}

impl LineColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// The other player's color.
    pub fn flipped(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

/// A drawn line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub color: LineColor,
}

impl Segment {
    pub fn new(start: Point, end: Point, color: LineColor) -> Self {
        Self { start, end, color }
    }

    /// Zero-length segments can never be drawn or accepted.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Non-degenerate with finite endpoints.
    pub fn is_drawable(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && !self.is_degenerate()
    }

    /// Check if this segment intersects another, ignoring color.
    pub fn crosses(&self, other: &Segment) -> bool {
        segments_intersect(self.start, self.end, other.start, other.end)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.start.to_json(),
            "end": self.end.to_json(),
            "color": self.color.as_str()
        })
    }
}

/// The line under construction during a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingLine {
    pub start: Point,
    /// Unset until the first move event
    pub end: Option<Point>,
    pub color: LineColor,
}

impl PendingLine {
    pub fn new(start: Point, color: LineColor) -> Self {
        Self {
            start,
            end: None,
            color,
        }
    }

    /// The drawable segment, or `None` while there isn't enough information
    /// (no end point yet, zero length, or a non-finite coordinate).
    pub fn segment(&self) -> Option<Segment> {
        let segment = Segment::new(self.start, self.end?, self.color);
        if segment.is_drawable() {
            Some(segment)
        } else {
            None
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.start.to_json(),
            "end": self.end.map(|p| p.to_json()),
            "color": self.color.as_str(),
            "drawable": self.segment().is_some()
        })
    }
}
