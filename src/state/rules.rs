//! Crossing rule and its configuration.
//!
//! Once enough lines are on the board, a new line must cross at least one line
//! of the opposite color and no line of its own color.

use serde::{Deserialize, Serialize};

use super::line::{LineColor, Segment};

/// Number of lines that may be drawn freely before the crossing rule applies.
pub const BOOTSTRAP_LINES: usize = 3;

/// Tunable game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Accepted lines required before the crossing rule is enforced
    pub bootstrap_lines: usize,
    /// Color of the first line of a fresh game
    pub first_color: LineColor,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            bootstrap_lines: BOOTSTRAP_LINES,
            first_color: LineColor::White,
        }
    }
}

impl RulesConfig {
    /// Parse rules from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if the crossing rule is enforced with this many accepted lines.
    pub fn is_enforced(&self, accepted: usize) -> bool {
        accepted >= self.bootstrap_lines
    }
}

/// Intersections between a candidate line and the accepted lines, by color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Crossings {
    pub same_color: usize,
    pub opposite_color: usize,
}

impl Crossings {
    /// Count the accepted lines `candidate` intersects.
    pub fn count(candidate: &Segment, lines: &[Segment]) -> Self {
        lines
            .iter()
            .filter(|line| candidate.crosses(line))
            .fold(Self::default(), |mut acc, line| {
                if line.color == candidate.color {
                    acc.same_color += 1;
                } else {
                    acc.opposite_color += 1;
                }
                acc
            })
    }

    /// At least one opposite-color crossing and none of the same color.
    pub fn is_legal(&self) -> bool {
        self.opposite_color > 0 && self.same_color == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use pretty_assertions::assert_eq;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64, color: LineColor) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2), color)
    }

    #[test]
    fn test_defaults() {
        let cfg = RulesConfig::default();
        assert_eq!(cfg.bootstrap_lines, 3);
        assert_eq!(cfg.first_color, LineColor::White);
        assert!(!cfg.is_enforced(2));
        assert!(cfg.is_enforced(3));
    }

    #[test]
    fn test_from_json() {
        let cfg = RulesConfig::from_json(r#"{"first_color": "black"}"#).unwrap();
        assert_eq!(
            cfg,
            RulesConfig {
                bootstrap_lines: 3,
                first_color: LineColor::Black,
            }
        );

        let cfg = RulesConfig::from_json(r#"{"bootstrap_lines": 5}"#).unwrap();
        assert_eq!(cfg.bootstrap_lines, 5);

        assert!(RulesConfig::from_json(r#"{"first_color": "red"}"#).is_err());
    }

    #[test]
    fn test_count_crossings() {
        let lines = vec![
            seg(0.0, 0.0, 4.0, 0.0, LineColor::White),
            seg(0.0, 2.0, 4.0, 2.0, LineColor::Black),
            seg(10.0, 10.0, 11.0, 11.0, LineColor::White),
        ];

        // Vertical line through both horizontals
        let candidate = seg(1.0, -1.0, 1.0, 3.0, LineColor::Black);
        let crossings = Crossings::count(&candidate, &lines);
        assert_eq!(
            crossings,
            Crossings {
                same_color: 1,
                opposite_color: 1,
            }
        );
        assert!(!crossings.is_legal());

        // Only reaches the white line
        let candidate = seg(1.0, -1.0, 1.0, 1.0, LineColor::Black);
        assert!(Crossings::count(&candidate, &lines).is_legal());

        // Crosses nothing
        let candidate = seg(20.0, 0.0, 21.0, 0.0, LineColor::Black);
        let crossings = Crossings::count(&candidate, &lines);
        assert_eq!(crossings, Crossings::default());
        assert!(!crossings.is_legal());
    }
}
