use serde::{Deserialize, Serialize};

/// The kind of a hit object, as classified by the chart decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HitKind {
    /// A single-moment object (circle)
    Point,
    /// An object held from start to end (slider)
    HeldRange,
    /// An object channeled from start to end (spinner)
    ChanneledRange,
    /// Any kind the decoder could not classify
    Other,
}

/// Playfield coordinate. Carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single hit object in the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitObject {
    /// Start time in milliseconds
    pub start_time: i64,
    /// End time in milliseconds (equal to start_time for point objects)
    pub end_time: i64,
    /// Object kind
    pub kind: HitKind,
    /// Playfield position
    #[serde(default)]
    pub position: Position,
}

impl HitObject {
    pub fn point(time: i64) -> Self {
        Self {
            start_time: time,
            end_time: time,
            kind: HitKind::Point,
            position: Position::default(),
        }
    }

    pub fn held_range(start_time: i64, end_time: i64) -> Self {
        Self {
            start_time,
            end_time,
            kind: HitKind::HeldRange,
            position: Position::default(),
        }
    }

    pub fn channeled_range(start_time: i64, end_time: i64) -> Self {
        Self {
            start_time,
            end_time,
            kind: HitKind::ChanneledRange,
            position: Position::default(),
        }
    }

    /// A zero-length channeled object used purely to shift the loaded window.
    pub fn filler(time: i64) -> Self {
        Self::channeled_range(time, time)
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self.kind, HitKind::HeldRange | HitKind::ChanneledRange)
    }

    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_has_zero_duration() {
        let ho = HitObject::point(1500);
        assert_eq!(ho.start_time, 1500);
        assert_eq!(ho.end_time, 1500);
        assert_eq!(ho.duration(), 0);
        assert!(!ho.is_ranged());
    }

    #[test]
    fn test_ranged_kinds() {
        assert!(HitObject::held_range(0, 300).is_ranged());
        assert!(HitObject::channeled_range(0, 3000).is_ranged());
        let other = HitObject {
            kind: HitKind::Other,
            ..HitObject::point(0)
        };
        assert!(!other.is_ranged());
    }

    #[test]
    fn test_filler_is_degenerate_channel() {
        let f = HitObject::filler(1999);
        assert_eq!(f.kind, HitKind::ChanneledRange);
        assert_eq!(f.duration(), 0);
        assert_eq!(f.position, Position::default());
    }

    #[test]
    fn test_serde_camel_case() {
        let ho = HitObject::held_range(100, 400).with_position(256.0, 192.0);
        let json = serde_json::to_string(&ho).unwrap();
        assert!(json.contains("\"startTime\":100"));
        assert!(json.contains("\"kind\":\"heldRange\""));
        let back: HitObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ho);
    }

    #[test]
    fn test_position_defaults_when_missing() {
        let ho: HitObject =
            serde_json::from_str(r#"{"startTime":5,"endTime":5,"kind":"point"}"#).unwrap();
        assert_eq!(ho.position, Position::default());
    }
}
