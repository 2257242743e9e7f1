//! Anchor-based placement of boxes.
//!
//! Text and images are drawn from their bottom-left corner (text from its
//! baseline). [`resolve_align`] turns "put this box's top-right corner at
//! (x, y)" into that bottom-left draw origin.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CanvasUtilsError;

/// One of eight reference points on a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterRight,
    BottomRight,
    BottomCenter,
    #[default]
    BottomLeft,
    CenterLeft,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterRight,
        Anchor::BottomRight,
        Anchor::BottomCenter,
        Anchor::BottomLeft,
        Anchor::CenterLeft,
    ];

    /// Numeric code, 1 (`TopLeft`) through 8 (`CenterLeft`), clockwise from the top-left.
    pub fn code(self) -> u8 {
        match self {
            Anchor::TopLeft => 1,
            Anchor::TopCenter => 2,
            Anchor::TopRight => 3,
            Anchor::CenterRight => 4,
            Anchor::BottomRight => 5,
            Anchor::BottomCenter => 6,
            Anchor::BottomLeft => 7,
            Anchor::CenterLeft => 8,
        }
    }

    /// Inverse of [`Anchor::code`]; any other number is `None`.
    pub fn from_code(code: u8) -> Option<Anchor> {
        Anchor::ALL.into_iter().find(|anchor| anchor.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "TOP_LEFT",
            Anchor::TopCenter => "TOP_CENTER",
            Anchor::TopRight => "TOP_RIGHT",
            Anchor::CenterRight => "CENTER_RIGHT",
            Anchor::BottomRight => "BOTTOM_RIGHT",
            Anchor::BottomCenter => "BOTTOM_CENTER",
            Anchor::BottomLeft => "BOTTOM_LEFT",
            Anchor::CenterLeft => "CENTER_LEFT",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `TOP_LEFT`, `top_left` and `top-left` spellings.
impl FromStr for Anchor {
    type Err = CanvasUtilsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == normalized)
            .ok_or_else(|| CanvasUtilsError::UnknownAnchor(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

impl BoxSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Bottom-left draw origin for a `width`×`height` box whose `anchor` point sits at `(x, y)`.
///
/// Screen coordinates: y grows downward, so "top" anchors move the origin down
/// by `height` and "center" anchors move it up by half of it.
pub fn resolve_align(x: f32, y: f32, width: f32, height: f32, anchor: Anchor) -> Point {
    let (real_x, real_y) = match anchor {
        Anchor::TopLeft => (x, y + height),
        Anchor::TopCenter => (x - width * 0.5, y + height),
        Anchor::TopRight => (x - width, y + height),
        Anchor::CenterRight => (x - width, y - height * 0.5),
        Anchor::BottomRight => (x - width, y),
        Anchor::BottomCenter => (x - width * 0.5, y),
        Anchor::BottomLeft => (x, y),
        Anchor::CenterLeft => (x, y - height * 0.5),
    };
    Point::new(real_x, real_y)
}

/// [`resolve_align`] taking the typed point and size.
pub fn resolve_point(at: Point, size: BoxSize, anchor: Anchor) -> Point {
    resolve_align(at.x, at.y, size.width, size.height, anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Anchor::TopLeft, 100.0, 120.0)]
    #[case(Anchor::TopCenter, 80.0, 120.0)]
    #[case(Anchor::TopRight, 60.0, 120.0)]
    #[case(Anchor::CenterRight, 60.0, 90.0)]
    #[case(Anchor::BottomRight, 60.0, 100.0)]
    #[case(Anchor::BottomCenter, 80.0, 100.0)]
    #[case(Anchor::BottomLeft, 100.0, 100.0)]
    #[case(Anchor::CenterLeft, 100.0, 90.0)]
    fn test_resolve_align_table(#[case] anchor: Anchor, #[case] x: f32, #[case] y: f32) {
        assert_eq!(
            resolve_align(100.0, 100.0, 40.0, 20.0, anchor),
            Point::new(x, y)
        );
    }

    #[test]
    fn test_resolve_align_is_pure() {
        for anchor in Anchor::ALL {
            let first = resolve_align(12.5, -3.0, 7.0, 9.0, anchor);
            let second = resolve_align(12.5, -3.0, 7.0, 9.0, anchor);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_zero_size_box_is_identity() {
        for anchor in Anchor::ALL {
            assert_eq!(resolve_align(5.0, 6.0, 0.0, 0.0, anchor), Point::new(5.0, 6.0));
        }
    }

    #[test]
    fn test_resolve_point_matches_scalar_form() {
        let p = resolve_point(Point::new(10.0, 10.0), BoxSize::new(4.0, 2.0), Anchor::TopCenter);
        assert_eq!(p, Point::new(8.0, 12.0));
    }

    #[test]
    fn test_codes_round_trip() {
        for anchor in Anchor::ALL {
            assert_eq!(Anchor::from_code(anchor.code()), Some(anchor));
        }
        assert_eq!(Anchor::from_code(0), None);
        assert_eq!(Anchor::from_code(9), None);
    }

    #[rstest]
    #[case("TOP_RIGHT", Anchor::TopRight)]
    #[case("bottom-center", Anchor::BottomCenter)]
    #[case(" center_left ", Anchor::CenterLeft)]
    fn test_parse_anchor(#[case] input: &str, #[case] expected: Anchor) {
        assert_eq!(input.parse::<Anchor>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_anchor_is_an_error() {
        assert!(matches!(
            "middle".parse::<Anchor>(),
            Err(CanvasUtilsError::UnknownAnchor(name)) if name == "middle"
        ));
    }

    #[test]
    fn test_anchor_serde_names() {
        let json = serde_json::to_string(&Anchor::CenterRight).unwrap();
        assert_eq!(json, "\"CENTER_RIGHT\"");
        let back: Anchor = serde_json::from_str("\"TOP_CENTER\"").unwrap();
        assert_eq!(back, Anchor::TopCenter);
        assert_eq!(Anchor::default(), Anchor::BottomLeft);
    }
}
