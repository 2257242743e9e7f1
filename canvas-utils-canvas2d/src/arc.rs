//! Arc operations using bezier curve approximation.
//!
//! tiny-skia does not support arc primitives directly, so arcs are flattened
//! into cubic bezier curves with kurbo.

use std::f64::consts::TAU;

use crate::geometry::ArcParams;
use tiny_skia::PathBuilder;

/// Bezier approximation tolerance in pixels.
const ARC_TOLERANCE: f64 = 0.1;

/// Signed sweep in radians for an arc from `start` to `end`.
///
/// A span of a full turn or more in either direction draws the whole circle,
/// so `arc(x, y, r, 0, 2π, true)` is a full circle (node-canvas behavior)
/// rather than the empty arc the HTML spec would produce.
pub(crate) fn sweep_angle(start: f64, end: f64, anticlockwise: bool) -> f64 {
    let delta = end - start;
    if delta.abs() >= TAU {
        return if anticlockwise { -TAU } else { TAU };
    }
    if anticlockwise {
        -(-delta).rem_euclid(TAU)
    } else {
        delta.rem_euclid(TAU)
    }
}

/// Append an arc to `path`.
///
/// When `connect` is true the arc is joined to the current point with a
/// straight line, otherwise it starts a new subpath.
pub fn arc(path: &mut PathBuilder, params: &ArcParams, connect: bool) {
    if params.radius <= 0.0 || !params.radius.is_finite() {
        return;
    }

    let start = params.start_angle as f64;
    let sweep = sweep_angle(start, params.end_angle as f64, params.anticlockwise);
    let center = kurbo::Point::new(params.x as f64, params.y as f64);
    let radius = params.radius as f64;

    let arc = kurbo::Arc {
        center,
        radii: kurbo::Vec2::new(radius, radius),
        start_angle: start,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };

    let first = center + kurbo::Vec2::from_angle(start) * radius;
    if connect {
        path.line_to(first.x as f32, first.y as f32);
    } else {
        path.move_to(first.x as f32, first.y as f32);
    }

    arc.to_cubic_beziers(ARC_TOLERANCE, |p1, p2, p3| {
        path.cubic_to(
            p1.x as f32,
            p1.y as f32,
            p2.x as f32,
            p2.y as f32,
            p3.x as f32,
            p3.y as f32,
        );
    });
}

/// Collect the path elements of an arc without a builder, for inspection.
#[cfg(test)]
fn arc_elements(params: &ArcParams) -> Vec<kurbo::PathEl> {
    let start = params.start_angle as f64;
    let arc = kurbo::Arc {
        center: kurbo::Point::new(params.x as f64, params.y as f64),
        radii: kurbo::Vec2::new(params.radius as f64, params.radius as f64),
        start_angle: start,
        sweep_angle: sweep_angle(start, params.end_angle as f64, params.anticlockwise),
        x_rotation: 0.0,
    };
    arc.append_iter(ARC_TOLERANCE).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn params(start: f32, end: f32, anticlockwise: bool) -> ArcParams {
        ArcParams {
            x: 50.0,
            y: 50.0,
            radius: 50.0,
            start_angle: start,
            end_angle: end,
            anticlockwise,
        }
    }

    #[test]
    fn test_full_turn_anticlockwise_is_full_circle() {
        let sweep = sweep_angle(0.0, TAU, true);
        assert_eq!(sweep, -TAU);
    }

    #[test]
    fn test_partial_sweeps() {
        let half = std::f64::consts::PI;
        assert!((sweep_angle(0.0, half, false) - half).abs() < 1e-9);
        assert!((sweep_angle(0.0, half, true) + half).abs() < 1e-9);
        // Clockwise from π/2 back to 0 goes the long way round
        assert!((sweep_angle(half / 2.0, 0.0, false) - 1.5 * half).abs() < 1e-9);
    }

    #[test]
    fn test_arc_full_circle_bounds() {
        let mut builder = PathBuilder::new();
        arc(&mut builder, &params(0.0, 2.0 * PI, true), false);
        let path = builder.finish().unwrap();
        let bounds = path.bounds();
        assert!((bounds.left() - 0.0).abs() < 0.5);
        assert!((bounds.right() - 100.0).abs() < 0.5);
        assert!((bounds.top() - 0.0).abs() < 0.5);
        assert!((bounds.bottom() - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_zero_radius_adds_nothing() {
        let mut builder = PathBuilder::new();
        let mut p = params(0.0, PI, false);
        p.radius = 0.0;
        arc(&mut builder, &p, false);
        assert!(builder.finish().is_none());
    }

    #[test]
    fn test_quarter_arc_is_curved() {
        let els = arc_elements(&params(0.0, PI / 2.0, false));
        assert!(els.iter().any(|el| matches!(el, kurbo::PathEl::CurveTo(..))));
    }
}
