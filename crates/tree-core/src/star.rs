//! The star on top of the tree.

use kurbo::{BezPath, Point, Vec2};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

pub const SPIKES: usize = 5;
/// Inner radius as a fraction of the outer radius.
pub const INNER_RATIO: f64 = 0.48;

/// Star vertices, alternating outer tip and inner notch, starting at the top tip.
pub fn vertices(center: Point, size: f64) -> Vec<Point> {
    let inner = size * INNER_RATIO;
    let mut points = Vec::with_capacity(SPIKES * 2);
    for i in 0..SPIKES {
        let angle = TAU / SPIKES as f64 * i as f64 - FRAC_PI_2;
        let next = angle + PI / SPIKES as f64;
        points.push(center + Vec2::new(angle.cos() * size, angle.sin() * size));
        points.push(center + Vec2::new(next.cos() * inner, next.sin() * inner));
    }
    points
}

/// Closed star outline.
pub fn path(center: Point, size: f64) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in vertices(center, size).into_iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_vertices_alternating_radius() {
        let center = Point::new(100.0, 50.0);
        let pts = vertices(center, 18.0);
        assert_eq!(pts.len(), 10);
        for (i, p) in pts.iter().enumerate() {
            let r = p.distance(center);
            let expected = if i % 2 == 0 { 18.0 } else { 18.0 * INNER_RATIO };
            assert!((r - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn first_tip_points_straight_up() {
        let pts = vertices(Point::new(0.0, 0.0), 10.0);
        assert!(pts[0].x.abs() < 1e-9);
        assert!((pts[0].y + 10.0).abs() < 1e-9);
    }
}
