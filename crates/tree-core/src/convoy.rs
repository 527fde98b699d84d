//! Sleigh and reindeer flying across the sky.
//!
//! The convoy position is a pure function of elapsed time: it enters from
//! off-screen left, leaves off-screen right and wraps. Shapes are fixed and
//! expressed relative to the sleigh (or, for reindeer, in a local figure
//! space that the painter translates and scales).

use crate::config::SceneConfig;
use kurbo::{BezPath, Circle, Ellipse, Point};

/// Range of the normalized track before it wraps.
pub const TRACK_SPAN: f64 = 1.4;
/// Track start, as a fraction of the viewport width.
pub const TRACK_START: f64 = -0.2;
const TRACK_PHASE: f64 = 0.15;

/// Reindeer harness offsets from the sleigh: (dx, dy, bob multiplier, scale).
pub const HERD: [(f64, f64, f64, f64); 3] = [
    (98.0, -10.0, 1.0, 1.05),
    (122.0, -12.0, 1.3, 0.95),
    (146.0, -14.0, 1.6, 0.88),
];

/// Placement of one reindeer figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReindeerPose {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

/// The fading light streak behind the sleigh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail {
    pub start: Point,
    pub control: Point,
    pub end: Point,
    /// Gradient axis: transparent at `fade_from`, bright at `fade_to`.
    pub fade_from: Point,
    pub fade_to: Point,
}

impl Trail {
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.quad_to(self.control, self.end);
        path
    }
}

/// Convoy placement for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvoyPose {
    /// Normalized position along the track.
    pub track: f64,
    pub x: f64,
    pub sleigh_y: f64,
    pub reindeer: [ReindeerPose; 3],
    pub trail: Trail,
}

/// Normalized track position at `elapsed_ms`, in `[-0.2, 1.2)`.
pub fn track_position(elapsed_ms: f64, speed: f64) -> f64 {
    (elapsed_ms.max(0.0) * 0.001 * speed + TRACK_PHASE).rem_euclid(TRACK_SPAN) + TRACK_START
}

impl ConvoyPose {
    /// Pose at `elapsed_ms`, or `None` while the convoy is off the track.
    pub fn at(config: &SceneConfig, width: f64, height: f64, elapsed_ms: f64) -> Option<Self> {
        let track = track_position(elapsed_ms, config.sleigh_speed);
        if track <= TRACK_START || track >= TRACK_START + TRACK_SPAN {
            return None;
        }

        let base_y = height * config.sleigh_height_ratio + (elapsed_ms * 0.0012).sin() * height * 0.01;
        let sleigh_y = base_y + (elapsed_ms * 0.0015).sin() * height * 0.006;
        let x = width * track;

        let bob = (elapsed_ms * 0.0016).sin() * height * 0.004;
        let reindeer = HERD.map(|(dx, dy, k, scale)| ReindeerPose {
            x: x + dx,
            y: sleigh_y + dy + bob * k,
            scale,
        });

        let trail_start = x - config.sleigh_trail_length * 0.6;
        let trail_end = x - 18.0;
        let trail = Trail {
            start: Point::new(trail_start, sleigh_y - 18.0),
            control: Point::new((trail_start + trail_end) / 2.0, sleigh_y - 38.0),
            end: Point::new(trail_end, sleigh_y - 20.0),
            fade_from: Point::new(trail_start, sleigh_y - 26.0),
            fade_to: Point::new(trail_end, sleigh_y - 16.0),
        };

        Some(Self {
            track,
            x,
            sleigh_y,
            reindeer,
            trail,
        })
    }

    pub fn sleigh_body(&self) -> BezPath {
        let (x, y) = (self.x, self.sleigh_y);
        let mut path = BezPath::new();
        path.move_to((x - 26.0, y + 2.0));
        path.quad_to((x - 16.0, y - 14.0), (x + 4.0, y - 12.0));
        path.quad_to((x + 20.0, y - 10.0), (x + 26.0, y + 4.0));
        path.quad_to((x + 10.0, y + 12.0), (x - 20.0, y + 10.0));
        path.close_path();
        path
    }

    pub fn seat_highlight(&self) -> BezPath {
        let (x, y) = (self.x, self.sleigh_y);
        let mut path = BezPath::new();
        path.move_to((x - 18.0, y));
        path.quad_to((x - 4.0, y - 6.0), (x + 14.0, y - 4.0));
        path
    }

    pub fn runners(&self) -> BezPath {
        let (x, y) = (self.x, self.sleigh_y);
        let mut path = BezPath::new();
        path.move_to((x - 20.0, y + 9.0));
        path.quad_to((x - 10.0, y + 14.0), (x, y + 11.0));
        path.quad_to((x + 10.0, y + 8.0), (x + 18.0, y + 10.0));
        path
    }

    /// Rope from the sleigh to the lead reindeer.
    pub fn harness(&self) -> BezPath {
        let (x, y) = (self.x, self.sleigh_y);
        let mut path = BezPath::new();
        path.move_to((x + 20.0, y - 4.0));
        path.quad_to((x + 60.0, y - 14.0), (x + 98.0, y - 10.0));
        path
    }
}

// ─── Reindeer figure (local space, facing right) ────────────────────────────

pub fn reindeer_body() -> Ellipse {
    Ellipse::new((0.0, -2.0), (11.0, 6.0), 0.0)
}

pub fn reindeer_head() -> Circle {
    Circle::new((13.5, -15.0), 3.2)
}

pub fn reindeer_nose() -> Circle {
    Circle::new((15.2, -15.0), 1.3)
}

pub fn reindeer_bell() -> Circle {
    Circle::new((6.0, -3.0), 1.4)
}

pub fn reindeer_neck() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((4.0, -4.0));
    path.quad_to((10.0, -10.0), (12.0, -14.0));
    path
}

pub fn reindeer_antlers() -> BezPath {
    segments(&[
        ((12.0, -18.0), (10.0, -23.0)),
        ((10.0, -21.0), (7.5, -24.0)),
        ((10.5, -22.5), (12.5, -25.0)),
        ((15.0, -18.2), (17.0, -23.0)),
        ((17.0, -21.0), (19.5, -24.0)),
        ((17.3, -22.8), (15.8, -25.0)),
    ])
}

pub fn reindeer_legs() -> BezPath {
    segments(&[
        ((-4.0, 2.0), (-6.0, 8.0)),
        ((-1.0, 3.0), (-2.0, 9.0)),
        ((3.0, 3.0), (4.0, 9.0)),
        ((7.0, 2.0), (9.0, 8.0)),
    ])
}

pub fn reindeer_tail() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((-10.0, -4.0));
    path.quad_to((-13.0, -7.0), (-11.0, -1.0));
    path
}

pub fn reindeer_harness_band() -> BezPath {
    segments(&[((-2.0, -4.0), (7.0, -5.0))])
}

fn segments(lines: &[((f64, f64), (f64, f64))]) -> BezPath {
    let mut path = BezPath::new();
    for &(from, to) in lines {
        path.move_to(from);
        path.line_to(to);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;

    #[test]
    fn track_starts_inside_and_wraps() {
        assert!((track_position(0.0, 0.04) - (-0.05)).abs() < 1e-12);
        // One full lap takes span / speed seconds
        let lap_ms = TRACK_SPAN / 0.04 * 1000.0;
        let a = track_position(1234.0, 0.04);
        let b = track_position(1234.0 + lap_ms, 0.04);
        assert!((a - b).abs() < 1e-9);
        for step in 0..1000 {
            let t = track_position(step as f64 * 97.0, 0.04);
            assert!((-0.2..1.2).contains(&t));
        }
    }

    #[test]
    fn herd_leads_the_sleigh() {
        let config = SceneConfig::for_variant(Variant::Convoy);
        let pose = ConvoyPose::at(&config, 1000.0, 800.0, 5000.0).unwrap();
        for (deer, (dx, ..)) in pose.reindeer.iter().zip(HERD) {
            assert!((deer.x - pose.x - dx).abs() < 1e-9);
        }
        assert!(pose.trail.start.x < pose.trail.end.x);
        assert!(pose.trail.end.x < pose.x);
    }

    #[test]
    fn sleigh_shapes_follow_the_pose() {
        let config = SceneConfig::for_variant(Variant::Convoy);
        let pose = ConvoyPose::at(&config, 1000.0, 800.0, 0.0).unwrap();
        let first = pose.sleigh_body().elements()[0];
        assert_eq!(
            first,
            kurbo::PathEl::MoveTo(Point::new(pose.x - 26.0, pose.sleigh_y + 2.0))
        );
    }
}
