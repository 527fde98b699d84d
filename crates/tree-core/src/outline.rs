//! Tree silhouette.
//!
//! The outline is rebuilt every frame from the viewport and elapsed time.
//! Tiers are joined by quadratic curves whose control points alternate
//! between a tall and a short lift, which gives the branches their uneven
//! look. Wind is applied per [`SwayStrategy`].

use crate::config::{SceneConfig, SwayStrategy};
use kurbo::{Affine, BezPath, Point};
use std::f64::consts::PI;

/// One branch tier: height as a fraction of the viewport, half-width as a
/// fraction of the tree width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub height: f64,
    pub spread: f64,
}

pub const TIERS: [Tier; 5] = [
    Tier { height: 0.18, spread: 0.20 },
    Tier { height: 0.32, spread: 0.30 },
    Tier { height: 0.46, spread: 0.40 },
    Tier { height: 0.60, spread: 0.50 },
    Tier { height: 0.74, spread: 0.56 },
];

/// Sideways travel of the lowest tier under branch sway, logical pixels.
const BRANCH_AMPLITUDE: f64 = 16.0;
const LIFT_TALL: f64 = 28.0;
const LIFT_SHORT: f64 = 18.0;

/// Anchor points of the tree for a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeFrame {
    pub cx: f64,
    pub top: f64,
    pub base: f64,
    pub width: f64,
    pub height: f64,
}

impl TreeFrame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            cx: width / 2.0,
            top: height * 0.11,
            base: height * 0.86,
            width: (width * 0.48).min(520.0),
            height,
        }
    }

    pub fn apex(&self) -> Point {
        Point::new(self.cx, self.top)
    }

    /// Rotation pivot used by the rigid sway.
    pub fn pivot(&self) -> Point {
        Point::new(self.cx, self.height * 0.5)
    }
}

/// Horizontal offsets applied to control and end points for one frame.
#[derive(Debug, Clone, Copy, Default)]
struct SwayOffsets {
    apex: f64,
    tiers: [f64; TIERS.len()],
    base: f64,
}

impl SwayOffsets {
    fn branch(elapsed_ms: f64, speed: f64) -> Self {
        let phase = elapsed_ms * speed;
        let mut tiers = [0.0; TIERS.len()];
        for (idx, offset) in tiers.iter_mut().enumerate() {
            // Lower tiers swing wider than the ones near the apex
            let local_amp = BRANCH_AMPLITUDE * (1.0 - idx as f64 / (TIERS.len() + 1) as f64);
            *offset = (phase + idx as f64 * 0.9).sin() * local_amp;
        }
        Self {
            apex: phase.sin() * BRANCH_AMPLITUDE * 0.35,
            tiers,
            base: (phase + PI / 3.0).sin() * BRANCH_AMPLITUDE * 0.3,
        }
    }
}

/// Rotation (radians) of the rigid sway at `elapsed_ms`.
pub fn rigid_angle(elapsed_ms: f64, speed: f64, amplitude: f64) -> f64 {
    (elapsed_ms * speed).sin() * amplitude
}

/// Build the closed outline for the current frame.
pub fn build(config: &SceneConfig, width: f64, height: f64, elapsed_ms: f64) -> BezPath {
    let frame = TreeFrame::new(width, height);
    match config.sway {
        SwayStrategy::BranchSway => {
            trace(&frame, &SwayOffsets::branch(elapsed_ms, config.sway_speed))
        }
        SwayStrategy::RigidRotation => {
            let mut path = trace(&frame, &SwayOffsets::default());
            let angle = rigid_angle(elapsed_ms, config.sway_speed, config.sway_amplitude);
            path.apply_affine(Affine::rotate_about(angle, frame.pivot()));
            path
        }
    }
}

fn trace(frame: &TreeFrame, sway: &SwayOffsets) -> BezPath {
    let TreeFrame {
        cx,
        base,
        width,
        height,
        ..
    } = *frame;
    let mut path = BezPath::new();
    path.move_to(frame.apex());

    for (idx, tier) in TIERS.iter().enumerate() {
        let y = height * tier.height;
        let offset = sway.tiers[idx];
        let lift = if idx % 2 == 0 { LIFT_TALL } else { LIFT_SHORT };
        let left = cx - width * tier.spread + offset;
        let right = cx + width * tier.spread + offset;

        path.quad_to((cx + sway.apex * 0.6, y - lift), (left, y));
        path.quad_to((cx + sway.apex * 0.4, y + lift), (right, y));
    }

    // Base flourish
    let b = sway.base;
    path.quad_to((cx + b, base - 10.0), (cx + width * 0.2 + b, base));
    path.quad_to((cx + b * 0.6, base + 12.0), (cx - width * 0.2 + b, base));
    path.quad_to((cx, base - 10.0), (cx, base - 4.0));
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use kurbo::{PathEl, Shape};

    #[test]
    fn branch_sway_stays_within_tier_amplitude() {
        for step in 0..400 {
            let sway = SwayOffsets::branch(step as f64 * 25.0, 0.0016);
            for (idx, offset) in sway.tiers.iter().enumerate() {
                let local_amp = BRANCH_AMPLITUDE * (1.0 - idx as f64 / 6.0);
                assert!(offset.abs() <= local_amp + 1e-9);
            }
        }
        // At t = 0 only the phase-shifted tiers are displaced
        let sway = SwayOffsets::branch(0.0, 0.0016);
        assert_eq!(sway.tiers[0], 0.0);
        assert!(sway.tiers[1] > 0.0);
    }

    #[test]
    fn rigid_sway_keeps_tier_shape() {
        let config = SceneConfig::for_variant(Variant::Classic);
        let still = build(&config, 800.0, 600.0, 0.0);
        let quarter = std::f64::consts::FRAC_PI_2 / config.sway_speed;
        let tilted = build(&config, 800.0, 600.0, quarter);

        // Rotation preserves the outline's perimeter
        let a = still.perimeter(1e-6);
        let b = tilted.perimeter(1e-6);
        assert!((a - b).abs() < 1e-3, "perimeter changed: {a} vs {b}");
        assert_ne!(still.elements(), tilted.elements());
    }

    #[test]
    fn rigid_sway_rotates_about_the_pivot() {
        let config = SceneConfig::for_variant(Variant::Classic);
        let (w, h) = (800.0, 600.0);
        let frame = TreeFrame::new(w, h);
        let pivot = frame.pivot();
        assert_eq!(pivot, Point::new(400.0, 300.0));

        let quarter = std::f64::consts::FRAC_PI_2 / config.sway_speed;
        let angle = rigid_angle(quarter, config.sway_speed, config.sway_amplitude);
        assert!((angle - config.sway_amplitude).abs() < 1e-12);

        let rotation = Affine::rotate_about(angle, pivot);
        let moved = rotation * pivot;
        assert!((moved - pivot).hypot() < 1e-9, "pivot drifted to {moved:?}");

        let tilted = build(&config, w, h, quarter);
        let expected_apex = rotation * frame.apex();
        match tilted.elements()[0] {
            PathEl::MoveTo(p) => {
                assert!((p - expected_apex).hypot() < 1e-9, "apex at {p:?}");
                assert!((p - frame.apex()).hypot() > 1.0, "apex did not move");
            }
            ref other => panic!("outline must start with move_to, got {other:?}"),
        }

        // Every point of the tilted outline is the still outline rotated
        let still = build(&config, w, h, 0.0);
        let rotated: Vec<PathEl> = still.elements().iter().map(|el| rotation * *el).collect();
        for (got, want) in tilted.elements().iter().zip(&rotated) {
            let pts = |el: &PathEl| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => vec![p],
                PathEl::QuadTo(a, b) => vec![a, b],
                PathEl::CurveTo(a, b, c) => vec![a, b, c],
                PathEl::ClosePath => vec![],
            };
            for (g, e) in pts(got).into_iter().zip(pts(want)) {
                assert!((g - e).hypot() < 1e-9, "{g:?} != {e:?}");
            }
        }
    }

    #[test]
    fn path_starts_at_the_apex() {
        let config = SceneConfig::default();
        let path = build(&config, 1024.0, 768.0, 1234.0);
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(512.0, 768.0 * 0.11)));
    }

    #[test]
    fn tree_width_is_capped() {
        assert_eq!(TreeFrame::new(4000.0, 1000.0).width, 520.0);
        assert!((TreeFrame::new(500.0, 1000.0).width - 240.0).abs() < 1e-9);
    }
}
