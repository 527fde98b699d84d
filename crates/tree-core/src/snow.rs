//! Falling snow.
//!
//! Flakes live in normalized viewport coordinates so a resize keeps the
//! field spread across the new window. They are created once and recycled
//! in place when they leave the screen.

use crate::clock::FrameTime;
use crate::config::SceneConfig;
use rand::Rng;
use std::f64::consts::TAU;

/// Horizontal wrap bounds (normalized).
pub const WRAP_LEFT: f64 = -0.1;
pub const WRAP_RIGHT: f64 = 1.1;
/// Width of the random band a wrapped flake re-enters in.
pub const WRAP_JITTER: f64 = 0.1;
/// Depth above the top edge a recycled flake restarts from.
pub const RESPAWN_DEPTH: f64 = 0.25;

/// Angular speed of the lateral sway, radians per millisecond.
const SWAY_RATE: f64 = 0.0012;

#[derive(Debug, Clone, PartialEq)]
pub struct Snowflake {
    /// Normalized horizontal position, kept within `[-0.1, 1.1]`.
    pub x: f64,
    /// Normalized vertical position; negative while above the top edge.
    pub y: f64,
    pub radius: f64,
    /// Fall speed, logical pixels per second.
    pub fall_speed: f64,
    /// Constant horizontal drift, logical pixels per second.
    pub drift: f64,
    pub phase: f64,
}

impl Snowflake {
    pub fn random<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        Self {
            x: rng.random::<f64>(),
            y: rng.random::<f64>(),
            radius: config.snow_min + rng.random::<f64>() * (config.snow_max - config.snow_min),
            fall_speed: config.snow_speed_min
                + rng.random::<f64>() * (config.snow_speed_max - config.snow_speed_min),
            drift: (rng.random::<f64>() - 0.5) * config.snow_drift,
            phase: rng.random::<f64>() * TAU,
        }
    }

    /// Lateral sway velocity at `elapsed_ms`, logical pixels per second.
    pub fn sway(&self, elapsed_ms: f64, amplitude: f64) -> f64 {
        (elapsed_ms * SWAY_RATE + self.phase).sin() * amplitude
    }

    /// Normalized y past which the flake is recycled.
    pub fn bottom_threshold(&self, height: f64) -> f64 {
        if height > 0.0 {
            1.0 + self.radius * 6.0 / height
        } else {
            1.0
        }
    }

    /// Advance by one frame and apply the wrap rules.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        time: FrameTime,
        width: f64,
        height: f64,
        sway_amplitude: f64,
        rng: &mut R,
    ) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let sway = self.sway(time.elapsed_ms, sway_amplitude);
        self.y += (self.fall_speed + self.radius * 4.0) * time.dt / height;
        self.x += (self.drift + sway) * time.dt / width;

        if self.y > self.bottom_threshold(height) {
            // Staggered respawn: [-0.25, 0) so flakes don't arrive as a sheet
            self.y = -RESPAWN_DEPTH + rng.random::<f64>() * RESPAWN_DEPTH;
            self.x = rng.random::<f64>();
        }
        if self.x < WRAP_LEFT {
            self.x = 1.0 + rng.random::<f64>() * WRAP_JITTER;
        } else if self.x > WRAP_RIGHT {
            self.x = -rng.random::<f64>() * WRAP_JITTER;
        }
    }
}

/// Create the fixed snow field.
pub fn spawn<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Vec<Snowflake> {
    (0..config.snow_count)
        .map(|_| Snowflake::random(config, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn flake(x: f64, y: f64) -> Snowflake {
        Snowflake {
            x,
            y,
            radius: 2.0,
            fall_speed: 40.0,
            drift: 0.0,
            phase: 0.0,
        }
    }

    fn frame(dt: f64) -> FrameTime {
        FrameTime {
            elapsed_ms: 0.0,
            dt,
        }
    }

    #[test]
    fn falls_by_speed_plus_radius_term() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut f = flake(0.5, 0.0);
        f.step(frame(0.1), 800.0, 600.0, 0.0, &mut rng);
        // (40 + 2*4) * 0.1 / 600
        assert!((f.y - 0.008).abs() < 1e-12);
        assert_eq!(f.x, 0.5);
    }

    #[test]
    fn recycles_above_the_top_edge() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        for _ in 0..200 {
            let mut f = flake(0.5, 1.05);
            f.step(frame(0.016), 800.0, 600.0, 0.0, &mut rng);
            assert!((-0.25..0.0).contains(&f.y), "respawned at {}", f.y);
            assert!((0.0..1.0).contains(&f.x));
        }
    }

    #[test]
    fn stays_on_screen_just_above_the_threshold() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let mut f = flake(0.5, 1.0);
        f.step(frame(0.0), 800.0, 600.0, 0.0, &mut rng);
        assert_eq!(f.y, 1.0);
    }

    #[test]
    fn wraps_across_the_side_edges() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);

        let mut left = flake(-0.11, 0.5);
        left.step(frame(0.0), 800.0, 600.0, 0.0, &mut rng);
        assert!((1.0..1.1).contains(&left.x), "left wrap landed at {}", left.x);

        let mut right = flake(1.11, 0.5);
        right.step(frame(0.0), 800.0, 600.0, 0.0, &mut rng);
        assert!(right.x <= 0.0 && right.x > -0.1, "right wrap landed at {}", right.x);
    }

    #[test]
    fn empty_viewport_freezes_the_field() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let mut f = flake(0.3, 0.3);
        f.step(frame(0.05), 0.0, 600.0, 18.0, &mut rng);
        assert_eq!(f, flake(0.3, 0.3));
    }
}
