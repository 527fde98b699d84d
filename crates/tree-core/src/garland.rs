//! Garland lights spiraling down the tree.

use crate::color::Color;
use crate::config::SceneConfig;
use crate::outline::TreeFrame;
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// A light placed once on the spiral. Only its rendered pulse changes.
#[derive(Debug, Clone, PartialEq)]
pub struct GarlandLight {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Color,
    pub phase: f64,
}

/// What to draw for one light on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSprite {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
    pub color: Color,
}

impl GarlandLight {
    /// Pulsed radius and opacity at `elapsed_ms` for the light at `index`.
    pub fn sprite(&self, index: usize, elapsed_ms: f64) -> LightSprite {
        let pulse = 0.7 + 0.3 * (elapsed_ms * 0.002 + self.phase).sin();
        let alpha = 0.6 + 0.35 * (elapsed_ms * 0.003 + self.phase + index as f64 * 0.07).sin();
        LightSprite {
            x: self.x,
            y: self.y,
            radius: self.size * (0.75 + 0.3 * pulse),
            alpha: alpha.max(0.3),
            color: self.color,
        }
    }
}

/// Palette color for the light at `index`.
pub fn palette_color(palette: &[Color], index: usize) -> Color {
    palette
        .get(index % palette.len().max(1))
        .copied()
        .unwrap_or(Color::WHITE)
}

/// Normalized height of light `index` out of `count` (0 at the apex).
pub fn spiral_t(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

/// Lay out the garland for a viewport. Called once at startup.
pub fn layout<R: Rng + ?Sized>(
    config: &SceneConfig,
    width: f64,
    height: f64,
    rng: &mut R,
) -> Vec<GarlandLight> {
    let frame = TreeFrame::new(width, height);
    let span = frame.base - frame.top;
    let max_radius = (width * 0.22).min(240.0);

    let lights: Vec<GarlandLight> = (0..config.garland_count)
        .map(|i| {
            let t = spiral_t(i, config.garland_count);
            let radius = (1.0 - t) * max_radius + 12.0;
            // Three full turns plus a small extra twist toward the base
            let angle = t * PI * 6.0 + t * 0.8;
            GarlandLight {
                x: frame.cx + angle.cos() * radius * (0.82 + 0.18 * t),
                y: frame.top + t * span,
                size: config.garland_size_min
                    + (1.0 - t) * (config.garland_size_max - config.garland_size_min),
                color: palette_color(&config.garland_palette, i),
                phase: rng.random::<f64>() * TAU,
            }
        })
        .collect();

    log::debug!("garland laid out: {} lights", lights.len());
    lights
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn spiral_runs_from_apex_to_base() {
        let config = SceneConfig::default();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let lights = layout(&config, 1000.0, 800.0, &mut rng);

        let first = &lights[0];
        let last = lights.last().unwrap();
        assert!((first.y - 88.0).abs() < 1e-9);
        assert!((last.y - 688.0).abs() < 1e-9);
        // t = 0: radius = 220 + 12, angle 0, factor 0.82
        assert!((first.x - (500.0 + 232.0 * 0.82)).abs() < 1e-9);
        assert!((first.size - config.garland_size_max).abs() < 1e-12);
        assert!((last.size - config.garland_size_min).abs() < 1e-12);
    }

    #[test]
    fn spiral_radius_is_capped_on_wide_viewports() {
        let config = SceneConfig::default();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
        let lights = layout(&config, 4000.0, 800.0, &mut rng);
        // 0.22 * 4000 = 880, capped to 240; t = 0 adds 12 and the 0.82 factor
        assert!((lights[0].x - (2000.0 + 252.0 * 0.82)).abs() < 1e-9);
        for light in &lights {
            assert!((light.x - 2000.0).abs() <= 252.0 + 1e-9, "x {}", light.x);
        }

        let narrow = layout(&config, 600.0, 800.0, &mut rng);
        // 0.22 * 600 = 132 stays under the cap
        assert!((narrow[0].x - (300.0 + 144.0 * 0.82)).abs() < 1e-9);
    }

    #[test]
    fn single_light_sits_at_the_apex() {
        let mut config = SceneConfig::default();
        config.garland_count = 1;
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(8);
        let lights = layout(&config, 400.0, 400.0, &mut rng);
        assert_eq!(lights.len(), 1);
        assert!(lights[0].y.is_finite());
    }

    #[test]
    fn sprite_alpha_never_drops_below_floor() {
        let light = GarlandLight {
            x: 0.0,
            y: 0.0,
            size: 4.0,
            color: Color::WHITE,
            phase: 0.0,
        };
        for step in 0..500 {
            let s = light.sprite(3, step as f64 * 37.0);
            assert!(s.alpha >= 0.3 && s.alpha <= 0.95 + 1e-12);
            assert!(s.radius >= 4.0 * (0.75 + 0.3 * 0.4) - 1e-9);
            assert!(s.radius <= 4.0 * (0.75 + 0.3 * 1.0) + 1e-9);
        }
    }
}
