//! The scene: owned particle state plus the per-frame plan.
//!
//! `Scene::frame` is the only place that mutates particles. It advances the
//! clock, integrates the snow, and returns a [`FramePlan`] describing every
//! layer back to front. Painting the plan is the caller's job.

use crate::clock::{AnimationClock, FrameTime, StrokeReveal};
use crate::config::SceneConfig;
use crate::convoy::ConvoyPose;
use crate::garland::{self, GarlandLight, LightSprite};
use crate::outline::{self, TreeFrame};
use crate::snow::{self, Snowflake};
use crate::star;
use crate::surface::Surface;
use kurbo::{BezPath, Point};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Smallest and largest greeting font size, logical pixels.
pub const GREETING_FONT_MIN: f64 = 28.0;
pub const GREETING_FONT_MAX: f64 = 52.0;

/// Greeting font size for a viewport width.
pub fn greeting_font_size(width: f64) -> f64 {
    (width * 0.045).clamp(GREETING_FONT_MIN, GREETING_FONT_MAX)
}

/// Centered greeting line.
#[derive(Debug, Clone, PartialEq)]
pub struct Greeting {
    pub text: &'static str,
    pub font: String,
    pub x: f64,
    pub y: f64,
}

/// Radial vignette geometry, centered on the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vignette {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Everything needed to paint one frame, back to front.
#[derive(Debug, Clone)]
pub struct FramePlan<'a> {
    pub config: &'a SceneConfig,
    pub time: FrameTime,
    pub width: f64,
    pub height: f64,
    pub vignette: Vignette,
    pub greeting: Greeting,
    pub outline: BezPath,
    pub reveal: StrokeReveal,
    pub snow: &'a [Snowflake],
    pub lights: Vec<LightSprite>,
    pub star: BezPath,
    pub convoy: Option<ConvoyPose>,
}

pub struct Scene {
    config: SceneConfig,
    surface: Surface,
    clock: AnimationClock,
    snow: Vec<Snowflake>,
    garland: Vec<GarlandLight>,
    rng: Xoshiro256PlusPlus,
}

impl Scene {
    /// Initialize particles for `surface`. `start_ms` is the host timestamp
    /// the animation counts from.
    pub fn new(config: SceneConfig, surface: Surface, start_ms: f64, seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let snow = snow::spawn(&config, &mut rng);
        let garland = garland::layout(&config, surface.width, surface.height, &mut rng);
        log::debug!(
            "scene '{}' initialized: {} flakes, {} lights",
            config.variant.name(),
            snow.len(),
            garland.len()
        );
        Self {
            config,
            surface,
            clock: AnimationClock::new(start_ms),
            snow,
            garland,
            rng,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn snow(&self) -> &[Snowflake] {
        &self.snow
    }

    pub fn garland(&self) -> &[GarlandLight] {
        &self.garland
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// Record new viewport metrics; the next frame lays out against them.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.surface.resize(width, height, dpr);
    }

    /// Advance to `now_ms` and describe the frame to paint.
    pub fn frame(&mut self, now_ms: f64) -> FramePlan<'_> {
        let time = self.clock.tick(now_ms);
        let Surface { width, height, .. } = self.surface;
        let elapsed = time.elapsed_ms;

        for flake in &mut self.snow {
            flake.step(time, width, height, self.config.snow_sway, &mut self.rng);
        }

        let lights = self
            .garland
            .iter()
            .enumerate()
            .map(|(idx, light)| light.sprite(idx, elapsed))
            .collect();

        let tree = TreeFrame::new(width, height);
        let convoy = if self.config.convoy {
            ConvoyPose::at(&self.config, width, height, elapsed)
        } else {
            None
        };

        log::trace!(
            "frame {} at {:.0}ms (dt {:.4}s)",
            self.clock.frames(),
            elapsed,
            time.dt
        );

        FramePlan {
            config: &self.config,
            time,
            width,
            height,
            vignette: Vignette {
                center: Point::new(width / 2.0, height / 2.0),
                inner_radius: width.min(height) * 0.2,
                outer_radius: width.max(height) * 0.75,
            },
            greeting: Greeting {
                text: self.config.greeting,
                font: format!(
                    "{:.1}px {}",
                    greeting_font_size(width),
                    self.config.greeting_font_family
                ),
                x: width / 2.0,
                y: height * 0.07,
            },
            outline: outline::build(&self.config, width, height, elapsed),
            reveal: StrokeReveal::at(elapsed, self.config.reveal_ms, self.config.reveal_dash),
            snow: &self.snow,
            lights,
            star: star::path(Point::new(tree.cx, height * 0.075), self.config.star_size),
            convoy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;

    #[test]
    fn font_size_is_clamped() {
        assert_eq!(greeting_font_size(300.0), 28.0);
        assert!((greeting_font_size(1000.0) - 45.0).abs() < 1e-9);
        assert_eq!(greeting_font_size(4000.0), 52.0);
    }

    #[test]
    fn classic_scene_has_no_convoy() {
        let config = SceneConfig::for_variant(Variant::Classic);
        let mut scene = Scene::new(config, Surface::new(1200.0, 800.0, 1.0), 0.0, 9);
        for t in [16.0, 5_000.0, 20_000.0] {
            assert!(scene.frame(t).convoy.is_none());
        }
    }

    #[test]
    fn convoy_scene_flies_the_sleigh() {
        let config = SceneConfig::for_variant(Variant::Convoy);
        let mut scene = Scene::new(config, Surface::new(1200.0, 800.0, 1.0), 0.0, 9);
        assert!(scene.frame(1_000.0).convoy.is_some());
    }

    #[test]
    fn greeting_is_centered_near_the_top() {
        let mut scene = Scene::new(SceneConfig::default(), Surface::new(1000.0, 800.0, 1.0), 0.0, 4);
        let greeting = scene.frame(16.0).greeting;
        assert_eq!(greeting.text, "Merry Christmas em Loan");
        assert_eq!(greeting.x, 500.0);
        assert!((greeting.y - 56.0).abs() < 1e-9);
        assert!(greeting.font.starts_with("45.0px "), "font {}", greeting.font);
    }

    #[test]
    fn frames_are_counted() {
        let mut scene = Scene::new(SceneConfig::default(), Surface::default(), 0.0, 1);
        scene.frame(16.0);
        scene.frame(32.0);
        assert_eq!(scene.frames(), 2);
    }
}
