//! Scene constants.
//!
//! Everything visual is fixed at compile time. The only choice left is the
//! variant: the classic scene sways the tree as one rigid body, the convoy
//! scene sways each branch tier and flies a sleigh across the sky.

use crate::color::Color;
use serde::Serialize;

// Snow
pub const SNOW_COUNT: usize = 620;
pub const SNOW_MIN_RADIUS: f64 = 1.4;
pub const SNOW_MAX_RADIUS: f64 = 4.2;
pub const SNOW_SPEED_MIN: f64 = 26.0;
pub const SNOW_SPEED_MAX: f64 = 70.0;
pub const SNOW_DRIFT: f64 = 24.0;
pub const SNOW_SWAY: f64 = 18.0;

// Garland
pub const GARLAND_COUNT: usize = 95;
pub const GARLAND_GLOW: f64 = 1.0;
pub const GARLAND_SIZE_MIN: f64 = 2.2;
pub const GARLAND_SIZE_MAX: f64 = 4.4;
pub const GARLAND_PALETTE: [Color; 7] = [
    Color::rgb8(0xEF, 0x44, 0x44),
    Color::rgb8(0xF9, 0x73, 0x16),
    Color::rgb8(0xFA, 0xCC, 0x15),
    Color::rgb8(0x22, 0xC5, 0x5E),
    Color::rgb8(0x06, 0xB6, 0xD4),
    Color::rgb8(0x3B, 0x82, 0xF6),
    Color::rgb8(0xA8, 0x55, 0xF7),
];

// Outline
pub const OUTLINE_WIDTH: f64 = 4.2;
pub const SWAY_AMPLITUDE: f64 = 0.01;
pub const SWAY_SPEED: f64 = 0.0016;
pub const REVEAL_MS: f64 = 3500.0;
pub const REVEAL_DASH: f64 = 3200.0;

// Star
pub const STAR_SIZE: f64 = 18.0;

// Sleigh
pub const SLEIGH_SPEED: f64 = 0.04;
pub const SLEIGH_HEIGHT_RATIO: f64 = 0.24;
pub const SLEIGH_TRAIL_LENGTH: f64 = 260.0;

pub const GREETING: &str = "Merry Christmas em Loan";
pub const GREETING_FONT_FAMILY: &str = "'Segoe Script', 'Pacifico', 'Great Vibes', cursive";

/// How the tree outline moves in the wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwayStrategy {
    /// The whole outline rotates about a pivot near the vertical center.
    RigidRotation,
    /// Each tier shifts sideways on its own phase, less toward the apex.
    BranchSway,
}

/// The two shipped scene configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Classic,
    Convoy,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Classic, Variant::Convoy];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Convoy => "convoy",
        }
    }

    /// Parse a variant name. Unknown names fall back to `Convoy`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" | "rotation" | "rigid" => Variant::Classic,
            _ => Variant::Convoy,
        }
    }
}

/// Visual constants for one scene, read-only for the lifetime of a run.
#[derive(Debug, Clone, Serialize)]
pub struct SceneConfig {
    pub variant: Variant,
    pub sway: SwayStrategy,
    pub convoy: bool,

    pub bg_top: Color,
    pub bg_bottom: Color,
    pub vignette: Color,
    pub outline: Color,
    pub outline_glow: Color,
    pub text_color: Color,
    pub text_glow: Color,
    pub greeting: &'static str,
    pub greeting_font_family: &'static str,

    pub snow_count: usize,
    pub snow_min: f64,
    pub snow_max: f64,
    pub snow_speed_min: f64,
    pub snow_speed_max: f64,
    pub snow_drift: f64,
    pub snow_sway: f64,

    pub garland_palette: Vec<Color>,
    pub garland_count: usize,
    pub garland_glow: f64,
    pub garland_size_min: f64,
    pub garland_size_max: f64,

    pub outline_width: f64,
    pub sway_amplitude: f64,
    pub sway_speed: f64,
    pub reveal_ms: f64,
    pub reveal_dash: f64,

    pub star_size: f64,
    pub star_color: Color,
    pub star_glow: Color,

    pub sleigh_speed: f64,
    pub sleigh_height_ratio: f64,
    pub sleigh_trail_length: f64,
    pub sleigh_color: Color,
    pub sleigh_glow: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Convoy)
    }
}

impl SceneConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let (sway, convoy) = match variant {
            Variant::Classic => (SwayStrategy::RigidRotation, false),
            Variant::Convoy => (SwayStrategy::BranchSway, true),
        };

        Self {
            variant,
            sway,
            convoy,
            bg_top: Color::rgb8(0x03, 0x08, 0x14),
            bg_bottom: Color::rgb8(0x05, 0x0B, 0x17),
            vignette: Color::rgba8(0, 0, 0, 0.35),
            outline: Color::rgb8(0x22, 0xC5, 0x5E),
            outline_glow: Color::rgba8(34, 197, 94, 0.25),
            text_color: Color::rgb8(0xFE, 0xF9, 0xC3),
            text_glow: Color::rgba8(254, 249, 195, 0.55),
            greeting: GREETING,
            greeting_font_family: GREETING_FONT_FAMILY,
            snow_count: SNOW_COUNT,
            snow_min: SNOW_MIN_RADIUS,
            snow_max: SNOW_MAX_RADIUS,
            snow_speed_min: SNOW_SPEED_MIN,
            snow_speed_max: SNOW_SPEED_MAX,
            snow_drift: SNOW_DRIFT,
            snow_sway: SNOW_SWAY,
            garland_palette: GARLAND_PALETTE.to_vec(),
            garland_count: GARLAND_COUNT,
            garland_glow: GARLAND_GLOW,
            garland_size_min: GARLAND_SIZE_MIN,
            garland_size_max: GARLAND_SIZE_MAX,
            outline_width: OUTLINE_WIDTH,
            sway_amplitude: SWAY_AMPLITUDE,
            sway_speed: SWAY_SPEED,
            reveal_ms: REVEAL_MS,
            reveal_dash: REVEAL_DASH,
            star_size: STAR_SIZE,
            star_color: Color::rgb8(0xFA, 0xCC, 0x15),
            star_glow: Color::rgba8(250, 204, 21, 0.75),
            sleigh_speed: SLEIGH_SPEED,
            sleigh_height_ratio: SLEIGH_HEIGHT_RATIO,
            sleigh_trail_length: SLEIGH_TRAIL_LENGTH,
            sleigh_color: Color::rgb8(0xE5, 0xE7, 0xEB),
            sleigh_glow: Color::rgba8(248, 250, 252, 0.6),
        }
    }
}
