//! Scene colors.
//!
//! Canvas2D takes CSS color strings, so colors are kept as 8-bit channels
//! plus an alpha and formatted on demand.

use serde::Serialize;

/// sRGB color with 8-bit channels and a [0.0, 1.0] alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb8(0xFF, 0xFF, 0xFF);
    pub const TRANSPARENT: Color = Color::rgba8(0, 0, 0, 0.0);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color, different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Emit as a CSS color: `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let a = self.a.clamp(0.0, 1.0);
            format!("rgba({},{},{},{a})", self.r, self.g, self.b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_colors_emit_hex() {
        assert_eq!(Color::rgb8(0xEF, 0x44, 0x44).to_css(), "#ef4444");
        assert_eq!(Color::WHITE.to_css(), "#ffffff");
    }

    #[test]
    fn translucent_colors_emit_rgba() {
        let glow = Color::rgba8(34, 197, 94, 0.25);
        assert_eq!(glow.to_css(), "rgba(34,197,94,0.25)");
        assert_eq!(Color::TRANSPARENT.to_css(), "rgba(0,0,0,0)");
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let c = Color::rgb8(250, 204, 21).with_alpha(0.75);
        assert_eq!((c.r, c.g, c.b), (250, 204, 21));
        assert_eq!(c.a, 0.75);
    }
}
