//! Drawing-surface sizing.
//!
//! The canvas backing store is sized in device pixels while every drawing
//! command is issued in logical (CSS) pixels. `Surface` holds the numbers;
//! the bridge applies them to the real canvas.

/// Viewport size in logical pixels plus the display's pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            dpr: 1.0,
        }
    }
}

impl Surface {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        let mut surface = Self::default();
        surface.resize(width, height, dpr);
        surface
    }

    /// Replace the viewport metrics. Idempotent.
    ///
    /// Pixel ratios below 1 (or missing, reported as 0/NaN) are treated as 1.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.dpr = if dpr.is_finite() { dpr.max(1.0) } else { 1.0 };
        log::debug!(
            "surface resized to {}x{} @{}x",
            self.width,
            self.height,
            self.dpr
        );
    }

    /// Backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round() as u32,
            (self.height * self.dpr).round() as u32,
        )
    }

    /// Uniform scale of the logical→device transform.
    pub fn transform_scale(&self) -> f64 {
        self.dpr
    }

    /// `setTransform` arguments `(a, b, c, d, e, f)`.
    pub fn transform(&self) -> [f64; 6] {
        [self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0]
    }

    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
