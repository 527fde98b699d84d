//! Keeps the canvas backing store in step with the viewport.

use tree_core::Surface;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// Read the viewport in logical pixels and the device pixel ratio.
pub fn read_viewport(window: &Window) -> (f64, f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height, window.device_pixel_ratio())
}

/// Apply `surface` to the canvas: backing size in device pixels, CSS size
/// in logical pixels, and a transform so drawing uses logical units.
pub fn apply(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, surface: &Surface) {
    let (backing_w, backing_h) = surface.backing_size();
    canvas.set_width(backing_w);
    canvas.set_height(backing_h);

    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", surface.width));
    let _ = style.set_property("height", &format!("{}px", surface.height));

    let [a, b, c, d, e, f] = surface.transform();
    let _ = ctx.set_transform(a, b, c, d, e, f);
}
