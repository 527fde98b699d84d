//! Canvas2D painter.
//!
//! Takes a [`FramePlan`] from the core scene and draws it layer by layer,
//! back to front, on a `CanvasRenderingContext2d` whose transform already
//! maps logical pixels to device pixels.

use std::f64::consts::TAU;
use tree_core::convoy::{self, ConvoyPose, ReindeerPose};
use tree_core::{BezPath, Color, FramePlan, PathEl, SceneConfig, StrokeReveal};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

const SNOW_ALPHA: f64 = 0.75;
const TEXT_GLOW_BLUR: f64 = 16.0;
const OUTLINE_GLOW_BLUR: f64 = 24.0;
const LIGHT_GLOW_BLUR: f64 = 16.0;
const STAR_GLOW_BLUR: f64 = 18.0;
const SLEIGH_GLOW_BLUR: f64 = 20.0;

/// Paint one frame.
pub fn render_frame(ctx: &CanvasRenderingContext2d, plan: &FramePlan<'_>) {
    let (w, h) = (plan.width, plan.height);
    let config = plan.config;

    ctx.clear_rect(0.0, 0.0, w, h);
    draw_background(ctx, plan, config);
    draw_greeting(ctx, plan, config);
    draw_outline(ctx, plan, config);
    draw_snow(ctx, plan);
    draw_lights(ctx, plan, config);
    draw_star(ctx, &plan.star, config);

    if let Some(ref pose) = plan.convoy {
        draw_convoy(ctx, pose, config);
    }
}

// ─── Layers ──────────────────────────────────────────────────────────────

fn draw_background(ctx: &CanvasRenderingContext2d, plan: &FramePlan<'_>, config: &SceneConfig) {
    let (w, h) = (plan.width, plan.height);

    let bg = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    let _ = bg.add_color_stop(0.0, &config.bg_top.to_css());
    let _ = bg.add_color_stop(1.0, &config.bg_bottom.to_css());
    ctx.set_fill_style_canvas_gradient(&bg);
    ctx.fill_rect(0.0, 0.0, w, h);

    let v = plan.vignette;
    if let Ok(rad) = ctx.create_radial_gradient(
        v.center.x,
        v.center.y,
        v.inner_radius,
        v.center.x,
        v.center.y,
        v.outer_radius,
    ) {
        let _ = rad.add_color_stop(0.0, &Color::TRANSPARENT.to_css());
        let _ = rad.add_color_stop(1.0, &config.vignette.to_css());
        ctx.set_fill_style_canvas_gradient(&rad);
        ctx.fill_rect(0.0, 0.0, w, h);
    }
}

fn draw_greeting(ctx: &CanvasRenderingContext2d, plan: &FramePlan<'_>, config: &SceneConfig) {
    let g = &plan.greeting;
    ctx.save();
    ctx.set_font(&g.font);
    ctx.set_fill_style_str(&config.text_color.to_css());
    ctx.set_text_align("center");
    apply_glow(ctx, config.text_glow, TEXT_GLOW_BLUR);
    let _ = ctx.fill_text(g.text, g.x, g.y);
    ctx.restore();
}

fn draw_outline(ctx: &CanvasRenderingContext2d, plan: &FramePlan<'_>, config: &SceneConfig) {
    ctx.save();
    apply_glow(ctx, config.outline_glow, OUTLINE_GLOW_BLUR);
    ctx.set_stroke_style_str(&config.outline.to_css());
    ctx.set_line_width(config.outline_width);

    match plan.reveal {
        StrokeReveal::Dashed { dash, offset } => {
            set_dash(ctx, &[dash, dash]);
            ctx.set_line_dash_offset(offset);
        }
        StrokeReveal::Solid => set_dash(ctx, &[]),
    }

    trace_path(ctx, &plan.outline);
    ctx.stroke();
    set_dash(ctx, &[]);
    ctx.restore();
}

fn draw_snow(ctx: &CanvasRenderingContext2d, plan: &FramePlan<'_>) {
    let (w, h) = (plan.width, plan.height);
    ctx.save();
    ctx.set_fill_style_str(&Color::WHITE.to_css());
    ctx.set_global_alpha(SNOW_ALPHA);
    for flake in plan.snow {
        ctx.begin_path();
        let _ = ctx.arc(flake.x * w, flake.y * h, flake.radius, 0.0, TAU);
        ctx.fill();
    }
    ctx.restore();
}

fn draw_lights(ctx: &CanvasRenderingContext2d, plan: &FramePlan<'_>, config: &SceneConfig) {
    for light in &plan.lights {
        let color = light.color.to_css();
        ctx.save();
        ctx.set_shadow_color(&color);
        ctx.set_shadow_blur(LIGHT_GLOW_BLUR * config.garland_glow);
        ctx.set_fill_style_str(&color);
        ctx.set_global_alpha(light.alpha);
        ctx.begin_path();
        let _ = ctx.arc(light.x, light.y, light.radius, 0.0, TAU);
        ctx.fill();
        ctx.restore();
    }
}

fn draw_star(ctx: &CanvasRenderingContext2d, star: &BezPath, config: &SceneConfig) {
    ctx.save();
    trace_path(ctx, star);
    ctx.set_fill_style_str(&config.star_color.to_css());
    apply_glow(ctx, config.star_glow, STAR_GLOW_BLUR);
    ctx.fill();
    ctx.restore();
}

// ─── Convoy ──────────────────────────────────────────────────────────────

fn draw_convoy(ctx: &CanvasRenderingContext2d, pose: &ConvoyPose, config: &SceneConfig) {
    ctx.save();
    apply_glow(ctx, config.sleigh_glow, SLEIGH_GLOW_BLUR);
    ctx.set_stroke_style_str(&config.sleigh_color.to_css());
    ctx.set_fill_style_str("rgba(15,23,42,0.85)");
    ctx.set_line_width(2.2);

    trace_path(ctx, &pose.sleigh_body());
    ctx.set_global_alpha(0.9);
    ctx.fill();
    ctx.set_global_alpha(1.0);
    ctx.stroke();

    ctx.set_stroke_style_str("rgba(248,250,252,0.9)");
    trace_path(ctx, &pose.seat_highlight());
    ctx.stroke();

    trace_path(ctx, &pose.runners());
    ctx.stroke();

    trace_path(ctx, &pose.harness());
    ctx.stroke();
    ctx.restore();

    for deer in &pose.reindeer {
        draw_reindeer(ctx, deer);
    }

    draw_trail(ctx, pose);
}

fn draw_reindeer(ctx: &CanvasRenderingContext2d, pose: &ReindeerPose) {
    ctx.save();
    let _ = ctx.translate(pose.x, pose.y);
    let _ = ctx.scale(pose.scale, pose.scale);

    ctx.set_line_width(1.6);
    ctx.set_stroke_style_str("rgba(248,250,252,0.95)");
    ctx.set_fill_style_str("rgba(15,23,42,0.4)");

    let body = convoy::reindeer_body();
    ctx.begin_path();
    let _ = ctx.ellipse(
        body.center().x,
        body.center().y,
        body.radii().x,
        body.radii().y,
        body.rotation(),
        0.0,
        TAU,
    );
    ctx.fill();
    ctx.stroke();

    trace_path(ctx, &convoy::reindeer_neck());
    ctx.stroke();

    let head = convoy::reindeer_head();
    ctx.begin_path();
    let _ = ctx.arc(head.center.x, head.center.y, head.radius, 0.0, TAU);
    ctx.fill();
    ctx.stroke();

    // Glowing nose
    ctx.save();
    let nose = convoy::reindeer_nose();
    ctx.set_fill_style_str("rgba(248,113,113,0.85)");
    ctx.set_shadow_color("rgba(248,113,113,0.9)");
    ctx.set_shadow_blur(8.0);
    ctx.begin_path();
    let _ = ctx.arc(nose.center.x, nose.center.y, nose.radius, 0.0, TAU);
    ctx.fill();
    ctx.restore();

    for strokes in [
        convoy::reindeer_antlers(),
        convoy::reindeer_legs(),
        convoy::reindeer_tail(),
        convoy::reindeer_harness_band(),
    ] {
        trace_path(ctx, &strokes);
        ctx.stroke();
    }

    let bell = convoy::reindeer_bell();
    ctx.save();
    ctx.set_fill_style_str("rgba(250,204,21,0.9)");
    ctx.begin_path();
    let _ = ctx.arc(bell.center.x, bell.center.y, bell.radius, 0.0, TAU);
    ctx.fill();
    ctx.restore();

    ctx.restore();
}

fn draw_trail(ctx: &CanvasRenderingContext2d, pose: &ConvoyPose) {
    let trail = &pose.trail;
    ctx.save();
    let grad = ctx.create_linear_gradient(
        trail.fade_from.x,
        trail.fade_from.y,
        trail.fade_to.x,
        trail.fade_to.y,
    );
    let _ = grad.add_color_stop(0.0, "rgba(56,189,248,0)");
    let _ = grad.add_color_stop(1.0, "rgba(248,250,252,0.7)");
    ctx.set_stroke_style_canvas_gradient(&grad);
    ctx.set_line_width(2.0);
    trace_path(ctx, &trail.path());
    ctx.stroke();
    ctx.restore();
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Replay a kurbo path onto the context as the current path.
fn trace_path(ctx: &CanvasRenderingContext2d, path: &BezPath) {
    ctx.begin_path();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => ctx.close_path(),
        }
    }
}

/// Soft glow via the shadow of the next fill or stroke.
fn apply_glow(ctx: &CanvasRenderingContext2d, color: Color, blur: f64) {
    ctx.set_shadow_color(&color.to_css());
    ctx.set_shadow_blur(blur);
    ctx.set_shadow_offset_x(0.0);
    ctx.set_shadow_offset_y(0.0);
}

fn set_dash(ctx: &CanvasRenderingContext2d, segments: &[f64]) {
    let array = js_sys::Array::new();
    for &s in segments {
        array.push(&JsValue::from_f64(s));
    }
    let _ = ctx.set_line_dash(&array);
}
