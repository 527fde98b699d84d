//! WASM bridge for the tree scene. Mounts the animation on a `<canvas>`
//! and drives it from `requestAnimationFrame`.
//!
//! Compiled via `wasm-pack build --target web`.

mod error;
mod render2d;
mod surface;

pub use error::MountError;

use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{Scene, SceneConfig, Surface, Variant};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

type FrameCallback = Closure<dyn FnMut(f64)>;
type ResizeCallback = Closure<dyn FnMut()>;

/// Everything one running scene touches between frames.
struct Stage {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scene: Scene,
    running: bool,
    /// Id of the pending animation frame, if any.
    pending: Option<i32>,
}

impl Stage {
    fn sync_surface(&mut self) {
        let (w, h, dpr) = surface::read_viewport(&self.window);
        self.scene.resize(w, h, dpr);
        surface::apply(&self.canvas, &self.ctx, self.scene.surface());
    }

    fn paint(&mut self, now_ms: f64) {
        // Other page code may have touched the context since the last frame
        let [a, b, c, d, e, f] = self.scene.surface().transform();
        let _ = self.ctx.set_transform(a, b, c, d, e, f);
        let drawable = self.scene.surface().is_drawable();
        let plan = self.scene.frame(now_ms);
        if drawable {
            render2d::render_frame(&self.ctx, &plan);
        }
    }
}

// ─── Startup ─────────────────────────────────────────────────────────────

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // A second init (module re-instantiated) keeps the first logger.
    let _ = console_log::init_with_level(level);
    log::info!("tree-wasm {} loaded", env!("CARGO_PKG_VERSION"));
}

/// Start the animation on the canvas with id `canvas_id`.
///
/// Returns `None` when the page has no such canvas or no 2D context; the
/// reason goes to the console and nothing is drawn.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, variant: &str) -> Option<TreeScene> {
    match TreeScene::mount(canvas_id, Variant::from_name(variant)) {
        Ok(scene) => Some(scene),
        Err(err) => {
            log::warn!("tree scene not started: {err}");
            None
        }
    }
}

/// Names accepted by [`mount`], as a JSON array.
#[wasm_bindgen]
pub fn variants() -> String {
    let names: Vec<&str> = Variant::ALL.iter().map(|v| v.name()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}

/// Resolved configuration for `variant`, as JSON.
#[wasm_bindgen]
pub fn config_json(variant: &str) -> String {
    let config = SceneConfig::for_variant(Variant::from_name(variant));
    serde_json::to_string(&config).unwrap_or_else(|_| "{}".to_string())
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ─── Running scene ───────────────────────────────────────────────────────

/// Handle to a mounted scene. Dropping it (or `free()` from JS) stops the
/// animation and detaches every listener.
#[wasm_bindgen]
pub struct TreeScene {
    stage: Rc<RefCell<Stage>>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    resize: Option<ResizeCallback>,
    variant: Variant,
}

impl TreeScene {
    fn mount(canvas_id: &str, variant: Variant) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| MountError::CanvasNotFound(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MountError::NotACanvas(canvas_id.to_string()))?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(MountError::NoContext)?;

        let (w, h, dpr) = surface::read_viewport(&window);
        let start_ms = window.performance().map(|p| p.now()).unwrap_or(0.0);
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let scene = Scene::new(
            SceneConfig::for_variant(variant),
            Surface::new(w, h, dpr),
            start_ms,
            seed,
        );
        surface::apply(&canvas, &ctx, scene.surface());

        let stage = Rc::new(RefCell::new(Stage {
            window: window.clone(),
            canvas,
            ctx,
            scene,
            running: true,
            pending: None,
        }));

        let resize = Self::listen_for_resize(&window, &stage);
        let frame = Self::frame_loop(&stage);

        let mut handle = TreeScene {
            stage,
            frame,
            resize,
            variant,
        };
        if let Err(err) = handle.request_frame() {
            handle.stop();
            return Err(err);
        }

        log::info!(
            "tree scene '{}' mounted on #{canvas_id} ({w}x{h} @{dpr})",
            variant.name()
        );
        Ok(handle)
    }

    fn listen_for_resize(window: &Window, stage: &Rc<RefCell<Stage>>) -> Option<ResizeCallback> {
        let stage = stage.clone();
        let callback: ResizeCallback = Closure::new(move || {
            if let Ok(mut stage) = stage.try_borrow_mut() {
                stage.sync_surface();
            }
        });
        match window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
        {
            Ok(()) => Some(callback),
            Err(_) => {
                log::warn!("resize listener not attached; canvas keeps its initial size");
                None
            }
        }
    }

    /// Build the self-rescheduling frame callback. The closure holds a
    /// handle to its own slot; `stop` empties the slot to break the cycle.
    fn frame_loop(stage: &Rc<RefCell<Stage>>) -> Rc<RefCell<Option<FrameCallback>>> {
        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let own_slot = slot.clone();
        let stage = stage.clone();

        let callback: FrameCallback = Closure::new(move |now_ms: f64| {
            let mut stage = stage.borrow_mut();
            stage.pending = None;
            if !stage.running {
                return;
            }
            stage.paint(now_ms);

            let next = own_slot.borrow();
            if let Some(cb) = next.as_ref() {
                match stage.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => stage.pending = Some(id),
                    Err(_) => {
                        log::error!("requestAnimationFrame failed; animation halted");
                        stage.running = false;
                    }
                }
            }
        });
        *slot.borrow_mut() = Some(callback);
        slot
    }

    fn request_frame(&mut self) -> Result<(), MountError> {
        let slot = self.frame.borrow();
        let cb = slot.as_ref().ok_or(MountError::Schedule)?;
        let mut stage = self.stage.borrow_mut();
        let id = stage
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|_| MountError::Schedule)?;
        stage.pending = Some(id);
        Ok(())
    }
}

#[wasm_bindgen]
impl TreeScene {
    /// Cancel the pending frame and remove the resize listener. Idempotent.
    pub fn stop(&mut self) {
        let Ok(mut stage) = self.stage.try_borrow_mut() else {
            return;
        };
        let was_running = stage.running;
        stage.running = false;
        if let Some(id) = stage.pending.take() {
            let _ = stage.window.cancel_animation_frame(id);
        }
        if let Some(cb) = self.resize.take() {
            let _ = stage
                .window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        }
        drop(stage);
        self.frame.borrow_mut().take();

        if was_running {
            log::info!("tree scene '{}' stopped", self.variant.name());
        }
    }

    pub fn is_running(&self) -> bool {
        self.stage.borrow().running
    }

    /// Frames painted since mount.
    pub fn frame_count(&self) -> f64 {
        self.stage.borrow().scene.frames() as f64
    }

    pub fn variant(&self) -> String {
        self.variant.name().to_string()
    }
}

impl Drop for TreeScene {
    fn drop(&mut self) {
        self.stop();
    }
}
