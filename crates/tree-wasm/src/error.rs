use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a scene could not be mounted. Never shown to the viewer; logged and
/// turned into "no animation".
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id '{0}'")]
    CanvasNotFound(String),
    #[error("element '{0}' is not a <canvas>")]
    NotACanvas(String),
    #[error("2D drawing context unavailable")]
    NoContext,
    #[error("failed to schedule the first frame")]
    Schedule,
}

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
