pub mod clock;
pub mod color;
pub mod config;
pub mod convoy;
pub mod garland;
pub mod outline;
pub mod scene;
pub mod snow;
pub mod star;
pub mod surface;

pub use clock::{AnimationClock, FrameTime, StrokeReveal};
pub use color::Color;
pub use config::{SceneConfig, SwayStrategy, Variant};
pub use garland::{GarlandLight, LightSprite};
pub use scene::{FramePlan, Greeting, Scene, Vignette};
pub use snow::Snowflake;
pub use surface::Surface;

// Re-export kurbo path types so the bridge can walk outlines without naming kurbo versions
pub use kurbo::{BezPath, PathEl, Point};
