//! The burn scene and everything around it

pub mod absolve;
pub mod camera;
pub mod config;
pub mod fire_scene;
pub mod head;
pub mod light;
pub mod overlay;
pub mod viewport;

pub use absolve::{
    AbsolveState, AbsolveTransition, Cleared, BURN_CAPTION, BURN_DURATION, CANCEL_LABEL, CONFIRM_LABEL,
    CONFIRM_PROMPT,
};
pub use camera::OrthographicCamera;
pub use config::{ConfigError, DensityTable, FireLightConfig, SceneConfig, TierCounts};
pub use fire_scene::{FireEffectScene, SceneFrame};
pub use head::{
    head_yaw, placeholder_head, render_head, HeadRender, ModelLoadError, ModelLoader, MODEL_PATH, MODEL_SCALE,
};
pub use light::{AmbientLight, FireLight, PointLightState};
pub use overlay::{DisplaySurface, FireOverlay, SceneClock};
pub use viewport::{zoom_for_width, DensityTier, ViewportAdapter, ViewportChange, ViewportProfile};
