//! C interface to the burn scene
//!
//! Hosts create an opaque [`FxSceneInstance`], tick it with elapsed time,
//! and upload the per-kind instance records it returns. Every function
//! reports failures through [`FxErrorCode`] plus a thread-local message
//! from [`fx_get_last_error`].

mod error;
mod helpers;
mod instance;
mod queries;
mod scene;

pub use error::{fx_get_last_error, fx_get_last_error_code, FxErrorCode};
pub use instance::{fx_scene_destroy, fx_scene_new, FxSceneInstance, FxSceneOptions};
pub use queries::{
    fx_flame_mesh_get, fx_scene_get_camera, fx_scene_get_field_opacity, fx_scene_get_instances,
    fx_scene_get_light, FxCameraState, FxLightState,
};
pub use scene::{fx_scene_resize, fx_scene_tick};
