use absolution_fx_core::{shared_flame_mesh, InstanceRaw, ParticleKind};
use std::ptr;
use std::sync::OnceLock;

use crate::error::{DefaultFxError, FxErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_scene};
use crate::instance::FxSceneInstance;

/// FFI-friendly state of the flickering point light.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FxLightState {
    pub position: [f32; 3],
    /// Linear RGB in `[0, 1]`.
    pub color: [f32; 3],
    pub intensity: f32,
    /// Falloff distance (world units).
    pub distance: f32,
    /// Intensity of the white ambient light.
    pub ambient_intensity: f32,
}

/// FFI-friendly camera state.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FxCameraState {
    /// Column-major projection * view.
    pub view_projection: [f32; 16],
    pub position: [f32; 3],
    /// Pixels per world unit.
    pub zoom: f32,
    /// Visible world-space width.
    pub extent_width: f32,
    /// Visible world-space height.
    pub extent_height: f32,
}

/// Flattened flame geometry shared by every flame instance.
struct FlattenedMesh {
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
}

static FLAME_MESH: OnceLock<FlattenedMesh> = OnceLock::new();

fn flame_mesh() -> &'static FlattenedMesh {
    FLAME_MESH.get_or_init(|| {
        let mesh = shared_flame_mesh();
        FlattenedMesh {
            positions: mesh.positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect(),
            normals: mesh.normals.iter().flat_map(|n| [n.x, n.y, n.z]).collect(),
            indices: mesh.indices.clone(),
        }
    })
}

fn kind_from_u8(kind: u8) -> Result<ParticleKind, DefaultFxError> {
    ParticleKind::from_u8(kind).ok_or_else(|| {
        DefaultFxError::invalid_parameter(format!("unknown particle kind {kind} (0=fire, 1=smoke, 2=ember)"))
    })
}

#[no_mangle]
/// Return a borrowed pointer to the instance records of one particle kind.
///
/// `kind`: 0 = fire, 1 = smoke, 2 = ember. Records are 80 bytes each: a
/// column-major 4x4 model matrix then linear RGB with opacity in the
/// fourth lane.
///
/// The pointer is valid until the next call for the same kind on this
/// instance. **DO NOT FREE THIS POINTER**.
///
/// Returns
/// - `FxErrorCode::Ok` (0) with the array in `out_array` and count in `out_len`
/// - `FxErrorCode::NullPointer` if `ptr`, `out_len`, or `out_array` is null
/// - `FxErrorCode::InvalidParameter` if `kind` is unknown
/// - `FxErrorCode::LockPoisoned` if an internal lock is poisoned
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `fx_scene_new` or null.
/// - `out_len` and `out_array` must be valid, non-null, writable pointers.
pub unsafe extern "C" fn fx_scene_get_instances(
    ptr: *const FxSceneInstance,
    kind: u8,
    out_len: *mut usize,
    out_array: *mut *const InstanceRaw,
) -> FxErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFxError::null_pointer("out_len"));
    }
    if out_array.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultFxError::null_pointer("out_array"));
    }

    let result = handle_ffi_result_error(|| {
        let kind = kind_from_u8(kind)?;
        let instance = instance_from_ptr(ptr)?;
        let mut cache = instance
            .raw_cache
            .lock()
            .map_err(|_| DefaultFxError::lock_poisoned("raw_cache"))?;
        let records = &mut cache[usize::from(kind.as_u8())];

        with_scene(instance, |scene| scene.field(kind).buffer().write_raw(records))?;

        unsafe {
            *out_len = records.len();
            *out_array = records.as_ptr();
        }
        Ok(())
    });

    if result != FxErrorCode::Ok {
        unsafe {
            *out_array = ptr::null();
            *out_len = 0;
        }
    }

    result
}

#[no_mangle]
/// Write the mean opacity of one particle field into `out_opacity`.
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `fx_scene_new` or null.
/// - `out_opacity` must be a valid, non-null pointer to an `f32`.
pub unsafe extern "C" fn fx_scene_get_field_opacity(
    ptr: *const FxSceneInstance,
    kind: u8,
    out_opacity: *mut f32,
) -> FxErrorCode {
    if out_opacity.is_null() {
        return track_error(&DefaultFxError::null_pointer("out_opacity"));
    }

    handle_ffi_result_error(|| {
        let kind = kind_from_u8(kind)?;
        let instance = instance_from_ptr(ptr)?;
        let opacity = with_scene(instance, |scene| scene.field(kind).buffer().opacity)?;
        unsafe {
            *out_opacity = opacity;
        }
        Ok(())
    })
}

#[no_mangle]
/// Fill `out_light` with the point light at the last tick plus the ambient level.
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `fx_scene_new` or null.
/// - `out_light` must be a valid, non-null pointer to an `FxLightState`.
pub unsafe extern "C" fn fx_scene_get_light(
    ptr: *const FxSceneInstance,
    out_light: *mut FxLightState,
) -> FxErrorCode {
    if out_light.is_null() {
        return track_error(&DefaultFxError::null_pointer("out_light"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let state = with_scene(instance, |scene| {
            let light = scene.light();
            FxLightState {
                position: light.position.into(),
                color: light.color.to_unit(),
                intensity: light.intensity,
                distance: light.distance,
                ambient_intensity: scene.ambient().intensity,
            }
        })?;
        unsafe {
            *out_light = state;
        }
        Ok(())
    })
}

#[no_mangle]
/// Fill `out_camera` with the orthographic camera for the current surface.
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `fx_scene_new` or null.
/// - `out_camera` must be a valid, non-null pointer to an `FxCameraState`.
pub unsafe extern "C" fn fx_scene_get_camera(
    ptr: *const FxSceneInstance,
    out_camera: *mut FxCameraState,
) -> FxErrorCode {
    if out_camera.is_null() {
        return track_error(&DefaultFxError::null_pointer("out_camera"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let state = with_scene(instance, |scene| {
            let camera = scene.camera();
            let (extent_width, extent_height) = camera.visible_extent();
            let mut view_projection = [0.0; 16];
            view_projection.copy_from_slice(camera.view_projection().as_slice());
            FxCameraState {
                view_projection,
                position: camera.position.into(),
                zoom: camera.zoom,
                extent_width,
                extent_height,
            }
        })?;
        unsafe {
            *out_camera = state;
        }
        Ok(())
    })
}

#[no_mangle]
/// Borrow the flame mesh every flame instance is drawn with.
///
/// Positions and normals are packed `xyz` floats (`3 * out_vertex_count`
/// each); indices are counter-clockwise triangles. The arrays live for the
/// whole process. **DO NOT FREE THESE POINTERS**.
///
/// # Safety
///
/// All out-pointers must be valid, non-null and writable.
pub unsafe extern "C" fn fx_flame_mesh_get(
    out_positions: *mut *const f32,
    out_normals: *mut *const f32,
    out_vertex_count: *mut usize,
    out_indices: *mut *const u32,
    out_index_count: *mut usize,
) -> FxErrorCode {
    let outputs = [
        (out_positions.is_null(), "out_positions"),
        (out_normals.is_null(), "out_normals"),
        (out_vertex_count.is_null(), "out_vertex_count"),
        (out_indices.is_null(), "out_indices"),
        (out_index_count.is_null(), "out_index_count"),
    ];
    if let Some((_, name)) = outputs.iter().find(|(null, _)| *null) {
        return track_error(&DefaultFxError::null_pointer(name));
    }

    let mesh = flame_mesh();
    unsafe {
        *out_positions = mesh.positions.as_ptr();
        *out_normals = mesh.normals.as_ptr();
        *out_vertex_count = mesh.positions.len() / 3;
        *out_indices = mesh.indices.as_ptr();
        *out_index_count = mesh.indices.len();
    }
    FxErrorCode::Ok
}
