use crate::error::{with_last_error_mut, DefaultFxError, FxError, FxErrorCode};
use crate::instance::FxSceneInstance;
use absolution_fx_core::FireEffectScene;
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FxError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FxError) -> FxErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result and return its code.
pub(crate) fn track_result<T>(result: Result<T, DefaultFxError>) -> Result<T, FxErrorCode> {
    result.map_err(|e| track_error(&e))
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FxErrorCode::Ok;
    });
}

/// Run `f`, recording its error or clearing the last one on success.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> FxErrorCode
where
    F: FnOnce() -> Result<(), DefaultFxError>,
{
    match f() {
        Ok(()) => {
            clear_last_error();
            FxErrorCode::Ok
        }
        Err(e) => track_error(&e),
    }
}

/// Borrow the instance behind `ptr`, rejecting null.
pub(crate) fn instance_from_ptr<'a>(
    ptr: *const FxSceneInstance,
) -> Result<&'a FxSceneInstance, DefaultFxError> {
    // SAFETY: non-null pointers come from `fx_scene_new` per the API contract
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultFxError::null_pointer("ptr"))
}

/// Run `f` under the scene read lock.
pub(crate) fn with_scene<F, T>(instance: &FxSceneInstance, f: F) -> Result<T, DefaultFxError>
where
    F: FnOnce(&FireEffectScene) -> T,
{
    let scene = instance
        .scene
        .read()
        .map_err(|_| DefaultFxError::lock_poisoned("scene"))?;
    Ok(f(&scene))
}

/// Run `f` under the scene write lock.
pub(crate) fn with_scene_mut<F, T>(instance: &FxSceneInstance, f: F) -> Result<T, DefaultFxError>
where
    F: FnOnce(&mut FireEffectScene) -> T,
{
    let mut scene = instance
        .scene
        .write()
        .map_err(|_| DefaultFxError::lock_poisoned("scene"))?;
    Ok(f(&mut scene))
}
