// ============================================================================
// ACTIONS - Lanzar acciones async desde la vista
// ============================================================================

use std::future::Future;

use wasm_bindgen_futures::spawn_local;

use crate::router::navigate;
use crate::state::{flash, AppState, BannerKind, ErrorTarget};
use crate::viewmodels::ActionError;

pub fn report_error(state: &AppState, err: &ActionError) {
    log::warn!("⚠️ [ACTION] {}", err);
    match state.place_error(err) {
        ErrorTarget::Banner(message) => flash(&state.banner, BannerKind::Error, message),
        ErrorTarget::Redirect(route) => navigate(route),
        ErrorTarget::Form | ErrorTarget::Silent => {}
    }
}

/// Ejecuta `action` en el hilo de UI. Si al terminar la página ya no está
/// montada, el resultado se descarta pero la página actual se vuelve a
/// pintar: su guard puede estar esperando a que termine esta acción.
pub fn run_action<T, Fut, F>(state: &AppState, action: Fut, on_ok: F)
where
    T: 'static,
    Fut: Future<Output = Result<T, ActionError>> + 'static,
    F: FnOnce(&AppState, T) + 'static,
{
    let state = state.clone();
    let token = state.mount_token();
    state.loading.set(true);
    state.clear_form_error();
    crate::rerender_app();

    spawn_local(async move {
        let result = action.await;
        if !state.is_current(token) {
            log::debug!("🗑️ [ACTION] Resultado descartado, la página ya no está montada");
            crate::rerender_app();
            return;
        }
        state.loading.set(false);
        match result {
            Ok(value) => on_ok(&state, value),
            Err(e) => report_error(&state, &e),
        }
        crate::rerender_app();
    });
}
