// ============================================================================
// CRIME REPORT ADMIN - FRONTEND MVVM (RUST PURO + WASM)
// ============================================================================
// - Views: funciones que renderizan DOM (sin lógica)
// - ViewModels: estado de página + acciones
// - Services: SOLO comunicación con la API (y el popup de identidad)
// - State: sesión, guard, listas paginadas, banner
// - Models: estructuras compartidas con el backend
// ============================================================================

mod app;
mod config;
mod dom;
mod models;
mod router;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::App;
use crate::config::CONFIG;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!(
        "🚀 Crime Report Admin ({}), API en {}",
        CONFIG.environment,
        CONFIG.api_base_url()
    );

    let mut app = App::new()?;
    app.render()?;
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    // Listener global: se registra UNA sola vez aquí
    if let Some(win) = web_sys::window() {
        let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            rerender_app();
        }) as Box<dyn FnMut(web_sys::Event)>);
        win.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Re-render completo. Si ya hay un render en curso (llamada desde dentro de
/// otro render) se aplaza al siguiente tick.
pub fn rerender_app() {
    APP.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            log::debug!("🔄 [RERENDER] Render en curso, aplazando");
            Timeout::new(0, rerender_app).forget();
            return;
        };
        match slot.as_mut() {
            Some(app) => {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
        }
    });
}
