// ============================================================================
// APP VIEW - Guard + despacho por ruta
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{text_element, ElementBuilder};
use crate::router::{redirect, Route};
use crate::state::{AppState, GuardState};
use crate::viewmodels::check_api_status;
use crate::views::shared::report_error;
use crate::views::{render_admin_dashboard, render_dashboard, render_login, render_status, render_user_management};

pub fn render_app(state: &AppState, route: Route) -> Result<Element, JsValue> {
    state.mount(route);

    match state.check_access(route) {
        GuardState::Checking => {
            log::debug!("⏳ [APP] {} esperando al proveedor de identidad", route.path());
            Ok(ElementBuilder::new("div")?
                .class("page-loading")
                .child(text_element("p", "", "Checking session...")?)?
                .build())
        }
        denied @ GuardState::Unauthorized => {
            log::info!("🛡️ [APP] Acceso denegado a {}, redirigiendo al login", route.path());
            if let Some(target) = denied.redirect() {
                redirect(target);
            }
            text_element("div", "page-loading", "Redirecting...")
        }
        GuardState::Authorized => {
            if let Some(token) = state.take_initial_load() {
                load_page(state, route, token);
            }
            match route {
                Route::Login => render_login(state),
                Route::Status => render_status(state),
                Route::Dashboard => render_dashboard(state),
                Route::Admin => render_admin_dashboard(state),
                Route::AdminUsers => render_user_management(state),
            }
        }
    }
}

/// Fetch inicial de la página recién montada
fn load_page(state: &AppState, route: Route, token: u64) {
    let state = state.clone();
    spawn_local(async move {
        let result = match route {
            Route::Dashboard | Route::Admin => state.crimes.refresh().await,
            Route::AdminUsers => state.users.refresh().await,
            Route::Status => {
                let status = check_api_status(&state.api).await;
                if state.is_current(token) {
                    *state.api_status.borrow_mut() = status;
                }
                Ok(())
            }
            Route::Login => return,
        };
        if !state.is_current(token) {
            log::debug!("🗑️ [APP] Carga de {} descartada", route.path());
            return;
        }
        if let Err(e) = result {
            report_error(&state, &e);
        }
        crate::rerender_app();
    });
}
