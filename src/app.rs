// ============================================================================
// APP - Aplicación principal
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::router::current_route;
use crate::state::AppState;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let state = AppState::new();

        match state.session.load() {
            Some(session) => log::info!(
                "💾 [APP] Sesión restaurada: {} ({})",
                session.identity.name,
                session.identity.role.as_str()
            ),
            None => log::info!("💾 [APP] Sin sesión guardada"),
        }

        Ok(Self { state, root })
    }

    /// Re-render completo de la ruta actual
    pub fn render(&mut self) -> Result<(), JsValue> {
        let route = current_route();
        log::debug!("🎬 [APP] render {}", route.path());

        set_inner_html(&self.root, "");
        let view = render_app(&self.state, route)?;
        append_child(&self.root, &view)?;
        Ok(())
    }
}
