// ============================================================================
// STATUS VIEW - Diagnóstico de conexión con el backend (pública)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{text_element, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::ApiStatus;

pub fn render_status(state: &AppState) -> Result<Element, JsValue> {
    let status = state.api_status.borrow().clone();
    let class = match status {
        ApiStatus::Checking => "status-message status-checking",
        ApiStatus::Connected { .. } => "status-message status-connected",
        ApiStatus::Disconnected => "status-message status-disconnected",
    };
    let base_url = state.api.base_url();

    let card = ElementBuilder::new("div")?
        .class("card status-card")
        .child(text_element("h1", "", "Backend API Status")?)?
        .child(text_element("p", class, &status.message(base_url))?)?
        .child(text_element("p", "status-url", &format!("API URL: {}", base_url))?)?
        .child(
            ElementBuilder::new("a")?
                .class("btn btn-primary")
                .attr("href", "#/login")?
                .text("Go to Login")
                .build(),
        )?
        .build();

    Ok(ElementBuilder::new("div")?.class("page status-page").child(card)?.build())
}
