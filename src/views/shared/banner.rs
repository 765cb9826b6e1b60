use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::text_element;
use crate::state::{AppState, BannerKind};

/// Banner transitorio de la página (o nada)
pub fn render_banner(state: &AppState) -> Result<Option<Element>, JsValue> {
    let banner = state.banner.borrow();
    let Some(current) = banner.current() else {
        return Ok(None);
    };
    let class = match current.kind {
        BannerKind::Success => "banner banner-success",
        BannerKind::Error => "banner banner-error",
    };
    text_element("div", class, &current.message).map(Some)
}

/// Error persistente junto al formulario
pub fn render_form_error(state: &AppState) -> Result<Option<Element>, JsValue> {
    match state.form_error.borrow().as_deref() {
        Some(message) => text_element("div", "form-error", message).map(Some),
        None => Ok(None),
    }
}
