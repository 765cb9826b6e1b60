use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, text_element, ElementBuilder};
use crate::router::{navigate, Route};
use crate::state::AppState;

/// Cabecera de las páginas protegidas: título, saludo, acciones y logout
pub fn render_header(state: &AppState, title: &str, actions: Vec<Element>) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?
        .class("app-header")
        .child(text_element("h1", "app-title", title)?)?
        .build();

    let nav = ElementBuilder::new("div")?.class("header-actions").build();
    if let Some(session) = state.auth.current_session() {
        append_child(&nav, &text_element("span", "welcome", &format!("Welcome, {}", session.identity.name))?)?;
    }
    for action in actions {
        append_child(&nav, &action)?;
    }

    let logout = text_element("button", "btn btn-danger", "Logout")?;
    {
        let state = state.clone();
        on_click(&logout, move |_| {
            state.logout();
            navigate(Route::Login);
        })?;
    }
    append_child(&nav, &logout)?;
    append_child(&header, &nav)?;

    Ok(header)
}
