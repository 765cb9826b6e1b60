use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, text_element, ElementBuilder};
use crate::views::shared::button;

/// "Page x of y" con Previous / Next
pub fn render_pagination<P, N>(
    current: usize,
    total: usize,
    has_prev: bool,
    has_next: bool,
    on_prev: P,
    on_next: N,
) -> Result<Element, JsValue>
where
    P: FnMut() + 'static,
    N: FnMut() + 'static,
{
    let prev = button("btn btn-page", "Previous", !has_prev)?;
    let next = button("btn btn-page", "Next", !has_next)?;
    let mut on_prev = on_prev;
    let mut on_next = on_next;
    on_click(&prev, move |_| on_prev())?;
    on_click(&next, move |_| on_next())?;

    let label = format!("Page {} of {}", current, total.max(1));
    Ok(ElementBuilder::new("div")?
        .class("pagination")
        .child(prev)?
        .child(text_element("span", "page-indicator", &label)?)?
        .child(next)?
        .build())
}
