// ============================================================================
// FORM - Campos y botones reutilizables
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, create_element, on_input_value, set_attribute, set_field_value, ElementBuilder};
use crate::models::CrimeStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    TextArea,
}

/// Label + control. `on_value` recibe cada cambio; no dispara re-render.
pub fn form_field<F>(id: &str, label_text: &str, kind: FieldKind, value: &str, on_value: F) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let group = ElementBuilder::new("div")?.class("form-group").build();
    let label = ElementBuilder::new("label")?.attr("for", id)?.text(label_text).build();

    let control = match kind {
        FieldKind::TextArea => {
            let area = create_element("textarea")?;
            set_attribute(&area, "rows", "4")?;
            area
        }
        FieldKind::Text | FieldKind::Email | FieldKind::Password => {
            let input = create_element("input")?;
            let input_type = match kind {
                FieldKind::Email => "email",
                FieldKind::Password => "password",
                _ => "text",
            };
            set_attribute(&input, "type", input_type)?;
            input
        }
    };
    set_attribute(&control, "id", id)?;
    set_attribute(&control, "name", id)?;
    set_attribute(&control, "placeholder", label_text)?;
    control.set_class_name("form-input");
    set_field_value(&control, value);
    on_input_value(&control, on_value)?;

    append_child(&group, &label)?;
    append_child(&group, &control)?;
    Ok(group)
}

pub fn button(class: &str, text: &str, disabled: bool) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .attr("type", "button")?
        .class(class)
        .text(text)
        .flag("disabled", disabled)?
        .build())
}

pub fn status_badge(status: CrimeStatus) -> Result<Element, JsValue> {
    let class = match status {
        CrimeStatus::Pending => "badge badge-pending",
        CrimeStatus::Investigating => "badge badge-investigating",
        CrimeStatus::Resolved => "badge badge-resolved",
    };
    Ok(ElementBuilder::new("span")?.class(class).text(status.as_str()).build())
}
