// ============================================================================
// DASHBOARD VIEW - Panel del usuario: reportar, editar, borrar, recientes
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, on_submit, text_element, ElementBuilder};
use crate::models::{CrimeDraft, CrimeReport, CrimeUpdate};
use crate::state::{flash, AppState, BannerKind, EditState};
use crate::utils::RECENT_REPORTS_LIMIT;
use crate::viewmodels::BrowserConfirm;
use crate::views::shared::{
    button, form_field, render_banner, render_form_error, render_header, run_action, status_badge, FieldKind,
};

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [DASHBOARD] render_dashboard()");
    let page = ElementBuilder::new("div")?.class("page dashboard").build();
    append_child(&page, &render_header(state, "Crime Report System", Vec::new())?)?;

    let main = ElementBuilder::new("main")?.class("page-content").build();
    if let Some(banner) = render_banner(state)? {
        append_child(&main, &banner)?;
    }

    // Reportar
    let open = state.panel_open.get();
    let toggle = button("btn btn-primary", if open { "Hide Form" } else { "Report New Crime" }, false)?;
    {
        let state = state.clone();
        on_click(&toggle, move |_| {
            state.panel_open.set(!state.panel_open.get());
            state.clear_form_error();
            crate::rerender_app();
        })?;
    }
    append_child(&main, &toggle)?;

    let editing = state.editing.borrow().clone();
    if open && editing.is_none() {
        append_child(&main, &render_report_form(state)?)?;
    }
    if let Some(edit) = editing {
        append_child(&main, &render_edit_form(state, edit)?)?;
    }

    append_child(&main, &render_recent(state)?)?;
    append_child(&page, &main)?;
    Ok(page)
}

fn render_report_form(state: &AppState) -> Result<Element, JsValue> {
    let loading = state.loading.get();
    let form = ElementBuilder::new("form")?
        .class("card crime-form")
        .child(text_element("h3", "", "Report a Crime")?)?
        .build();
    if let Some(error) = render_form_error(state)? {
        append_child(&form, &error)?;
    }

    let draft = state.crime_draft.clone();
    let current = draft.borrow().clone();
    let fields = [
        ("crime-title", "Crime Title", FieldKind::Text, current.title.clone()),
        ("crime-description", "Description", FieldKind::TextArea, current.description.clone()),
        ("crime-location", "Location", FieldKind::Text, current.location.clone()),
    ];
    for (index, (id, label, kind, value)) in fields.into_iter().enumerate() {
        let draft = draft.clone();
        let field = form_field(id, label, kind, &value, move |v| {
            let mut d = draft.borrow_mut();
            match index {
                0 => d.title = v,
                1 => d.description = v,
                _ => d.location = v,
            }
        })?;
        append_child(&form, &field)?;
    }

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn btn-primary")
        .text(if loading { "Reporting..." } else { "Report Crime" })
        .flag("disabled", loading)?
        .build();
    append_child(&form, &submit)?;

    let state = state.clone();
    on_submit(&form, move || {
        let crimes = state.crimes.clone();
        let draft = state.crime_draft.borrow().clone();
        run_action(&state, async move { crimes.create(&draft).await }, |state, ()| {
            *state.crime_draft.borrow_mut() = CrimeDraft::default();
            state.panel_open.set(false);
            flash(&state.banner, BannerKind::Success, "Crime Reported Successfully");
        });
    })?;
    Ok(form)
}

/// Formulario de edición compartido con el panel admin (`with_status`)
pub fn render_edit_form(state: &AppState, edit: EditState) -> Result<Element, JsValue> {
    render_edit_form_with(state, edit, None)
}

pub fn render_edit_form_with(
    state: &AppState,
    edit: EditState,
    status_select: Option<Element>,
) -> Result<Element, JsValue> {
    let loading = state.loading.get();
    let form = ElementBuilder::new("form")?
        .class("card edit-form")
        .child(text_element("h2", "", "Edit Crime Report")?)?
        .build();
    if let Some(error) = render_form_error(state)? {
        append_child(&form, &error)?;
    }

    let fields = [
        ("edit-title", "Crime Title", FieldKind::Text, edit.draft.title.clone()),
        ("edit-description", "Description", FieldKind::TextArea, edit.draft.description.clone()),
        ("edit-location", "Location", FieldKind::Text, edit.draft.location.clone()),
    ];
    for (index, (id, label, kind, value)) in fields.into_iter().enumerate() {
        let editing = state.editing.clone();
        let field = form_field(id, label, kind, &value, move |v| {
            if let Some(edit) = editing.borrow_mut().as_mut() {
                match index {
                    0 => edit.draft.title = v,
                    1 => edit.draft.description = v,
                    _ => edit.draft.location = v,
                }
            }
        })?;
        append_child(&form, &field)?;
    }
    if let Some(select) = status_select {
        append_child(&form, &select)?;
    }

    let save = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn btn-primary")
        .text("Save Changes")
        .flag("disabled", loading)?
        .build();
    let cancel = button("btn btn-secondary", "Cancel", false)?;
    {
        let state = state.clone();
        on_click(&cancel, move |_| {
            *state.editing.borrow_mut() = None;
            state.clear_form_error();
            crate::rerender_app();
        })?;
    }
    let actions = ElementBuilder::new("div")?
        .class("form-actions")
        .child(save)?
        .child(cancel)?
        .build();
    append_child(&form, &actions)?;

    let state = state.clone();
    on_submit(&form, move || {
        let Some(edit) = state.editing.borrow().clone() else {
            return;
        };
        let crimes = state.crimes.clone();
        run_action(
            &state,
            async move { crimes.update(&edit.crime_id, &edit.draft).await },
            |state, ()| {
                *state.editing.borrow_mut() = None;
                flash(&state.banner, BannerKind::Success, "Crime report updated successfully");
            },
        );
    })?;
    Ok(form)
}

pub fn start_editing(state: &AppState, report: &CrimeReport, include_status: bool) {
    *state.editing.borrow_mut() = Some(EditState {
        crime_id: report.id.clone(),
        draft: CrimeUpdate::from_report(report, include_status),
    });
    state.panel_open.set(false);
    state.clear_form_error();
    crate::rerender_app();
}

pub fn delete_button(state: &AppState, report: &CrimeReport) -> Result<Element, JsValue> {
    let btn = button("btn btn-danger btn-small", "Delete", state.loading.get())?;
    let state = state.clone();
    let report = report.clone();
    on_click(&btn, move |_| {
        let crimes = state.crimes.clone();
        let report = report.clone();
        run_action(
            &state,
            async move { crimes.delete(&report, &BrowserConfirm).await },
            |state, ()| flash(&state.banner, BannerKind::Success, "Crime report deleted successfully"),
        );
    })?;
    Ok(btn)
}

fn render_recent(state: &AppState) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("card recent-crimes")
        .child(text_element("h2", "", "Recent Crime Reports")?)?
        .build();

    let recent = state.crimes.recent(RECENT_REPORTS_LIMIT);
    if recent.is_empty() {
        let text = if state.crimes.list().borrow().is_loaded() {
            "No crime reports yet."
        } else {
            "Loading reports..."
        };
        append_child(&section, &text_element("p", "empty", text)?)?;
        return Ok(section);
    }

    let grid = ElementBuilder::new("div")?.class("crime-grid").build();
    for report in &recent {
        let edit = button("btn btn-primary btn-small", "Edit", false)?;
        {
            let state = state.clone();
            let report = report.clone();
            on_click(&edit, move |_| start_editing(&state, &report, false))?;
        }
        let card = ElementBuilder::new("div")?
            .class("crime-card")
            .child(text_element("h3", "", &report.title)?)?
            .child(text_element("p", "description", &report.description)?)?
            .child(
                ElementBuilder::new("div")?
                    .class("crime-meta")
                    .child(text_element("span", "location", &format!("📍 {}", report.location))?)?
                    .child(status_badge(report.status)?)?
                    .build(),
            )?
            .child(
                ElementBuilder::new("div")?
                    .class("card-actions")
                    .child(edit)?
                    .child(delete_button(state, report)?)?
                    .build(),
            )?
            .build();
        append_child(&grid, &card)?;
    }
    append_child(&section, &grid)?;
    Ok(section)
}
