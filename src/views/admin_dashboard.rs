// ============================================================================
// ADMIN DASHBOARD VIEW - Contadores, analítica y revisión paginada
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_change_value, on_click, set_field_value, text_element, ElementBuilder};
use crate::models::{monthly_counts, CrimeReport, CrimeStatus, StatusBreakdown};
use crate::router::{navigate, Route};
use crate::state::{flash, AppState, BannerKind, ListFilter};
use crate::views::dashboard::{delete_button, render_edit_form_with, start_editing};
use crate::views::shared::{button, render_banner, render_header, render_pagination, run_action, status_badge};

const FILTER_ALL: &str = "all";

pub fn render_admin_dashboard(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [ADMIN] render_admin_dashboard()");
    let manage = button("btn btn-secondary", "Manage Users", false)?;
    on_click(&manage, |_| navigate(Route::AdminUsers))?;

    let page = ElementBuilder::new("div")?.class("page admin-dashboard").build();
    append_child(&page, &render_header(state, "Admin Dashboard", vec![manage])?)?;

    let main = ElementBuilder::new("main")?.class("page-content").build();
    if let Some(banner) = render_banner(state)? {
        append_child(&main, &banner)?;
    }

    let snapshot = state.crimes.list().borrow().snapshot().to_vec();
    let breakdown = StatusBreakdown::from_reports(&snapshot);
    append_child(&main, &render_counters(&breakdown)?)?;
    append_child(&main, &render_analytics(&snapshot, &breakdown)?)?;

    let editing = state.editing.borrow().clone();
    if let Some(edit) = editing {
        let current = edit.draft.status.unwrap_or(CrimeStatus::Pending);
        let select = status_select(state, current)?;
        append_child(&main, &render_edit_form_with(state, edit, Some(select))?)?;
    }

    append_child(&main, &render_review_table(state)?)?;
    append_child(&page, &main)?;
    Ok(page)
}

fn render_counters(breakdown: &StatusBreakdown) -> Result<Element, JsValue> {
    let row = ElementBuilder::new("div")?.class("stat-cards").build();
    for status in CrimeStatus::ALL {
        let card = ElementBuilder::new("div")?
            .class(&format!("stat-card stat-{}", status.as_str().to_lowercase()))
            .child(text_element("h3", "", status.as_str())?)?
            .child(text_element("p", "stat-value", &breakdown.count(status).to_string())?)?
            .build();
        append_child(&row, &card)?;
    }
    Ok(row)
}

/// Reparto por estado (sin buckets vacíos) y reportes por mes
fn render_analytics(reports: &[CrimeReport], breakdown: &StatusBreakdown) -> Result<Element, JsValue> {
    let total = breakdown.total();
    let by_status = ElementBuilder::new("div")?
        .class("card analytics-status")
        .child(text_element("h2", "", "Crime Status Distribution")?)?
        .build();
    for (status, count) in breakdown.non_empty() {
        let percent = count * 100 / total.max(1);
        append_child(
            &by_status,
            &text_element("div", "analytics-row", &format!("{}: {}%", status.as_str(), percent))?,
        )?;
    }

    let monthly = monthly_counts(reports);
    let peak = monthly.iter().map(|m| m.count).max().unwrap_or(1);
    let by_month = ElementBuilder::new("div")?
        .class("card analytics-monthly")
        .child(text_element("h2", "", "Crimes per Month")?)?
        .build();
    for month in &monthly {
        let bar = ElementBuilder::new("div")?
            .class("bar")
            .attr("style", &format!("width: {}%", month.count * 100 / peak.max(1)))?
            .build();
        let row = ElementBuilder::new("div")?
            .class("analytics-row")
            .child(text_element("span", "bar-label", &month.label)?)?
            .child(bar)?
            .child(text_element("span", "bar-value", &month.count.to_string())?)?
            .build();
        append_child(&by_month, &row)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("analytics")
        .child(by_status)?
        .child(by_month)?
        .build())
}

fn status_select(state: &AppState, current: CrimeStatus) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.class("form-input").attr("id", "edit-status")?.build();
    for status in CrimeStatus::ALL {
        let option = ElementBuilder::new("option")?
            .attr("value", status.as_str())?
            .text(status.as_str())
            .build();
        append_child(&select, &option)?;
    }
    set_field_value(&select, current.as_str());

    let editing = state.editing.clone();
    on_change_value(&select, move |value| {
        if let (Some(edit), Some(status)) = (editing.borrow_mut().as_mut(), CrimeStatus::parse(&value)) {
            edit.draft.status = Some(status);
        }
    })?;

    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", "edit-status")?.text("Status").build())?
        .child(select)?
        .build())
}

fn filter_select(state: &AppState) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.class("filter-select").build();
    let all = ElementBuilder::new("option")?.attr("value", FILTER_ALL)?.text("All Status").build();
    append_child(&select, &all)?;
    for status in CrimeStatus::ALL {
        let option = ElementBuilder::new("option")?
            .attr("value", status.as_str())?
            .text(status.as_str())
            .build();
        append_child(&select, &option)?;
    }
    let current = match state.crimes.list().borrow().filter() {
        ListFilter::All => FILTER_ALL,
        ListFilter::Only(status) => status.as_str(),
    };
    set_field_value(&select, current);

    let state = state.clone();
    on_change_value(&select, move |value| {
        let filter = CrimeStatus::parse(&value).map_or(ListFilter::All, ListFilter::Only);
        state.crimes.set_filter(filter);
        crate::rerender_app();
    })?;
    Ok(select)
}

fn render_review_table(state: &AppState) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?.class("card review").build();
    let toolbar = ElementBuilder::new("div")?
        .class("review-toolbar")
        .child(text_element("h2", "", "Crime Reports")?)?
        .child(filter_select(state)?)?
        .build();
    append_child(&section, &toolbar)?;

    let list = state.crimes.list();
    let (rows, current, total, has_prev, has_next) = {
        let list = list.borrow();
        let rows: Vec<CrimeReport> = list.page_items().into_iter().cloned().collect();
        (rows, list.current_page(), list.total_pages(), list.has_prev(), list.has_next())
    };

    let table = ElementBuilder::new("table")?.class("review-table").build();
    let head = ElementBuilder::new("tr")?.build();
    for title in ["Title", "Description", "Location", "Status", "Date", "Actions"] {
        append_child(&head, &text_element("th", "", title)?)?;
    }
    append_child(&table, &ElementBuilder::new("thead")?.child(head)?.build())?;

    let body = ElementBuilder::new("tbody")?.build();
    for report in &rows {
        append_child(&body, &render_row(state, report)?)?;
    }
    append_child(&table, &body)?;
    append_child(&section, &table)?;

    if rows.is_empty() {
        append_child(&section, &text_element("p", "empty", "No crime reports match this filter.")?)?;
    }

    let on_prev = {
        let state = state.clone();
        move || {
            if state.crimes.prev_page() {
                crate::rerender_app();
            }
        }
    };
    let on_next = {
        let state = state.clone();
        move || {
            if state.crimes.next_page() {
                crate::rerender_app();
            }
        }
    };
    append_child(&section, &render_pagination(current, total, has_prev, has_next, on_prev, on_next)?)?;
    Ok(section)
}

fn render_row(state: &AppState, report: &CrimeReport) -> Result<Element, JsValue> {
    let loading = state.loading.get();

    let cycle = button("btn btn-status btn-small", &format!("→ {}", report.status.next().as_str()), loading)?;
    {
        let state = state.clone();
        let report = report.clone();
        on_click(&cycle, move |_| {
            let crimes = state.crimes.clone();
            let report = report.clone();
            run_action(
                &state,
                async move { crimes.cycle_status(&report).await },
                |state, next| {
                    flash(&state.banner, BannerKind::Success, format!("Status changed to {}", next.as_str()));
                },
            );
        })?;
    }

    let edit = button("btn btn-primary btn-small", "Edit", false)?;
    {
        let state = state.clone();
        let report = report.clone();
        on_click(&edit, move |_| start_editing(&state, &report, true))?;
    }

    let actions = ElementBuilder::new("td")?
        .class("row-actions")
        .child(cycle)?
        .child(edit)?
        .child(delete_button(state, report)?)?
        .build();

    let status_cell = ElementBuilder::new("td")?.child(status_badge(report.status)?)?.build();
    let date = report.created_at.format("%d/%m/%Y").to_string();

    Ok(ElementBuilder::new("tr")?
        .child(text_element("td", "", &report.title)?)?
        .child(text_element("td", "description", &report.description)?)?
        .child(text_element("td", "", &report.location)?)?
        .child(status_cell)?
        .child(text_element("td", "", &date)?)?
        .child(actions)?
        .build())
}
