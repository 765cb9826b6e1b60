// ============================================================================
// USER MANAGEMENT VIEW - Roles y alta de administradores
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_change_value, on_click, on_submit, set_field_value, text_element, ElementBuilder};
use crate::models::{NewAdmin, Role, UserAccount};
use crate::router::{navigate, Route};
use crate::state::{flash, AppState, BannerKind, ListFilter};
use crate::viewmodels::BrowserConfirm;
use crate::views::shared::{
    button, form_field, render_banner, render_form_error, render_header, render_pagination, run_action, FieldKind,
};

pub fn render_user_management(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [USERS] render_user_management()");
    let back = button("btn btn-secondary", "Back to Dashboard", false)?;
    on_click(&back, |_| navigate(Route::Admin))?;

    let page = ElementBuilder::new("div")?.class("page user-management").build();
    append_child(&page, &render_header(state, "User Management", vec![back])?)?;

    let main = ElementBuilder::new("main")?.class("page-content").build();
    if let Some(banner) = render_banner(state)? {
        append_child(&main, &banner)?;
    }

    let open = state.panel_open.get();
    let toggle = button("btn btn-primary", if open { "Cancel" } else { "Add New Admin" }, false)?;
    {
        let state = state.clone();
        on_click(&toggle, move |_| {
            state.panel_open.set(!state.panel_open.get());
            state.clear_form_error();
            crate::rerender_app();
        })?;
    }
    append_child(&main, &toggle)?;
    if open {
        append_child(&main, &render_admin_form(state)?)?;
    }

    append_child(&main, &render_users(state)?)?;
    append_child(&page, &main)?;
    Ok(page)
}

fn render_admin_form(state: &AppState) -> Result<Element, JsValue> {
    let loading = state.loading.get();
    let form = ElementBuilder::new("form")?
        .class("card admin-form")
        .child(text_element("h2", "", "Create New Admin")?)?
        .build();
    if let Some(error) = render_form_error(state)? {
        append_child(&form, &error)?;
    }

    let draft = state.admin_draft.clone();
    let current = draft.borrow().clone();
    let fields = [
        ("admin-name", "Name", FieldKind::Text, current.name),
        ("admin-email", "Email", FieldKind::Email, current.email),
        ("admin-password", "Password", FieldKind::Password, current.password),
    ];
    for (index, (id, label, kind, value)) in fields.into_iter().enumerate() {
        let draft = draft.clone();
        let field = form_field(id, label, kind, &value, move |v| {
            let mut d = draft.borrow_mut();
            match index {
                0 => d.name = v,
                1 => d.email = v,
                _ => d.password = v,
            }
        })?;
        append_child(&form, &field)?;
    }

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn btn-primary")
        .text(if loading { "Creating..." } else { "Create Admin" })
        .flag("disabled", loading)?
        .build();
    append_child(&form, &submit)?;

    let state = state.clone();
    on_submit(&form, move || {
        let users = state.users.clone();
        let admin = state.admin_draft.borrow().clone();
        run_action(&state, async move { users.create_admin(&admin).await }, |state, ()| {
            *state.admin_draft.borrow_mut() = NewAdmin::default();
            state.panel_open.set(false);
            flash(&state.banner, BannerKind::Success, "Admin created successfully");
        });
    })?;
    Ok(form)
}

fn role_filter(state: &AppState) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.class("filter-select").build();
    for (value, label) in [("all", "All Roles"), ("user", "Users"), ("admin", "Admins")] {
        append_child(&select, &ElementBuilder::new("option")?.attr("value", value)?.text(label).build())?;
    }
    let current = match state.users.list().borrow().filter() {
        ListFilter::All => "all",
        ListFilter::Only(role) => role.as_str(),
    };
    set_field_value(&select, current);

    let state = state.clone();
    on_change_value(&select, move |value| {
        let filter = match value.as_str() {
            "user" => ListFilter::Only(Role::User),
            "admin" => ListFilter::Only(Role::Admin),
            _ => ListFilter::All,
        };
        state.users.set_filter(filter);
        crate::rerender_app();
    })?;
    Ok(select)
}

fn render_users(state: &AppState) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("card users")
        .child(
            ElementBuilder::new("div")?
                .class("review-toolbar")
                .child(text_element("h2", "", "All Users")?)?
                .child(role_filter(state)?)?
                .build(),
        )?
        .build();

    let list = state.users.list();
    let (rows, current, total, has_prev, has_next) = {
        let list = list.borrow();
        let rows: Vec<UserAccount> = list.page_items().into_iter().cloned().collect();
        (rows, list.current_page(), list.total_pages(), list.has_prev(), list.has_next())
    };

    let table = ElementBuilder::new("table")?.class("users-table").build();
    let head = ElementBuilder::new("tr")?.build();
    for title in ["Name", "Email", "Role", "Joined", "Actions"] {
        append_child(&head, &text_element("th", "", title)?)?;
    }
    append_child(&table, &ElementBuilder::new("thead")?.child(head)?.build())?;
    let body = ElementBuilder::new("tbody")?.build();
    for user in &rows {
        append_child(&body, &render_user_row(state, user)?)?;
    }
    append_child(&table, &body)?;
    append_child(&section, &table)?;

    let on_prev = {
        let list = list.clone();
        move || {
            if list.borrow_mut().prev_page() {
                crate::rerender_app();
            }
        }
    };
    let on_next = move || {
        if list.borrow_mut().next_page() {
            crate::rerender_app();
        }
    };
    append_child(&section, &render_pagination(current, total, has_prev, has_next, on_prev, on_next)?)?;
    Ok(section)
}

fn render_user_row(state: &AppState, user: &UserAccount) -> Result<Element, JsValue> {
    let label = match user.role {
        Role::User => "Make Admin",
        Role::Admin => "Make User",
    };
    let toggle = button("btn btn-secondary btn-small", label, state.loading.get())?;
    {
        let state = state.clone();
        let user = user.clone();
        on_click(&toggle, move |_| {
            let users = state.users.clone();
            let user = user.clone();
            run_action(
                &state,
                async move { users.toggle_role(&user, &BrowserConfirm).await },
                |state, role| {
                    let message = format!("User role changed to {} successfully", role.as_str());
                    flash(&state.banner, BannerKind::Success, message);
                },
            );
        })?;
    }

    let badge = ElementBuilder::new("span")?
        .class(&format!("badge badge-{}", user.role.as_str()))
        .text(user.role.as_str())
        .build();

    Ok(ElementBuilder::new("tr")?
        .child(text_element("td", "", &user.name)?)?
        .child(text_element("td", "", &user.email)?)?
        .child(ElementBuilder::new("td")?.child(badge)?.build())?
        .child(text_element("td", "", &user.created_at.format("%d/%m/%Y").to_string())?)?
        .child(ElementBuilder::new("td")?.child(toggle)?.build())?
        .build())
}
