// ============================================================================
// LOGIN VIEW - Email/contraseña + Google/Facebook
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, on_submit, text_element, ElementBuilder};
use crate::router::navigate;
use crate::services::{IdentityProvider, PopupProvider};
use crate::state::AppState;
use crate::viewmodels::ProviderKind;
use crate::views::shared::{button, form_field, render_banner, render_form_error, run_action, FieldKind};

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [LOGIN] render_login()");
    let loading = state.loading.get();

    let screen = ElementBuilder::new("div")?.class("login-screen").build();
    let container = ElementBuilder::new("div")?.class("login-container").build();

    let header = ElementBuilder::new("div")?
        .class("login-header")
        .child(text_element("h1", "", "Crime Report System")?)?
        .child(text_element("p", "", "Sign in to your account")?)?
        .build();
    append_child(&container, &header)?;

    if let Some(banner) = render_banner(state)? {
        append_child(&container, &banner)?;
    }
    if let Some(error) = render_form_error(state)? {
        append_child(&container, &error)?;
    }

    // Formulario
    let form = ElementBuilder::new("form")?.class("login-form").build();
    let credentials = state.credentials.clone();
    let email_value = credentials.borrow().email.clone();
    let password_value = credentials.borrow().password.clone();

    let email = {
        let credentials = credentials.clone();
        form_field("email", "Email", FieldKind::Email, &email_value, move |v| {
            credentials.borrow_mut().email = v;
        })?
    };
    let password = {
        let credentials = credentials.clone();
        form_field("password", "Password", FieldKind::Password, &password_value, move |v| {
            credentials.borrow_mut().password = v;
        })?
    };

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn btn-primary btn-login")
        .text(if loading { "Signing in..." } else { "Login" })
        .flag("disabled", loading)?
        .build();

    {
        let state = state.clone();
        on_submit(&form, move || {
            let request = state.credentials.borrow().clone();
            let auth = state.auth.clone();
            log::info!("🔐 [LOGIN] Enviando credenciales");
            run_action(
                &state,
                async move { auth.login(&request.email, &request.password).await },
                |state, landing| {
                    state.credentials.borrow_mut().password.clear();
                    navigate(landing);
                },
            );
        })?;
    }

    append_child(&form, &email)?;
    append_child(&form, &password)?;
    append_child(&form, &submit)?;
    append_child(&container, &form)?;

    // Proveedores externos
    append_child(&container, &text_element("div", "divider", "or continue with")?)?;
    let providers = ElementBuilder::new("div")?
        .class("provider-buttons")
        .child(provider_button(state, ProviderKind::Google, loading)?)?
        .child(provider_button(state, ProviderKind::Facebook, loading)?)?
        .build();
    append_child(&container, &providers)?;

    let status_link = ElementBuilder::new("a")?
        .class("status-link")
        .attr("href", "#/status")?
        .text("Check backend status")
        .build();
    append_child(&container, &status_link)?;

    append_child(&screen, &container)?;
    Ok(screen)
}

fn provider_button(state: &AppState, kind: ProviderKind, loading: bool) -> Result<Element, JsValue> {
    let provider: Rc<dyn IdentityProvider> = match kind {
        ProviderKind::Google => Rc::new(PopupProvider::google()),
        ProviderKind::Facebook => Rc::new(PopupProvider::facebook()),
    };
    let label = format!("Sign in with {}", provider.name());
    let class = match kind {
        ProviderKind::Google => "btn btn-provider btn-google",
        ProviderKind::Facebook => "btn btn-provider btn-facebook",
    };
    let btn = button(class, &label, loading)?;

    let state = state.clone();
    on_click(&btn, move |_| {
        let auth = state.auth.clone();
        let provider = provider.clone();
        let pending = state.provider_pending.clone();
        pending.set(true);
        run_action(
            &state,
            async move {
                let result = auth.login_with_provider(kind, provider.as_ref()).await;
                pending.set(false);
                result
            },
            |_, landing| navigate(landing),
        );
    })?;
    Ok(btn)
}
