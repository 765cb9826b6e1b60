// ============================================================================
// IDENTITY PROVIDER - Frontera async con el popup OAuth (Google/Facebook)
// ============================================================================
// La página carga el SDK del proveedor y expone una función global que
// devuelve una Promise<string> con el ID token. Aquí solo se espera esa
// Promise: un token o un error, sin reintentos.
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityProviderError {
    #[error("{0} sign-in is not available on this page")]
    Unavailable(&'static str),
    #[error("{0}")]
    Failed(String),
}

#[async_trait(?Send)]
pub trait IdentityProvider {
    fn name(&self) -> &'static str;

    /// Abre el popup y devuelve el ID token del proveedor
    async fn sign_in(&self) -> Result<String, IdentityProviderError>;
}

pub struct PopupProvider {
    name: &'static str,
    js_function: &'static str,
}

impl PopupProvider {
    pub fn google() -> Self {
        Self {
            name: "Google",
            js_function: "signInWithGooglePopup",
        }
    }

    pub fn facebook() -> Self {
        Self {
            name: "Facebook",
            js_function: "signInWithFacebookPopup",
        }
    }
}

fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "unknown error".to_string())
}

#[async_trait(?Send)]
impl IdentityProvider for PopupProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn sign_in(&self) -> Result<String, IdentityProviderError> {
        let window = web_sys::window().ok_or(IdentityProviderError::Unavailable(self.name))?;
        let function = js_sys::Reflect::get(&window, &JsValue::from_str(self.js_function))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or(IdentityProviderError::Unavailable(self.name))?;

        log::info!("🔑 [AUTH] Abriendo popup de {}", self.name);
        let promise = function
            .call0(&JsValue::NULL)
            .map_err(|e| IdentityProviderError::Failed(js_error_message(&e)))?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| IdentityProviderError::Failed(format!("{} did not return a Promise", self.js_function)))?;

        let token = JsFuture::from(promise)
            .await
            .map_err(|e| IdentityProviderError::Failed(js_error_message(&e)))?;

        token
            .as_string()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| IdentityProviderError::Failed("empty identity token".to_string()))
    }
}
