// ============================================================================
// FEEDBACK - Qué ve el usuario cuando una acción falla
// ============================================================================
//   Auth (401)              -> se limpia la sesión, vuelta al login
//   Connectivity / Server   -> banner genérico (reintento manual)
//   Request (4xx)           -> mensaje del servidor junto al formulario, o en
//                              el banner si la acción viene de una fila/lista
//   Validación local        -> error de campo, sin llamada de red
// ============================================================================

use thiserror::Error;

use crate::models::ValidationError;
use crate::services::ApiError;
use crate::state::SessionStore;

pub const CONNECTIVITY_MESSAGE: &str = "Cannot connect to server. Please try again later.";
pub const SERVER_MESSAGE: &str = "The server could not complete the request. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// El usuario no confirmó una acción destructiva
    #[error("action cancelled")]
    Cancelled,
    #[error("session expired, please log in again")]
    SessionExpired,
    #[error("{0}")]
    Banner(String),
    #[error("{0}")]
    Form(String),
}

impl ActionError {
    /// Fallo de una mutación lanzada desde un formulario o botón
    pub fn from_api(err: ApiError, fallback: &str, session: &SessionStore) -> Self {
        match err {
            ApiError::Auth => Self::expire(session),
            ApiError::Connectivity(_) => Self::Banner(CONNECTIVITY_MESSAGE.to_string()),
            ApiError::Server { .. } => Self::Banner(SERVER_MESSAGE.to_string()),
            ApiError::Request { .. } => Self::Form(err.message_or(fallback)),
        }
    }

    /// Fallo de un fetch de lista: no hay formulario, todo va al banner
    pub fn from_fetch(err: ApiError, fallback: &str, session: &SessionStore) -> Self {
        Self::from_api(err, fallback, session).without_form()
    }

    /// Fallo de un botón de fila (borrar, ciclo de estado, cambio de rol)
    pub fn from_row_action(err: ApiError, fallback: &str, session: &SessionStore) -> Self {
        Self::from_api(err, fallback, session).without_form()
    }

    fn without_form(self) -> Self {
        match self {
            Self::Form(message) => Self::Banner(message),
            other => other,
        }
    }

    fn expire(session: &SessionStore) -> Self {
        log::warn!("🔒 [AUTH] 401 recibido, cerrando sesión");
        if let Err(e) = session.clear() {
            log::error!("❌ [AUTH] Error limpiando sesión: {}", e);
        }
        Self::SessionExpired
    }
}

/// Confirmación explícita antes de una acción destructiva
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// `window.confirm()`
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
