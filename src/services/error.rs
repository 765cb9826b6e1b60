// ============================================================================
// API ERROR - Taxonomía uniforme de fallos del backend
// ============================================================================

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No llegó ninguna respuesta (red caída, CORS, DNS...)
    #[error("cannot reach server: {0}")]
    Connectivity(String),
    /// 401: la sesión ya no es válida
    #[error("session rejected by server")]
    Auth,
    /// 4xx: rechazo de validación o de negocio
    #[error("request rejected ({status})")]
    Request { status: u16, message: Option<String> },
    /// 5xx, o una respuesta 2xx ilegible
    #[error("server error ({status})")]
    Server { status: u16 },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Clasifica una respuesta HTTP. `Ok(())` para 2xx.
    pub fn check(status: u16, body: &str) -> Result<(), ApiError> {
        match status {
            200..=299 => Ok(()),
            401 => Err(ApiError::Auth),
            400..=499 => Err(ApiError::Request {
                status,
                message: Self::body_message(body),
            }),
            _ => Err(ApiError::Server { status }),
        }
    }

    fn body_message(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }

    /// Solo un 401 obliga a cerrar la sesión
    pub fn requires_logout(&self) -> bool {
        matches!(self, ApiError::Auth)
    }

    /// Mensaje del servidor si lo hay, si no el fallback de la operación
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Request {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
