// ============================================================================
// AUTH VIEWMODEL - Login (email/password y proveedores) + logout
// ============================================================================
// Un login correcto guarda identidad + token y devuelve la ruta de entrada:
// admin -> /admin, user -> /dashboard.
// ============================================================================

use crate::models::{require_filled, AuthResponse, Session};
use crate::router::Route;
use crate::services::{ApiClient, ApiError, IdentityProvider};
use crate::viewmodels::feedback::{ActionError, CONNECTIVITY_MESSAGE, SERVER_MESSAGE};

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
const LOGIN_CONNECTIVITY: &str =
    "Cannot connect to server. Please try again later or check your internet connection.";
const LOGIN_NOT_FOUND: &str = "Server endpoint not found. Please contact support.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    Facebook,
}

#[derive(Clone)]
pub struct AuthViewModel {
    api: ApiClient,
}

impl AuthViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.api.session().load()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Route, ActionError> {
        require_filled("email", email)?;
        require_filled("password", password)?;

        let response = self.api.login(email, password).await.map_err(|e| {
            log::warn!("❌ [LOGIN] Login fallido: {}", e);
            if e.requires_logout() {
                self.logout();
            }
            match &e {
                ApiError::Connectivity(_) => ActionError::Form(LOGIN_CONNECTIVITY.to_string()),
                ApiError::Request { status: 404, .. } => ActionError::Form(LOGIN_NOT_FOUND.to_string()),
                ApiError::Server { .. } => ActionError::Banner(SERVER_MESSAGE.to_string()),
                // Sin sesión previa un 401 solo significa credenciales inválidas
                ApiError::Auth | ApiError::Request { .. } => ActionError::Form(e.message_or(LOGIN_FAILED)),
            }
        })?;
        self.establish(response)
    }

    /// Login delegado: popup del proveedor -> ID token -> backend
    pub async fn login_with_provider(
        &self,
        kind: ProviderKind,
        provider: &dyn IdentityProvider,
    ) -> Result<Route, ActionError> {
        let prefix = format!("{} login failed", provider.name());

        let token = provider.sign_in().await.map_err(|e| {
            log::warn!("❌ [LOGIN] Proveedor {} falló: {}", provider.name(), e);
            ActionError::Form(format!("{}: {}", prefix, e))
        })?;

        let exchange = match kind {
            ProviderKind::Google => self.api.google_login(&token).await,
            ProviderKind::Facebook => self.api.facebook_login(&token).await,
        };
        let response = exchange.map_err(|e| {
            let detail = match &e {
                ApiError::Connectivity(_) => CONNECTIVITY_MESSAGE.to_string(),
                _ => e.message_or(&e.to_string()),
            };
            ActionError::Form(format!("{}: {}", prefix, detail))
        })?;
        self.establish(response)
    }

    pub fn logout(&self) {
        log::info!("👋 [AUTH] Logout");
        if let Err(e) = self.api.session().clear() {
            log::error!("❌ [AUTH] Error limpiando sesión: {}", e);
        }
    }

    fn establish(&self, response: AuthResponse) -> Result<Route, ActionError> {
        let session = Session::from(response);
        self.api.session().save(&session).map_err(|e| {
            log::error!("❌ [LOGIN] No se pudo guardar la sesión: {}", e);
            ActionError::Banner(format!("Could not store session: {}", e))
        })?;
        let landing = Route::landing_for(&session);
        log::info!("✅ [LOGIN] Sesión iniciada, entrando en {}", landing.path());
        Ok(landing)
    }
}
