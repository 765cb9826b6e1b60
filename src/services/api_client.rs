// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP
// ============================================================================
// Adjunta el bearer token de la sesión y normaliza todos los fallos en
// ApiError. No limpia la sesión por sí mismo: eso lo decide el ViewModel.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CONFIG;
use crate::models::{
    AuthResponse, CrimeDraft, CrimeReport, CrimeStatus, CrimeUpdate, FacebookLoginRequest,
    GoogleLoginRequest, Identity, LoginRequest, NewAdmin, Role, UserAccount,
};
use crate::services::error::ApiError;
use crate::services::transport::{GlooTransport, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::state::SessionStore;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
}

impl ApiClient {
    /// Cliente del navegador, con la URL base de CONFIG
    pub fn new(session: SessionStore) -> Self {
        Self::with_transport(CONFIG.api_base_url(), Rc::new(GlooTransport), session)
    }

    pub fn with_transport(base_url: &str, transport: Rc<dyn HttpTransport>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        log::info!("🔐 [API] Login para {}", email);
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.call(HttpMethod::Post, "/api/auth/login", Some(&body), false).await
    }

    pub async fn google_login(&self, token_id: &str) -> Result<AuthResponse, ApiError> {
        let body = GoogleLoginRequest {
            token_id: token_id.to_string(),
        };
        self.call(HttpMethod::Post, "/api/auth/google-login", Some(&body), false).await
    }

    pub async fn facebook_login(&self, access_token: &str) -> Result<AuthResponse, ApiError> {
        let body = FacebookLoginRequest {
            access_token: access_token.to_string(),
            is_firebase: true,
        };
        self.call(HttpMethod::Post, "/api/auth/facebook-login", Some(&body), false).await
    }

    pub async fn profile(&self) -> Result<Identity, ApiError> {
        self.call::<(), _>(HttpMethod::Get, "/api/auth/profile", None, true).await
    }

    /// Comprueba si el backend responde (sin credencial). Cualquier respuesta
    /// HTTP, 401 incluido, cuenta como conectado.
    pub async fn probe(&self) -> Result<u16, ApiError> {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: self.url("/api/auth/profile"),
            bearer: None,
            body: None,
        };
        let response = self.transport.send(request).await.map_err(ApiError::Connectivity)?;
        Ok(response.status)
    }

    // ------------------------------------------------------------------
    // Usuarios (admin)
    // ------------------------------------------------------------------

    pub async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.call::<(), _>(HttpMethod::Get, "/api/auth/users", None, true).await
    }

    pub async fn update_user_role(&self, user_id: &str, role: Role) -> Result<(), ApiError> {
        log::info!("👤 [API] Cambiando rol de {} a {}", user_id, role.as_str());
        let path = format!("/api/auth/users/{}/role", user_id);
        let body = serde_json::json!({ "role": role });
        self.dispatch(HttpMethod::Patch, &path, Some(&body)).await
    }

    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<(), ApiError> {
        log::info!("👤 [API] Creando admin {}", admin.email);
        self.dispatch(HttpMethod::Post, "/api/auth/create-admin", Some(admin)).await
    }

    // ------------------------------------------------------------------
    // Reportes
    // ------------------------------------------------------------------

    pub async fn list_crimes(&self) -> Result<Vec<CrimeReport>, ApiError> {
        let crimes: Vec<CrimeReport> = self.call::<(), _>(HttpMethod::Get, "/api/crimes", None, true).await?;
        log::info!("📋 [API] {} reportes recibidos", crimes.len());
        Ok(crimes)
    }

    pub async fn create_crime(&self, draft: &CrimeDraft) -> Result<(), ApiError> {
        log::info!("📝 [API] Creando reporte '{}'", draft.title);
        self.dispatch(HttpMethod::Post, "/api/crimes", Some(draft)).await
    }

    pub async fn update_crime(&self, crime_id: &str, update: &CrimeUpdate) -> Result<(), ApiError> {
        log::info!("📝 [API] Actualizando reporte {}", crime_id);
        let path = format!("/api/crimes/{}", crime_id);
        self.dispatch(HttpMethod::Patch, &path, Some(update)).await
    }

    pub async fn update_crime_status(&self, crime_id: &str, status: CrimeStatus) -> Result<(), ApiError> {
        log::info!("🔄 [API] Reporte {} -> {}", crime_id, status.as_str());
        let path = format!("/api/crimes/{}/status", crime_id);
        let body = serde_json::json!({ "status": status });
        self.dispatch(HttpMethod::Patch, &path, Some(&body)).await
    }

    pub async fn delete_crime(&self, crime_id: &str) -> Result<(), ApiError> {
        log::info!("🗑️ [API] Eliminando reporte {}", crime_id);
        let path = format!("/api/crimes/{}", crime_id);
        self.dispatch::<()>(HttpMethod::Delete, &path, None).await
    }

    // ------------------------------------------------------------------
    // Internos
    // ------------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<HttpResponse, ApiError> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Request {
                status: 0,
                message: Some(format!("Serialization error: {}", e)),
            })?;
        let bearer = if authenticated { self.session.token() } else { None };
        let request = HttpRequest {
            method,
            url: self.url(path),
            bearer,
            body,
        };

        log::debug!("🌐 [API] {} {}", method, path);
        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("📴 [API] {} {} sin respuesta: {}", method, path, e);
            ApiError::Connectivity(e)
        })?;

        if let Err(e) = ApiError::check(response.status, &response.body) {
            log::warn!("❌ [API] {} {} -> {}", method, path, e);
            return Err(e);
        }
        Ok(response)
    }

    /// Petición con payload de respuesta
    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        let response = self.execute(method, path, body, authenticated).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            log::error!("❌ [API] Respuesta ilegible de {} {}: {}", method, path, e);
            ApiError::Server {
                status: response.status,
            }
        })
    }

    /// Mutación autenticada; el cuerpo de la respuesta se descarta porque la
    /// lista se vuelve a pedir entera después.
    async fn dispatch<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        self.execute(method, path, body, true).await.map(|_| ())
    }
}
