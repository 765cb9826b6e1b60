// ============================================================================
// ROUTER - Rutas de la aplicación (navegación por hash: #/admin, #/login...)
// ============================================================================

use crate::models::Session;

/// Requisito de acceso de una página
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Status,
    Dashboard,
    Admin,
    AdminUsers,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Status => "/status",
            Route::Dashboard => "/dashboard",
            Route::Admin => "/admin",
            Route::AdminUsers => "/admin/users",
        }
    }

    /// "/" y rutas desconocidas llevan al login
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/status" => Route::Status,
            "/dashboard" => Route::Dashboard,
            "/admin" => Route::Admin,
            "/admin/users" => Route::AdminUsers,
            _ => Route::Login,
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Login | Route::Status => Access::Public,
            Route::Dashboard => Access::Authenticated,
            Route::Admin | Route::AdminUsers => Access::Admin,
        }
    }

    /// Página de entrada tras un login correcto
    pub fn landing_for(session: &Session) -> Self {
        if session.is_admin() {
            Route::Admin
        } else {
            Route::Dashboard
        }
    }
}

/// Ruta actual leída de `window.location.hash`
pub fn current_route() -> Route {
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    Route::from_path(&hash)
}

/// Cambia el hash; el listener global de `hashchange` re-renderiza
pub fn navigate(route: Route) {
    log::info!("🧭 [ROUTER] Navegando a {}", route.path());
    if let Some(window) = web_sys::window() {
        let target = format!("#{}", route.path());
        let same = window.location().hash().map(|h| h == target).unwrap_or(false);
        if let Err(e) = window.location().set_hash(route.path()) {
            log::error!("❌ [ROUTER] Error cambiando hash: {:?}", e);
        }
        // Mismo hash => no hay hashchange, re-render explícito
        if same {
            crate::rerender_app();
        }
    }
}

/// Redirección durante un render: solo cambia el hash, el `hashchange`
/// posterior hace el re-render
pub fn redirect(route: Route) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_hash(route.path()) {
            log::error!("❌ [ROUTER] Error cambiando hash: {:?}", e);
        }
    }
}
