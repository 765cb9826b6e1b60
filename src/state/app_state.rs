// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Un solo AppState vive en `App`; las vistas reciben `&AppState` y clonan los
// Rc que necesiten en sus closures.
//
// "Montar" una página = primer render de una ruta distinta a la anterior.
// Cada montaje incrementa `mount_generation`; un resultado async que vuelve
// con una generación vieja pertenece a una página ya desmontada y se descarta.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::{CrimeDraft, CrimeUpdate, LoginRequest, NewAdmin};
use crate::router::Route;
use crate::services::ApiClient;
use crate::state::{BannerState, GuardState, RouteGuard, SessionStore};
use crate::utils::{REVIEW_PAGE_SIZE, USER_PAGE_SIZE};
use crate::viewmodels::{ActionError, ApiStatus, AuthViewModel, CrimesViewModel, UsersViewModel};

/// Reporte abierto en el formulario de edición
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    pub crime_id: String,
    pub draft: CrimeUpdate,
}

/// Dónde termina un error de acción
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorTarget {
    /// Ya guardado en `form_error`
    Form,
    Banner(String),
    Redirect(Route),
    Silent,
}

#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub api: ApiClient,
    pub auth: AuthViewModel,
    pub crimes: CrimesViewModel,
    pub users: UsersViewModel,

    // UI State
    pub banner: Rc<RefCell<BannerState>>,
    pub form_error: Rc<RefCell<Option<String>>>,
    pub loading: Rc<Cell<bool>>,
    pub api_status: Rc<RefCell<ApiStatus>>,
    /// Formulario plegable de la página (nuevo reporte / nuevo admin)
    pub panel_open: Rc<Cell<bool>>,

    // Borradores de formularios (sobreviven a los re-renders)
    pub credentials: Rc<RefCell<LoginRequest>>,
    pub crime_draft: Rc<RefCell<CrimeDraft>>,
    pub admin_draft: Rc<RefCell<NewAdmin>>,
    pub editing: Rc<RefCell<Option<EditState>>>,

    /// Popup de Google/Facebook abierto: los guards esperan en Checking
    pub provider_pending: Rc<Cell<bool>>,

    mounted_route: Rc<Cell<Option<Route>>>,
    mount_generation: Rc<Cell<u64>>,
    guard: Rc<RefCell<Option<RouteGuard>>>,
    initial_load_pending: Rc<Cell<bool>>,
}

impl AppState {
    pub fn new() -> Self {
        let session = SessionStore::browser();
        Self::with_api(ApiClient::new(session))
    }

    pub fn with_api(api: ApiClient) -> Self {
        Self {
            session: api.session().clone(),
            auth: AuthViewModel::new(api.clone()),
            crimes: CrimesViewModel::new(api.clone(), REVIEW_PAGE_SIZE),
            users: UsersViewModel::new(api.clone(), USER_PAGE_SIZE),
            api,
            banner: Rc::new(RefCell::new(BannerState::default())),
            form_error: Rc::new(RefCell::new(None)),
            loading: Rc::new(Cell::new(false)),
            api_status: Rc::new(RefCell::new(ApiStatus::Checking)),
            panel_open: Rc::new(Cell::new(false)),
            credentials: Rc::new(RefCell::new(LoginRequest::default())),
            crime_draft: Rc::new(RefCell::new(CrimeDraft::default())),
            admin_draft: Rc::new(RefCell::new(NewAdmin::default())),
            editing: Rc::new(RefCell::new(None)),
            provider_pending: Rc::new(Cell::new(false)),
            mounted_route: Rc::new(Cell::new(None)),
            mount_generation: Rc::new(Cell::new(0)),
            guard: Rc::new(RefCell::new(None)),
            initial_load_pending: Rc::new(Cell::new(false)),
        }
    }

    /// Registra la ruta renderizada. Devuelve `true` si la página es nueva.
    pub fn mount(&self, route: Route) -> bool {
        if self.mounted_route.get() == Some(route) {
            return false;
        }
        self.mounted_route.set(Some(route));
        let generation = self.mount_generation.get() + 1;
        self.mount_generation.set(generation);
        *self.guard.borrow_mut() = None;
        self.initial_load_pending.set(true);

        // Estado local de la página anterior
        *self.form_error.borrow_mut() = None;
        *self.editing.borrow_mut() = None;
        self.panel_open.set(false);
        self.loading.set(false);
        *self.api_status.borrow_mut() = ApiStatus::Checking;

        log::debug!("📄 [APP] Montando {} (gen {})", route.path(), generation);
        true
    }

    /// Guard de la página montada. Se crea en el primer render y, mientras
    /// haya un proveedor pendiente, se queda en Checking.
    pub fn check_access(&self, route: Route) -> GuardState {
        let pending = self.provider_pending.get();
        let mut slot = self.guard.borrow_mut();
        let guard = slot.get_or_insert_with(|| RouteGuard::enter(route.access(), &self.session, pending));
        if pending {
            guard.state()
        } else {
            guard.resolve(&self.session)
        }
    }

    /// Token para el fetch inicial de la página; solo una vez por montaje
    pub fn take_initial_load(&self) -> Option<u64> {
        self.initial_load_pending
            .replace(false)
            .then(|| self.mount_generation.get())
    }

    pub fn mount_token(&self) -> u64 {
        self.mount_generation.get()
    }

    /// Un resultado async solo se aplica si su página sigue montada
    pub fn is_current(&self, token: u64) -> bool {
        self.mount_generation.get() == token
    }

    /// Olvida la página montada (logout, sesión expirada)
    pub fn unmount(&self) {
        self.mounted_route.set(None);
        self.mount_generation.set(self.mount_generation.get() + 1);
        *self.guard.borrow_mut() = None;
    }

    pub fn clear_form_error(&self) {
        *self.form_error.borrow_mut() = None;
    }

    /// Clasifica un error de acción y deja el mensaje de formulario guardado
    pub fn place_error(&self, err: &ActionError) -> ErrorTarget {
        match err {
            ActionError::Invalid(e) => {
                *self.form_error.borrow_mut() = Some(e.to_string());
                ErrorTarget::Form
            }
            ActionError::Form(message) => {
                *self.form_error.borrow_mut() = Some(message.clone());
                ErrorTarget::Form
            }
            ActionError::Banner(message) => ErrorTarget::Banner(message.clone()),
            ActionError::SessionExpired => {
                self.unmount();
                ErrorTarget::Redirect(Route::Login)
            }
            ActionError::Cancelled => ErrorTarget::Silent,
        }
    }

    pub fn logout(&self) {
        self.auth.logout();
        *self.credentials.borrow_mut() = LoginRequest::default();
        self.unmount();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Identity, Role, Session, ValidationError};
    use crate::services::transport::mock::MockTransport;
    use crate::utils::MemoryStorage;

    fn state() -> AppState {
        state_with(Rc::new(MockTransport::new()))
    }

    fn state_with(transport: Rc<MockTransport>) -> AppState {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let api = ApiClient::with_transport("http://api.test", transport, store);
        AppState::with_api(api)
    }

    fn sign_in(app: &AppState, role: Role) {
        let identity = Identity {
            id: "u-1".into(),
            name: "Ada".into(),
            role,
            email: None,
        };
        app.session.save(&Session::new(identity, "tok")).unwrap();
    }

    #[test]
    fn remount_of_same_route_is_ignored() {
        let app = state();
        assert!(app.mount(Route::Admin));
        assert!(!app.mount(Route::Admin));
        assert!(app.mount(Route::AdminUsers));
    }

    #[test]
    fn initial_load_runs_once_per_mount() {
        let app = state();
        app.mount(Route::Status);
        let token = app.take_initial_load().unwrap();
        assert!(app.is_current(token));
        assert_eq!(app.take_initial_load(), None);

        app.mount(Route::Login);
        assert!(app.take_initial_load().is_some());
    }

    #[test]
    fn results_for_unmounted_page_are_stale() {
        let app = state();
        app.mount(Route::Admin);
        let admin = app.mount_token();

        app.mount(Route::AdminUsers);
        assert!(!app.is_current(admin));
        assert!(app.is_current(app.mount_token()));
    }

    #[test]
    fn mounting_clears_page_local_state() {
        let app = state();
        app.mount(Route::Dashboard);
        *app.form_error.borrow_mut() = Some("title is required".into());
        app.panel_open.set(true);
        app.mount(Route::Status);
        assert!(app.form_error.borrow().is_none());
        assert!(!app.panel_open.get());
    }

    #[test]
    fn user_session_is_refused_on_admin_pages() {
        let app = state();
        sign_in(&app, Role::User);
        app.mount(Route::Admin);
        assert_eq!(app.check_access(Route::Admin), GuardState::Unauthorized);

        app.mount(Route::Dashboard);
        assert_eq!(app.check_access(Route::Dashboard), GuardState::Authorized);
    }

    #[test]
    fn pending_provider_keeps_guard_checking_until_done() {
        let app = state();
        app.provider_pending.set(true);
        app.mount(Route::Admin);
        assert_eq!(app.check_access(Route::Admin), GuardState::Checking);

        sign_in(&app, Role::Admin);
        app.provider_pending.set(false);
        assert_eq!(app.check_access(Route::Admin), GuardState::Authorized);
    }

    #[test]
    fn page_opened_during_provider_login_resolves_on_redraw() {
        let app = state();
        app.mount(Route::Login);
        let login_token = app.mount_token();
        app.provider_pending.set(true);

        app.mount(Route::Admin);
        assert_eq!(app.check_access(Route::Admin), GuardState::Checking);

        // el popup termina con la página de login ya desmontada
        sign_in(&app, Role::Admin);
        app.provider_pending.set(false);
        assert!(!app.is_current(login_token));

        assert!(!app.mount(Route::Admin));
        assert_eq!(app.check_access(Route::Admin), GuardState::Authorized);
    }

    #[test]
    fn rejected_row_action_reaches_the_banner() {
        let transport = Rc::new(MockTransport::new());
        let app = state_with(transport.clone());
        sign_in(&app, Role::Admin);
        app.mount(Route::Admin);

        transport.push_json(
            200,
            serde_json::json!([{
                "id": "c-1",
                "title": "Theft",
                "description": "Wallet stolen",
                "location": "Main St",
                "status": "Pending",
                "createdAt": "2024-05-01T08:00:00Z"
            }]),
        );
        futures::executor::block_on(app.crimes.refresh()).unwrap();
        let report = app.crimes.list().borrow().snapshot()[0].clone();

        transport.push_json(403, serde_json::json!({ "message": "Only the reporter may change this" }));
        let err = futures::executor::block_on(app.crimes.cycle_status(&report)).unwrap_err();

        assert_eq!(
            app.place_error(&err),
            ErrorTarget::Banner("Only the reporter may change this".into())
        );
        assert!(app.form_error.borrow().is_none());
    }

    #[test]
    fn errors_land_where_the_user_sees_them() {
        let app = state();
        app.mount(Route::Admin);

        let invalid = ActionError::Invalid(ValidationError::EmptyField { field: "title" });
        assert_eq!(app.place_error(&invalid), ErrorTarget::Form);
        assert_eq!(app.form_error.borrow().as_deref(), Some("title is required"));

        assert_eq!(
            app.place_error(&ActionError::Banner("down".into())),
            ErrorTarget::Banner("down".into())
        );
        assert_eq!(app.place_error(&ActionError::Cancelled), ErrorTarget::Silent);

        let token = app.mount_token();
        assert_eq!(app.place_error(&ActionError::SessionExpired), ErrorTarget::Redirect(Route::Login));
        assert!(!app.is_current(token));
    }

    #[test]
    fn logout_forgets_session_and_page() {
        let app = state();
        sign_in(&app, Role::Admin);
        app.mount(Route::Admin);
        app.logout();
        assert!(app.session.load().is_none());
        assert!(app.mount(Route::Admin));
        assert_eq!(app.check_access(Route::Admin), GuardState::Unauthorized);
    }
}
