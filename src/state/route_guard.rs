// ============================================================================
// ROUTE GUARD - Máquina de estados de acceso a una página protegida
// ============================================================================
//   Checking ──resolve──> Authorized | Unauthorized
//   (entrada directa a Authorized/Unauthorized si no hay proveedor pendiente)
// Una vez resuelto nunca vuelve a Checking.
// ============================================================================

use crate::router::{Access, Route};
use crate::state::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Esperando el callback de un proveedor de identidad externo
    Checking,
    Authorized,
    Unauthorized,
}

impl GuardState {
    /// Ruta a la que redirigir, si no se puede renderizar la página
    pub fn redirect(self) -> Option<Route> {
        match self {
            GuardState::Unauthorized => Some(Route::Login),
            GuardState::Checking | GuardState::Authorized => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    access: Access,
    state: GuardState,
}

impl RouteGuard {
    /// Entrada en una ruta. Con `provider_pending` el guard queda en Checking
    /// hasta que se llame a `resolve`.
    pub fn enter(access: Access, store: &SessionStore, provider_pending: bool) -> Self {
        let mut guard = Self {
            access,
            state: GuardState::Checking,
        };
        if !provider_pending {
            guard.resolve(store);
        }
        guard
    }

    /// Decide con la sesión actual. Idempotente una vez resuelto el estado.
    pub fn resolve(&mut self, store: &SessionStore) -> GuardState {
        if self.state != GuardState::Checking {
            return self.state;
        }
        self.state = Self::decide(self.access, store);
        log::debug!("🛡️ [GUARD] {:?} -> {:?}", self.access, self.state);
        self.state
    }

    fn decide(access: Access, store: &SessionStore) -> GuardState {
        let allowed = match access {
            Access::Public => true,
            Access::Authenticated => store.load().is_some(),
            Access::Admin => store.load().is_some_and(|s| s.is_admin()),
        };
        if allowed {
            GuardState::Authorized
        } else {
            GuardState::Unauthorized
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }
}
