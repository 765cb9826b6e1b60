// ============================================================================
// SESSION STORE - Identidad + token persistidos juntos
// ============================================================================
// Invariante: las dos claves se escriben o se borran juntas. Una clave suelta
// (p. ej. tras un fallo a medias en otra pestaña) cuenta como "sin sesión".
// No hay expiración local: el token vale hasta que el backend devuelva 401.
// ============================================================================

use std::rc::Rc;

use crate::models::{Identity, Session};
use crate::utils::{
    load_json, save_json, KeyValueStorage, LocalStorage, MemoryStorage, StorageError,
    STORAGE_KEY_TOKEN, STORAGE_KEY_USER,
};

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// localStorage si existe, memoria si no (modo privado, etc.)
    pub fn browser() -> Self {
        if LocalStorage::is_available() {
            Self::new(Rc::new(LocalStorage))
        } else {
            log::warn!("⚠️ [SESSION] localStorage no disponible, sesión solo en memoria");
            Self::new(Rc::new(MemoryStorage::new()))
        }
    }

    pub fn load(&self) -> Option<Session> {
        let token = self.storage.get(STORAGE_KEY_TOKEN);
        let identity = load_json::<Identity>(self.storage.as_ref(), STORAGE_KEY_USER);

        match (token, identity) {
            (Some(token), Some(identity)) if !token.is_empty() => Some(Session::new(identity, token)),
            (None, None) if self.storage.get(STORAGE_KEY_USER).is_none() => None,
            _ => {
                log::warn!("⚠️ [SESSION] Sesión incompleta en storage, limpiando");
                if let Err(e) = self.clear() {
                    log::error!("❌ [SESSION] Error limpiando sesión incompleta: {}", e);
                }
                None
            }
        }
    }

    /// Persiste token + identidad. Si la segunda escritura falla se deshace la primera.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        self.storage.set(STORAGE_KEY_TOKEN, &session.token)?;
        if let Err(e) = save_json(self.storage.as_ref(), STORAGE_KEY_USER, &session.identity) {
            let _ = self.storage.remove(STORAGE_KEY_TOKEN);
            return Err(e);
        }
        log::info!("💾 [SESSION] Sesión guardada para {}", session.identity.name);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.storage.remove(STORAGE_KEY_TOKEN);
        let user = self.storage.remove(STORAGE_KEY_USER);
        log::info!("🗑️ [SESSION] Sesión eliminada");
        token.and(user)
    }

    pub fn token(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn admin_session() -> Session {
        Session::new(
            Identity {
                id: "u-1".into(),
                name: "Ada".into(),
                role: Role::Admin,
                email: None,
            },
            "tok-123",
        )
    }

    fn store() -> (Rc<MemoryStorage>, SessionStore) {
        let storage = Rc::new(MemoryStorage::new());
        (storage.clone(), SessionStore::new(storage))
    }

    #[test]
    fn save_then_load_returns_same_session() {
        let (_, store) = store();
        store.save(&admin_session()).unwrap();
        assert_eq!(store.load(), Some(admin_session()));
        assert_eq!(store.token().as_deref(), Some("tok-123"));
    }

    #[test]
    fn clear_removes_both_keys() {
        let (storage, store) = store();
        store.save(&admin_session()).unwrap();
        store.clear().unwrap();
        assert!(storage.is_empty());
        assert!(store.load().is_none());
    }

    #[test]
    fn failed_identity_write_rolls_back_token() {
        let (storage, store) = store();
        storage.reject_writes_to(STORAGE_KEY_USER);
        assert!(store.save(&admin_session()).is_err());
        assert!(storage.get(STORAGE_KEY_TOKEN).is_none());
        assert!(store.load().is_none());
    }

    #[test]
    fn lone_token_is_not_a_session_and_is_removed() {
        let (storage, store) = store();
        storage.set(STORAGE_KEY_TOKEN, "orphan").unwrap();
        assert!(store.load().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn corrupt_identity_is_not_a_session() {
        let (storage, store) = store();
        storage.set(STORAGE_KEY_TOKEN, "tok").unwrap();
        storage.set(STORAGE_KEY_USER, "{broken").unwrap();
        assert!(store.load().is_none());
        assert!(storage.is_empty());
    }
}
