use crate::services::{ApiClient, ApiError};

/// Estado de conexión con el backend (página /status)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Checking,
    Connected { login_required: bool },
    Disconnected,
}

impl ApiStatus {
    pub fn message(&self, base_url: &str) -> String {
        match self {
            ApiStatus::Checking => "Checking backend connection...".to_string(),
            ApiStatus::Connected { login_required: true } => {
                "✅ Backend API is connected! (Login required)".to_string()
            }
            ApiStatus::Connected { login_required: false } => "✅ Backend API is working!".to_string(),
            ApiStatus::Disconnected => format!("❌ Cannot connect to backend: {}", base_url),
        }
    }
}

pub async fn check_api_status(api: &ApiClient) -> ApiStatus {
    match api.probe().await {
        Ok(status) => ApiStatus::Connected {
            login_required: status == 401,
        },
        Err(ApiError::Connectivity(e)) => {
            log::error!("❌ [STATUS] Backend inalcanzable en {}: {}", api.base_url(), e);
            ApiStatus::Disconnected
        }
        Err(e) => {
            log::warn!("⚠️ [STATUS] Respuesta inesperada: {}", e);
            ApiStatus::Connected { login_required: false }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::mock::MockTransport;
    use crate::state::SessionStore;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use std::rc::Rc;

    #[test]
    fn probe_results_map_to_status() {
        let transport = Rc::new(MockTransport::new());
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let api = ApiClient::with_transport("http://api.test", transport.clone(), store);

        transport.push_status(401);
        transport.push_status(200);
        transport.push_network_error();

        assert_eq!(block_on(check_api_status(&api)), ApiStatus::Connected { login_required: true });
        assert_eq!(block_on(check_api_status(&api)), ApiStatus::Connected { login_required: false });
        let down = block_on(check_api_status(&api));
        assert_eq!(down, ApiStatus::Disconnected);
        assert_eq!(down.message(api.base_url()), "❌ Cannot connect to backend: http://api.test");
    }
}
