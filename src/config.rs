use serde::{Deserialize, Serialize};

const DEFAULT_LOCAL_API_URL: &str = "http://localhost:10000";
const DEFAULT_REMOTE_API_URL: &str = "https://crime-report-backend.onrender.com";

/// Configuración de la aplicación, resuelta una sola vez al arrancar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url_local: String,
    pub api_url_remote: String,
    pub environment: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url_local: DEFAULT_LOCAL_API_URL.to_string(),
            api_url_remote: DEFAULT_REMOTE_API_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_URL_LOCAL"),
            option_env!("API_URL_REMOTE"),
            option_env!("ENVIRONMENT"),
            option_env!("ENABLE_LOGGING"),
        )
    }

    fn from_values(
        local: Option<&str>,
        remote: Option<&str>,
        environment: Option<&str>,
        enable_logging: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_url_local: local.map(str::to_string).unwrap_or(defaults.api_url_local),
            api_url_remote: remote.map(str::to_string).unwrap_or(defaults.api_url_remote),
            environment: environment.map(str::to_string).unwrap_or(defaults.environment),
            enable_logging: enable_logging
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
        }
    }

    /// URL base del backend según el entorno (local vs. remoto), sin '/' final
    pub fn api_base_url(&self) -> &str {
        let url = match self.environment.as_str() {
            "production" => &self.api_url_remote,
            _ => &self.api_url_local,
        };
        url.trim_end_matches('/')
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
