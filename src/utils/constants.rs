/// Clave de localStorage del bearer token
pub const STORAGE_KEY_TOKEN: &str = "token";

/// Clave de localStorage de la identidad (JSON)
pub const STORAGE_KEY_USER: &str = "user";

/// Tamaño de página de la tabla de revisión de reportes (admin)
pub const REVIEW_PAGE_SIZE: usize = 5;

/// Reportes recientes mostrados en el dashboard de usuario
pub const RECENT_REPORTS_LIMIT: usize = 9;

/// Los banners de éxito/error se ocultan solos tras este tiempo
pub const BANNER_TIMEOUT_MS: u32 = 3_000;

/// Tamaño de página de la gestión de usuarios
pub const USER_PAGE_SIZE: usize = 10;
