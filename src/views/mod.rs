// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin lógica de negocio)
// ============================================================================

pub mod shared;
pub mod app;
pub mod login;
pub mod dashboard;
pub mod admin_dashboard;
pub mod user_management;
pub mod status;

pub use app::render_app;
pub use login::render_login;
pub use dashboard::render_dashboard;
pub use admin_dashboard::render_admin_dashboard;
pub use user_management::render_user_management;
pub use status::render_status;
