pub mod feedback;
pub mod auth_viewmodel;
pub mod crimes_viewmodel;
pub mod users_viewmodel;
pub mod status_viewmodel;

pub use feedback::{ActionError, BrowserConfirm};
pub use auth_viewmodel::{AuthViewModel, ProviderKind};
pub use crimes_viewmodel::CrimesViewModel;
pub use users_viewmodel::UsersViewModel;
pub use status_viewmodel::{check_api_status, ApiStatus};
