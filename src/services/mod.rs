pub mod error;
pub mod transport;
pub mod api_client;
pub mod identity_provider;

pub use error::ApiError;
pub use api_client::ApiClient;
pub use identity_provider::{IdentityProvider, PopupProvider};
