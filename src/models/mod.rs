pub mod session;
pub mod crime;
pub mod user;
pub mod auth;
pub mod stats;
pub mod validation;

pub use session::{Identity, Role, Session};
pub use crime::{CrimeDraft, CrimeReport, CrimeStatus, CrimeUpdate};
pub use user::{NewAdmin, UserAccount};
pub use auth::{AuthResponse, FacebookLoginRequest, GoogleLoginRequest, LoginRequest};
pub use stats::{monthly_counts, StatusBreakdown};
pub use validation::{require_filled, ValidationError};
