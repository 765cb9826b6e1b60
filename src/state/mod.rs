// ============================================================================
// STATE MODULE - State Management con Rc<RefCell>
// ============================================================================

pub mod resource_list;
pub mod session_store;
pub mod route_guard;
pub mod banner;
pub mod app_state;

pub use resource_list::*;
pub use session_store::*;
pub use route_guard::*;
pub use banner::*;
pub use app_state::*;
