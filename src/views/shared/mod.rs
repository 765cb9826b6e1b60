pub mod actions;
pub mod banner;
pub mod form;
pub mod header;
pub mod pagination;

pub use actions::{report_error, run_action};
pub use banner::{render_banner, render_form_error};
pub use form::{button, form_field, status_badge, FieldKind};
pub use header::render_header;
pub use pagination::render_pagination;
