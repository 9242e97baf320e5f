//! Pure substitution and validation logic shared by the frontend preview and
//! the backend exporters. Both sides must produce identical output for the
//! same descriptor list, which is why this lives in `common` rather than in
//! either binary.

mod substitute;
mod validate;

pub use substitute::{format_value, substitute, substitute_with};
pub use validate::validate;
