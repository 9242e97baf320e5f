pub mod document;
pub mod placeholder;
pub mod session;
