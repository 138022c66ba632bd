//! consolescreen: full-screen text forms with validated fields.

pub mod art;
pub mod config;
pub mod error;
pub mod layout;
pub mod tui;
pub mod types;
pub mod validate;
