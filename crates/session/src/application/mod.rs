//! Application Layer
//!
//! Session manager and its configuration.

pub mod config;
pub mod manager;

pub use config::SessionConfig;
pub use manager::SessionManager;
