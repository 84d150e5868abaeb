//! Configuration data models
//!
//! This module defines all configuration structures used by the service.

#![allow(missing_docs)]

pub mod app;
pub mod audit;
pub mod auth;
pub mod conflicts;
pub mod impersonation;
pub mod server;

// Re-export all configuration types
pub use app::*;
pub use audit::*;
pub use auth::*;
pub use conflicts::*;
pub use impersonation::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// One day in seconds
pub fn default_daily_interval() -> u64 {
    86_400
}

pub fn default_true() -> bool {
    true
}
