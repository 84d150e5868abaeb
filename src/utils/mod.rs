//! Utility modules
//!
//! - **error**: crate error type and HTTP mapping
//! - **logging**: tracing subscriber setup
//! - **csv**: minimal CSV field escaping shared by the report exporters

pub mod csv;
pub mod error;
pub mod logging;

pub use logging::{LogFormat, init_logging};

/// Generate a unique identifier
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
