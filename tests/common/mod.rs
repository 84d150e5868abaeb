//! Common test utilities for backoffice-rbac
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, test_access_control};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let access = test_access_control(vec![fixtures::UserFactory::seller("s1")]).await;
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{IdentityFactory, UserFactory};

use backoffice_rbac::auth::conflict::{InMemoryUserDirectory, UserRecord};
use backoffice_rbac::{AccessControl, Config};
use std::sync::Arc;

/// Signing secret shared by all integration tests
pub const TEST_SECRET: &str = "Integration_Test_Secret_0123456789_ABCDEF";

/// Valid configuration with a fixed secret
pub fn test_config() -> Config {
    Config::from_yaml_str(&format!("auth:\n  jwt_secret: \"{TEST_SECRET}\"\n"))
        .expect("test config must be valid")
}

/// Access-control services over an in-memory directory
pub async fn test_access_control(users: Vec<UserRecord>) -> AccessControl {
    AccessControl::new(
        &test_config(),
        Arc::new(InMemoryUserDirectory::with_users(users)),
    )
    .await
    .expect("access control must build")
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
