//! Integration tests for backoffice-rbac
//!
//! These tests drive the public API the way the HTTP layer and background
//! tasks do, without mocking.

pub mod access_tests;
pub mod audit_sink_tests;
pub mod config_validation_tests;
pub mod conflict_tests;
pub mod error_handling_tests;
pub mod impersonation_tests;
