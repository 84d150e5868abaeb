//! Backoffice access gate

mod guard;
mod types;

pub use guard::{ANONYMOUS_USER, RbacGuard};
pub use types::{Denial, DenialBody, DenialCode, Requirement};
