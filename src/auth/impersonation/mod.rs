//! Seller impersonation

mod service;
mod types;

pub use service::ImpersonationService;
pub use types::{ImpersonationEnd, ImpersonationSession, ImpersonationStart, SESSION_TTL_SECS};
