//! JWT token handling
//!
//! Signs and verifies backoffice access tokens and short-lived
//! impersonation tokens with a shared HMAC secret.

mod handler;
pub mod types;
mod utils;


pub use types::{
    ACCESS_AUDIENCE, Claims, IMPERSONATION_AUDIENCE, ImpersonationClaims, JwtHandler, TokenType,
};
