//! Access decision types

use crate::auth::permissions::{Action, Resource};
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable reason for a denied request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenialCode {
    RoleConflict,
    SellerAccessDenied,
    InsufficientRole,
    InsufficientPermission,
    NoToken,
    InvalidToken,
    AuthError,
}

impl DenialCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialCode::RoleConflict => "ROLE_CONFLICT",
            DenialCode::SellerAccessDenied => "SELLER_ACCESS_DENIED",
            DenialCode::InsufficientRole => "INSUFFICIENT_ROLE",
            DenialCode::InsufficientPermission => "INSUFFICIENT_PERMISSION",
            DenialCode::NoToken => "NO_TOKEN",
            DenialCode::InvalidToken => "INVALID_TOKEN",
            DenialCode::AuthError => "AUTH_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            DenialCode::NoToken | DenialCode::InvalidToken => StatusCode::UNAUTHORIZED,
            DenialCode::AuthError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::FORBIDDEN,
        }
    }
}

impl fmt::Display for DenialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A refused request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub code: DenialCode,
    pub message: String,
}

/// Wire shape of a denial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenialBody {
    pub error: String,
    pub message: String,
    pub code: DenialCode,
}

impl Denial {
    pub fn new(code: DenialCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    pub fn body(&self) -> DenialBody {
        DenialBody {
            error: self
                .status_code()
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.message.clone(),
            code: self.code,
        }
    }

    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Resource and optional action a route needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub resource: Resource,
    pub action: Option<Action>,
}

impl Requirement {
    pub fn new(resource: Resource, action: Action) -> Self {
        Self {
            resource,
            action: Some(action),
        }
    }

    /// Coarse access to a resource
    pub fn resource(resource: Resource) -> Self {
        Self {
            resource,
            action: None,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Some(action) => write!(f, "{}.{}", self.resource, action),
            None => write!(f, "{}", self.resource),
        }
    }
}
