//! Permission type definitions

use crate::utils::error::BackofficeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role assigned to an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Unrestricted backoffice administrator
    SuperAdmin,
    /// Backoffice administrator
    Admin,
    /// Operations staff
    Operations,
    /// Customer support staff
    Support,
    /// Merchant account
    Seller,
    /// Merchant company owner
    Owner,
    /// Merchant company member
    Member,
}

impl Role {
    /// Every defined role
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Operations,
        Role::Support,
        Role::Seller,
        Role::Owner,
        Role::Member,
    ];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Operations => "OPERATIONS",
            Role::Support => "SUPPORT",
            Role::Seller => "SELLER",
            Role::Owner => "OWNER",
            Role::Member => "MEMBER",
        }
    }

    /// Internal staff role
    pub fn is_admin_role(&self) -> bool {
        matches!(
            self,
            Role::SuperAdmin | Role::Admin | Role::Operations | Role::Support
        )
    }

    /// External merchant role
    pub fn is_merchant_role(&self) -> bool {
        !self.is_admin_role()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = BackofficeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| BackofficeError::validation(format!("Unknown role: {}", s)))
    }
}

/// Kind of identity, independent of its role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// Internal administrative identity
    Admin,
    /// External merchant identity
    Seller,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "ADMIN",
            UserType::Seller => "SELLER",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backoffice resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Dashboard,
    Relatorios,
    Usuarios,
    Transacoes,
    Auditoria,
    Configuracoes,
    Comercial,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Dashboard,
        Resource::Relatorios,
        Resource::Usuarios,
        Resource::Transacoes,
        Resource::Auditoria,
        Resource::Configuracoes,
        Resource::Comercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Dashboard => "dashboard",
            Resource::Relatorios => "relatorios",
            Resource::Usuarios => "usuarios",
            Resource::Transacoes => "transacoes",
            Resource::Auditoria => "auditoria",
            Resource::Configuracoes => "configuracoes",
            Resource::Comercial => "comercial",
        }
    }

    /// Resources guarded by a set of named actions rather than one flag
    pub fn is_structured(&self) -> bool {
        !matches!(self, Resource::Dashboard | Resource::Relatorios)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = BackofficeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| BackofficeError::validation(format!("Unknown resource: {}", s)))
    }
}

/// Action on a structured resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
    Approve,
    Impersonate,
    Delete,
    Refund,
    Export,
    Critical,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Read,
        Action::Write,
        Action::Approve,
        Action::Impersonate,
        Action::Delete,
        Action::Refund,
        Action::Export,
        Action::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Approve => "approve",
            Action::Impersonate => "impersonate",
            Action::Delete => "delete",
            Action::Refund => "refund",
            Action::Export => "export",
            Action::Critical => "critical",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = BackofficeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| BackofficeError::validation(format!("Unknown action: {}", s)))
    }
}

/// Named actions of one structured resource
pub trait ActionSet {
    /// Whether `action` is granted; actions the resource does not define are denied
    fn allows(&self, action: Action) -> bool;
}

/// `usuarios`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UserPermissions {
    pub read: bool,
    pub write: bool,
    pub approve: bool,
    pub impersonate: bool,
    pub delete: bool,
}

impl ActionSet for UserPermissions {
    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Write => self.write,
            Action::Approve => self.approve,
            Action::Impersonate => self.impersonate,
            Action::Delete => self.delete,
            _ => false,
        }
    }
}

/// `transacoes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TransactionPermissions {
    pub read: bool,
    pub approve: bool,
    pub refund: bool,
    pub export: bool,
}

impl ActionSet for TransactionPermissions {
    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Approve => self.approve,
            Action::Refund => self.refund,
            Action::Export => self.export,
            _ => false,
        }
    }
}

/// `auditoria`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AuditPermissions {
    pub read: bool,
    pub export: bool,
}

impl ActionSet for AuditPermissions {
    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Export => self.export,
            _ => false,
        }
    }
}

/// `configuracoes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SettingsPermissions {
    pub read: bool,
    pub write: bool,
    pub critical: bool,
}

impl ActionSet for SettingsPermissions {
    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Write => self.write,
            Action::Critical => self.critical,
            _ => false,
        }
    }
}

/// `comercial`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CommercialPermissions {
    pub read: bool,
    pub write: bool,
}

impl ActionSet for CommercialPermissions {
    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Write => self.write,
            _ => false,
        }
    }
}

/// Complete capability set of one role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PermissionSet {
    /// Coarse access to the backoffice surface at all
    pub backoffice: bool,
    pub dashboard: bool,
    pub relatorios: bool,
    pub usuarios: UserPermissions,
    pub transacoes: TransactionPermissions,
    pub auditoria: AuditPermissions,
    pub configuracoes: SettingsPermissions,
    pub comercial: CommercialPermissions,
}

impl PermissionSet {
    /// Coarse backoffice access
    pub fn has_backoffice_access(&self) -> bool {
        self.backoffice
    }

    /// Resource/action check.
    ///
    /// Boolean resources accept no action or `read`. Structured resources
    /// require an action; an omitted action is an ambiguous query and is denied.
    pub fn allows(&self, resource: Resource, action: Option<Action>) -> bool {
        match resource {
            Resource::Dashboard => coarse(self.dashboard, action),
            Resource::Relatorios => coarse(self.relatorios, action),
            Resource::Usuarios => action.is_some_and(|a| self.usuarios.allows(a)),
            Resource::Transacoes => action.is_some_and(|a| self.transacoes.allows(a)),
            Resource::Auditoria => action.is_some_and(|a| self.auditoria.allows(a)),
            Resource::Configuracoes => action.is_some_and(|a| self.configuracoes.allows(a)),
            Resource::Comercial => action.is_some_and(|a| self.comercial.allows(a)),
        }
    }
}

fn coarse(flag: bool, action: Option<Action>) -> bool {
    flag && matches!(action, None | Some(Action::Read))
}
