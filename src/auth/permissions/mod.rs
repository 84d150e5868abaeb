//! Role permission table
//!
//! Static mapping from [`Role`] to a complete [`PermissionSet`]. Lookups are
//! pure; unknown resource/action combinations are denied.

mod matrix;
mod types;

pub use matrix::{can_access, can_access_typed, get_permissions};
pub use types::{
    Action, ActionSet, AuditPermissions, CommercialPermissions, PermissionSet, Resource, Role,
    SettingsPermissions, TransactionPermissions, UserPermissions, UserType,
};
