//! Test fixtures and data factories
//!
//! Factory methods for identities and directory records with sensible
//! defaults. All factories create real objects, not mocks.

use backoffice_rbac::auth::conflict::UserRecord;
use backoffice_rbac::{AuthenticatedIdentity, Role, UserType};

/// Factory for token identities
pub struct IdentityFactory;

impl IdentityFactory {
    /// Consistent identity for any role
    pub fn with_role(id: &str, role: Role) -> AuthenticatedIdentity {
        let merchant = role.is_merchant_role();
        AuthenticatedIdentity {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            role,
            user_type: if merchant {
                UserType::Seller
            } else {
                UserType::Admin
            },
            company_id: merchant.then(|| "company-1".to_string()),
            is_admin: !merchant,
            is_seller: merchant,
        }
    }

    pub fn admin(id: &str) -> AuthenticatedIdentity {
        Self::with_role(id, Role::Admin)
    }

    pub fn super_admin(id: &str) -> AuthenticatedIdentity {
        Self::with_role(id, Role::SuperAdmin)
    }

    pub fn seller(id: &str) -> AuthenticatedIdentity {
        Self::with_role(id, Role::Seller)
    }
}

/// Factory for directory records
pub struct UserFactory;

impl UserFactory {
    /// Consistent record for any role
    pub fn with_role(id: &str, role: Role) -> UserRecord {
        let identity = IdentityFactory::with_role(id, role);
        UserRecord {
            id: identity.id,
            email: identity.email,
            role: identity.role,
            user_type: identity.user_type,
            company_id: identity.company_id,
            is_admin: identity.is_admin,
            is_seller: identity.is_seller,
        }
    }

    pub fn seller(id: &str) -> UserRecord {
        Self::with_role(id, Role::Seller)
    }

    /// Admin that also carries the seller flag
    pub fn admin_with_seller_flag(id: &str) -> UserRecord {
        UserRecord {
            is_seller: true,
            ..Self::with_role(id, Role::Admin)
        }
    }

    /// Member without a company
    pub fn orphan_member(id: &str) -> UserRecord {
        UserRecord {
            company_id: None,
            ..Self::with_role(id, Role::Member)
        }
    }
}
