//! Conflict rules

use super::types::{ConflictRules, UserRecord};
use crate::auth::identity::AuthenticatedIdentity;
use crate::auth::permissions::{Role, UserType};

/// Every rule the record violates, in rule order
pub fn conflict_reasons(user: &UserRecord, rules: &ConflictRules) -> Vec<String> {
    evaluate(
        user.role,
        user.user_type,
        user.company_id.as_deref(),
        user.is_admin,
        user.is_seller,
        rules,
    )
}

/// Same rules applied to a verified token identity
pub fn identity_conflicts(identity: &AuthenticatedIdentity, rules: &ConflictRules) -> Vec<String> {
    evaluate(
        identity.role,
        identity.user_type,
        identity.company_id.as_deref(),
        identity.is_admin,
        identity.is_seller,
        rules,
    )
}

fn evaluate(
    role: Role,
    user_type: UserType,
    company_id: Option<&str>,
    is_admin: bool,
    is_seller: bool,
    rules: &ConflictRules,
) -> Vec<String> {
    let mut conflicts = Vec::new();
    let admin_role = role.is_admin_role();
    let merchant_role = role.is_merchant_role();
    let company_id = company_id.filter(|id| !id.is_empty());

    if is_admin && is_seller {
        conflicts.push("User has both isAdmin and isSeller flags set".to_string());
    }

    if admin_role && user_type == UserType::Seller {
        conflicts.push(format!("Admin role {} assigned to SELLER user type", role));
    }
    if merchant_role && user_type == UserType::Admin {
        conflicts.push(format!("Seller role {} assigned to ADMIN user type", role));
    }

    if admin_role && is_seller {
        conflicts.push(format!("Admin role {} with isSeller flag set", role));
    }
    if merchant_role && is_admin {
        conflicts.push(format!("Seller role {} with isAdmin flag set", role));
    }

    if merchant_role && company_id.is_none() {
        conflicts.push(format!("Seller role {} without companyId", role));
    }

    if rules.flag_admin_with_company && admin_role {
        if let Some(id) = company_id {
            conflicts.push(format!("Admin role {} with companyId {}", role, id));
        }
    }

    conflicts
}
