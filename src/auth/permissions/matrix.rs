//! Static role → capability table

use super::types::{
    Action, AuditPermissions, CommercialPermissions, PermissionSet, Resource, Role,
    SettingsPermissions, TransactionPermissions, UserPermissions,
};

static SUPER_ADMIN: PermissionSet = PermissionSet {
    backoffice: true,
    dashboard: true,
    relatorios: true,
    usuarios: UserPermissions {
        read: true,
        write: true,
        approve: true,
        impersonate: true,
        delete: true,
    },
    transacoes: TransactionPermissions {
        read: true,
        approve: true,
        refund: true,
        export: true,
    },
    auditoria: AuditPermissions {
        read: true,
        export: true,
    },
    configuracoes: SettingsPermissions {
        read: true,
        write: true,
        critical: true,
    },
    comercial: CommercialPermissions {
        read: true,
        write: true,
    },
};

static ADMIN: PermissionSet = PermissionSet {
    backoffice: true,
    dashboard: true,
    relatorios: true,
    usuarios: UserPermissions {
        read: true,
        write: true,
        approve: true,
        impersonate: true,
        delete: false,
    },
    transacoes: TransactionPermissions {
        read: true,
        approve: true,
        refund: true,
        export: true,
    },
    auditoria: AuditPermissions {
        read: true,
        export: true,
    },
    configuracoes: SettingsPermissions {
        read: true,
        write: true,
        critical: false,
    },
    comercial: CommercialPermissions {
        read: true,
        write: true,
    },
};

static OPERATIONS: PermissionSet = PermissionSet {
    backoffice: true,
    dashboard: true,
    relatorios: true,
    usuarios: UserPermissions {
        read: true,
        write: true,
        approve: true,
        impersonate: false,
        delete: false,
    },
    transacoes: TransactionPermissions {
        read: true,
        approve: true,
        refund: false,
        export: true,
    },
    auditoria: AuditPermissions {
        read: true,
        export: false,
    },
    configuracoes: SettingsPermissions {
        read: true,
        write: false,
        critical: false,
    },
    comercial: CommercialPermissions {
        read: true,
        write: false,
    },
};

static SUPPORT: PermissionSet = PermissionSet {
    backoffice: true,
    dashboard: true,
    relatorios: false,
    usuarios: UserPermissions {
        read: true,
        write: false,
        approve: false,
        impersonate: true,
        delete: false,
    },
    transacoes: TransactionPermissions {
        read: true,
        approve: false,
        refund: false,
        export: false,
    },
    auditoria: AuditPermissions {
        read: false,
        export: false,
    },
    configuracoes: SettingsPermissions {
        read: false,
        write: false,
        critical: false,
    },
    comercial: CommercialPermissions {
        read: true,
        write: false,
    },
};

// Merchant roles have no backoffice capability.
static NO_ACCESS: PermissionSet = PermissionSet {
    backoffice: false,
    dashboard: false,
    relatorios: false,
    usuarios: UserPermissions {
        read: false,
        write: false,
        approve: false,
        impersonate: false,
        delete: false,
    },
    transacoes: TransactionPermissions {
        read: false,
        approve: false,
        refund: false,
        export: false,
    },
    auditoria: AuditPermissions {
        read: false,
        export: false,
    },
    configuracoes: SettingsPermissions {
        read: false,
        write: false,
        critical: false,
    },
    comercial: CommercialPermissions {
        read: false,
        write: false,
    },
};

/// Complete permission set of a role
pub fn get_permissions(role: Role) -> &'static PermissionSet {
    match role {
        Role::SuperAdmin => &SUPER_ADMIN,
        Role::Admin => &ADMIN,
        Role::Operations => &OPERATIONS,
        Role::Support => &SUPPORT,
        Role::Seller | Role::Owner | Role::Member => &NO_ACCESS,
    }
}

/// Typed resource/action check
pub fn can_access_typed(role: Role, resource: Resource, action: Option<Action>) -> bool {
    get_permissions(role).allows(resource, action)
}

/// String-keyed check used at the HTTP edge.
///
/// Unknown resources and unknown actions are denied.
pub fn can_access(role: Role, resource: &str, action: Option<&str>) -> bool {
    let Ok(resource) = resource.parse::<Resource>() else {
        return false;
    };

    let action = match action {
        None => None,
        Some(name) => match name.parse::<Action>() {
            Ok(action) => Some(action),
            Err(_) => return false,
        },
    };

    can_access_typed(role, resource, action)
}
