//! Access gate integration tests
//!
//! Tokens are minted with the real JWT handler and checked by the gate
//! exactly as the middleware does it.

#[cfg(test)]
mod tests {
    use crate::common::assertions::AuditAssertions;
    use crate::common::{IdentityFactory, test_access_control};
    use backoffice_rbac::auth::audit::{AuditEventType, ClientInfo};
    use backoffice_rbac::auth::guard::ANONYMOUS_USER;
    use backoffice_rbac::{Action, DenialCode, Requirement, Resource, Role};

    fn client() -> ClientInfo {
        ClientInfo::new("10.1.2.3", "integration-test")
    }

    // ==================== Permission Decisions ====================

    #[tokio::test]
    async fn test_admin_can_approve_transactions_without_audit_noise() {
        let access = test_access_control(vec![]).await;
        let token = access
            .jwt()
            .create_access_token(&IdentityFactory::admin("admin-1"))
            .await
            .unwrap();

        let identity = access
            .guard()
            .authorize(
                Some(&token),
                Some(Requirement::new(Resource::Transacoes, Action::Approve)),
                &client(),
            )
            .await
            .unwrap();

        assert_eq!(identity.id, "admin-1");
        access.audit().assert_no_events();
    }

    #[tokio::test]
    async fn test_admin_cannot_change_critical_settings() {
        let access = test_access_control(vec![]).await;
        let token = access
            .jwt()
            .create_access_token(&IdentityFactory::admin("admin-1"))
            .await
            .unwrap();

        let denial = access
            .guard()
            .authorize(
                Some(&token),
                Some(Requirement::new(Resource::Configuracoes, Action::Critical)),
                &client(),
            )
            .await
            .unwrap_err();

        assert_eq!(denial.code, DenialCode::InsufficientPermission);
        assert_eq!(denial.status_code().as_u16(), 403);

        let events = access
            .audit()
            .assert_event_count(AuditEventType::AccessDenied, 1);
        assert_eq!(events[0].user_id, "admin-1");
        assert_eq!(events[0].ip_address, "10.1.2.3");
        assert_eq!(events[0].details["resource"], "configuracoes");
        assert_eq!(events[0].details["action"], "critical");
    }

    #[tokio::test]
    async fn test_super_admin_can_change_critical_settings() {
        let access = test_access_control(vec![]).await;
        let token = access
            .jwt()
            .create_access_token(&IdentityFactory::super_admin("root"))
            .await
            .unwrap();

        let result = access
            .guard()
            .authorize(
                Some(&token),
                Some(Requirement::new(Resource::Configuracoes, Action::Critical)),
                &client(),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_support_is_read_only_on_transactions() {
        let access = test_access_control(vec![]).await;
        let token = access
            .jwt()
            .create_access_token(&IdentityFactory::with_role("sup-1", Role::Support))
            .await
            .unwrap();
        let guard = access.guard();

        assert!(
            guard
                .authorize(
                    Some(&token),
                    Some(Requirement::new(Resource::Transacoes, Action::Read)),
                    &client(),
                )
                .await
                .is_ok()
        );
        let denial = guard
            .authorize(
                Some(&token),
                Some(Requirement::new(Resource::Transacoes, Action::Refund)),
                &client(),
            )
            .await
            .unwrap_err();
        assert_eq!(denial.code, DenialCode::InsufficientPermission);
    }

    // ==================== Token Failures ====================

    #[tokio::test]
    async fn test_missing_token_is_audited_as_anonymous() {
        let access = test_access_control(vec![]).await;

        let denial = access
            .guard()
            .authorize(None, None, &client())
            .await
            .unwrap_err();

        assert_eq!(denial.code, DenialCode::NoToken);
        assert_eq!(denial.status_code().as_u16(), 401);
        let events = access
            .audit()
            .assert_event_count(AuditEventType::AccessDenied, 1);
        assert_eq!(events[0].user_id, ANONYMOUS_USER);
    }

    #[tokio::test]
    async fn test_garbage_token_is_invalid() {
        let access = test_access_control(vec![]).await;

        let denial = access
            .guard()
            .authorize(Some("not.a.jwt"), None, &client())
            .await
            .unwrap_err();

        assert_eq!(denial.code, DenialCode::InvalidToken);
        assert_eq!(denial.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_impersonation_token_is_not_an_access_token() {
        let access = test_access_control(vec![]).await;
        let (token, _) = access
            .jwt()
            .create_impersonation_token("admin-1", "seller-1", "session-1", 60)
            .await
            .unwrap();

        let denial = access
            .guard()
            .authorize(Some(&token), None, &client())
            .await
            .unwrap_err();

        assert_eq!(denial.code, DenialCode::InvalidToken);
    }

    // ==================== Merchants and Conflicts ====================

    #[tokio::test]
    async fn test_every_merchant_role_is_refused() {
        let access = test_access_control(vec![]).await;

        for role in [Role::Seller, Role::Owner, Role::Member] {
            let token = access
                .jwt()
                .create_access_token(&IdentityFactory::with_role("m-1", role))
                .await
                .unwrap();

            let denial = access
                .guard()
                .authorize(Some(&token), None, &client())
                .await
                .unwrap_err();
            assert_eq!(denial.code, DenialCode::SellerAccessDenied, "role {}", role);
        }

        access
            .audit()
            .assert_event_count(AuditEventType::AccessDenied, 3);
    }

    #[tokio::test]
    async fn test_conflicting_identity_is_blocked_before_permissions() {
        let access = test_access_control(vec![]).await;
        let mut identity = IdentityFactory::super_admin("dual-1");
        identity.is_seller = true;
        let token = access.jwt().create_access_token(&identity).await.unwrap();

        let denial = access
            .guard()
            .authorize(
                Some(&token),
                Some(Requirement::resource(Resource::Dashboard)),
                &client(),
            )
            .await
            .unwrap_err();

        assert_eq!(denial.code, DenialCode::RoleConflict);
        access
            .audit()
            .assert_event_count(AuditEventType::RoleConflict, 1);
        access
            .audit()
            .assert_event_count(AuditEventType::AccessDenied, 0);
    }

    #[tokio::test]
    async fn test_seller_login_is_blocked_and_recorded() {
        let access = test_access_control(vec![]).await;
        let token = access
            .jwt()
            .create_access_token(&IdentityFactory::seller("seller-1"))
            .await
            .unwrap();

        let denial = access
            .guard()
            .check_backoffice_login(Some(&token), &client())
            .await
            .unwrap_err();

        assert_eq!(denial.code, DenialCode::SellerAccessDenied);
        let events = access
            .audit()
            .assert_event_count(AuditEventType::LoginBlocked, 1);
        assert_eq!(events[0].details["email"], "seller-1@example.com");
    }

    #[tokio::test]
    async fn test_operations_login_succeeds() {
        let access = test_access_control(vec![]).await;
        let token = access
            .jwt()
            .create_access_token(&IdentityFactory::with_role("ops-1", Role::Operations))
            .await
            .unwrap();

        let identity = access
            .guard()
            .check_backoffice_login(Some(&token), &client())
            .await
            .unwrap();

        assert_eq!(identity.role, Role::Operations);
        access.audit().assert_no_events();
    }
}
