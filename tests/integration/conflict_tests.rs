//! Conflict detection integration tests

#[cfg(test)]
mod tests {
    use crate::common::assertions::AuditAssertions;
    use crate::common::{IdentityFactory, UserFactory, test_access_control, test_config};
    use backoffice_rbac::auth::audit::{AuditEventType, ClientInfo};
    use backoffice_rbac::auth::conflict::{ConflictResolution, InMemoryUserDirectory};
    use backoffice_rbac::{AccessControl, BackofficeError, Role, UserType};
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_scan_finds_only_conflicting_users() {
        let access = test_access_control(vec![
            UserFactory::with_role("clean-admin", Role::Admin),
            UserFactory::seller("clean-seller"),
            UserFactory::admin_with_seller_flag("dual"),
            UserFactory::orphan_member("orphan"),
        ])
        .await;

        let found = access.conflicts().detect_conflicting_users().await.unwrap();

        let ids: Vec<&str> = found.iter().map(|c| c.user.id.as_str()).collect();
        assert_eq!(ids, vec!["dual", "orphan"]);
        assert_eq!(found[0].conflicts.len(), 2);
        assert_eq!(
            found[1].conflicts,
            vec!["Seller role MEMBER without companyId".to_string()]
        );

        let events = access
            .audit()
            .assert_event_count(AuditEventType::RoleConflict, 2);
        assert!(events.iter().all(|e| e.ip_address == "system"));
        assert!(access.conflicts().last_scan_at().is_some());
    }

    #[tokio::test]
    async fn test_report_lists_conflicts() {
        let access = test_access_control(vec![UserFactory::admin_with_seller_flag("dual")]).await;

        let report = access.conflicts().generate_conflict_report().await.unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "user_id,email,role,user_type,flags,company_id,conflicts");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("dual,dual@example.com,ADMIN,ADMIN,isAdmin | isSeller,,"));
        assert!(lines[1].contains("User has both isAdmin and isSeller flags set"));
    }

    #[tokio::test]
    async fn test_empty_report_has_marker_line() {
        let access = test_access_control(vec![UserFactory::seller("clean")]).await;

        let report = access.conflicts().generate_conflict_report().await.unwrap();

        assert!(report.ends_with("# No conflicting users found"));
    }

    #[tokio::test]
    async fn test_force_admin_clears_conflict() {
        let directory = Arc::new(InMemoryUserDirectory::with_users(vec![
            UserFactory::admin_with_seller_flag("dual"),
        ]));
        let access = AccessControl::new(&test_config(), directory.clone())
            .await
            .unwrap();
        let detector = access.conflicts();

        let resolved = detector
            .resolve_user_conflict("dual", ConflictResolution::ForceAdmin, "root")
            .await
            .unwrap();

        assert!(resolved.is_admin && !resolved.is_seller);
        assert_eq!(resolved.user_type, UserType::Admin);
        assert!(detector.detect_conflicting_users().await.unwrap().is_empty());

        let events = access
            .audit()
            .assert_event_count(AuditEventType::RoleConflictResolved, 1);
        assert_eq!(events[0].admin_user_id.as_deref(), Some("root"));
        assert_eq!(events[0].details["resolution"], "FORCE_ADMIN");
    }

    #[tokio::test]
    async fn test_suspend_marks_account() {
        let directory = Arc::new(InMemoryUserDirectory::with_users(vec![
            UserFactory::orphan_member("orphan"),
        ]));
        let access = AccessControl::new(&test_config(), directory.clone())
            .await
            .unwrap();

        access
            .conflicts()
            .resolve_user_conflict("orphan", ConflictResolution::Suspend, "root")
            .await
            .unwrap();

        assert!(directory.is_suspended("orphan"));
    }

    #[tokio::test]
    async fn test_resolving_unknown_user_fails() {
        let access = test_access_control(vec![]).await;

        let err = access
            .conflicts()
            .resolve_user_conflict("ghost", ConflictResolution::Suspend, "root")
            .await
            .unwrap_err();

        assert!(matches!(err, BackofficeError::NotFound(_)));
        access.audit().assert_no_events();
    }

    #[tokio::test]
    async fn test_directory_file_feeds_the_scan() {
        let users = vec![
            UserFactory::seller("s1"),
            UserFactory::admin_with_seller_flag("dual"),
        ];
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&users).unwrap().as_bytes())
            .unwrap();

        let directory = InMemoryUserDirectory::from_file(file.path()).await.unwrap();
        assert_eq!(directory.len(), 2);

        let access = AccessControl::new(&test_config(), Arc::new(directory))
            .await
            .unwrap();
        let found = access.conflicts().detect_conflicting_users().await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_admin_with_company_rule_is_configurable() {
        let mut identity = IdentityFactory::admin("admin-1");
        identity.company_id = Some("company-9".to_string());

        let strict = test_access_control(vec![]).await;
        assert_eq!(
            strict.conflicts().check_identity(&identity),
            vec!["Admin role ADMIN with companyId company-9".to_string()]
        );

        let mut config = test_config();
        config.app.conflicts.flag_admin_with_company = false;
        let lenient = AccessControl::new(&config, Arc::new(InMemoryUserDirectory::new()))
            .await
            .unwrap();
        assert!(lenient.conflicts().check_identity(&identity).is_empty());

        let token = lenient.jwt().create_access_token(&identity).await.unwrap();
        assert!(
            lenient
                .guard()
                .authorize(Some(&token), None, &ClientInfo::default())
                .await
                .is_ok()
        );
    }
}
