//! Impersonation lifecycle integration tests

#[cfg(test)]
mod tests {
    use crate::common::assertions::AuditAssertions;
    use crate::common::test_access_control;
    use backoffice_rbac::BackofficeError;
    use backoffice_rbac::auth::audit::{AuditEventType, AuditFilter, ClientInfo};
    use backoffice_rbac::auth::impersonation::SESSION_TTL_SECS;

    fn client() -> ClientInfo {
        ClientInfo::new("192.168.0.10", "integration-test")
    }

    #[tokio::test]
    async fn test_full_impersonation_lifecycle() {
        let access = test_access_control(vec![]).await;
        let service = access.impersonation();

        let started = service
            .start_impersonation("admin-1", "seller-1", "seller@shop.test", &client())
            .await
            .unwrap();
        assert!(started.dashboard_url.ends_with("?impersonating=seller-1"));

        let session = service
            .validate_impersonation_token(&started.session_token)
            .await
            .expect("session should be live");
        assert_eq!(session.admin_user_id, "admin-1");
        assert_eq!(
            (session.expires_at - session.started_at).num_seconds(),
            SESSION_TTL_SECS as i64
        );

        let ended = service
            .end_impersonation(&started.session_token, &client())
            .await
            .unwrap();
        assert_eq!(ended.session_id, started.session_id);

        assert!(
            service
                .validate_impersonation_token(&started.session_token)
                .await
                .is_none()
        );

        let audit = access.audit();
        let start_events = audit.assert_event_count(AuditEventType::ImpersonationStart, 1);
        assert_eq!(start_events[0].seller_user_id.as_deref(), Some("seller-1"));
        let end_events = audit.assert_event_count(AuditEventType::ImpersonationEnd, 1);
        assert_eq!(end_events[0].details["forced"], false);
    }

    #[tokio::test]
    async fn test_second_admin_cannot_impersonate_same_seller() {
        let access = test_access_control(vec![]).await;
        let service = access.impersonation();

        service
            .start_impersonation("admin-1", "seller-1", "s@x.test", &client())
            .await
            .unwrap();
        let err = service
            .start_impersonation("admin-2", "seller-1", "s@x.test", &client())
            .await
            .unwrap_err();

        assert!(matches!(err, BackofficeError::Conflict(_)));
        assert_eq!(service.session_count(), 1);
    }

    #[tokio::test]
    async fn test_seller_is_free_again_after_end() {
        let access = test_access_control(vec![]).await;
        let service = access.impersonation();

        let first = service
            .start_impersonation("admin-1", "seller-1", "s@x.test", &client())
            .await
            .unwrap();
        service
            .end_impersonation(&first.session_token, &client())
            .await
            .unwrap();

        let second = service
            .start_impersonation("admin-2", "seller-1", "s@x.test", &client())
            .await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_ending_twice_is_a_conflict() {
        let access = test_access_control(vec![]).await;
        let service = access.impersonation();

        let started = service
            .start_impersonation("admin-1", "seller-1", "s@x.test", &client())
            .await
            .unwrap();
        service
            .end_impersonation(&started.session_token, &client())
            .await
            .unwrap();

        let err = service
            .end_impersonation(&started.session_token, &client())
            .await
            .unwrap_err();
        assert!(matches!(err, BackofficeError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_end_with_foreign_token_is_unauthorized() {
        let access = test_access_control(vec![]).await;

        let err = access
            .impersonation()
            .end_impersonation("forged", &client())
            .await
            .unwrap_err();

        assert!(matches!(err, BackofficeError::Unauthorized(_)));
        access.audit().assert_no_events();
    }

    #[tokio::test]
    async fn test_force_end_only_touches_one_admin() {
        let access = test_access_control(vec![]).await;
        let service = access.impersonation();

        for seller in ["seller-1", "seller-2"] {
            service
                .start_impersonation("admin-1", seller, "s@x.test", &client())
                .await
                .unwrap();
        }
        service
            .start_impersonation("admin-2", "seller-3", "s@x.test", &client())
            .await
            .unwrap();

        let ended = service.force_end_admin_sessions("admin-1", &client());

        assert_eq!(ended, 2);
        let live = service.active_sessions();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].admin_user_id, "admin-2");

        let forced = access.audit().get_events(&AuditFilter {
            event_type: Some(AuditEventType::ImpersonationEnd),
            admin_user_id: Some("admin-1".to_string()),
            ..AuditFilter::default()
        });
        assert_eq!(forced.len(), 2);
        assert!(forced.iter().all(|e| e.details["forced"] == true));
    }

    #[tokio::test]
    async fn test_cleanup_keeps_live_sessions() {
        let access = test_access_control(vec![]).await;
        let service = access.impersonation();

        service
            .start_impersonation("admin-1", "seller-1", "s@x.test", &client())
            .await
            .unwrap();

        assert_eq!(service.cleanup_expired_sessions(), 0);
        assert_eq!(service.session_count(), 1);
    }
}
