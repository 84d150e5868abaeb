//! Audit sink integration tests
//!
//! Sinks are wired from configuration through [`AccessControl`], the same
//! path the server takes.

#[cfg(test)]
mod tests {
    use crate::common::test_config;
    use backoffice_rbac::AccessControl;
    use backoffice_rbac::auth::audit::{AuditEvent, AuditEventType, ClientInfo};
    use backoffice_rbac::auth::conflict::InMemoryUserDirectory;
    use backoffice_rbac::config::{FileSinkConfig, HttpSinkConfig};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
        for _ in 0..50 {
            if condition() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_events_are_appended_to_jsonl_file() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("audit").join("events.jsonl");

        let mut config = test_config();
        config.app.audit.file_sink = Some(FileSinkConfig {
            path: file_path.to_string_lossy().to_string(),
        });
        let access = AccessControl::new(&config, Arc::new(InMemoryUserDirectory::new()))
            .await
            .unwrap();

        access.audit().log_login_blocked(
            "seller-1",
            "seller@shop.test",
            "Seller account attempted backoffice login",
            &ClientInfo::new("1.2.3.4", "agent"),
        );

        let persisted = wait_for(|| {
            std::fs::read_to_string(&file_path)
                .map(|content| content.lines().count() == 1)
                .unwrap_or(false)
        })
        .await;
        assert!(persisted, "audit event was not written to the file sink");

        let content = std::fs::read_to_string(&file_path).unwrap();
        let event: AuditEvent = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(event.event_type, AuditEventType::LoginBlocked);
        assert_eq!(event.user_id, "seller-1");
        assert_eq!(event.ip_address, "1.2.3.4");
    }

    #[tokio::test]
    async fn test_events_are_shipped_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ingest"))
            .and(header("authorization", "Bearer ship-key"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = test_config();
        config.app.audit.http_sink = Some(HttpSinkConfig {
            url: format!("{}/ingest", server.uri()),
            api_key: Some("ship-key".to_string()),
            timeout_secs: 2,
        });
        let access = AccessControl::new(&config, Arc::new(InMemoryUserDirectory::new()))
            .await
            .unwrap();

        access
            .impersonation()
            .start_impersonation("admin-1", "seller-1", "s@x.test", &ClientInfo::default())
            .await
            .unwrap();

        let shipped = {
            let mut delivered = false;
            for _ in 0..50 {
                if server.received_requests().await.is_some_and(|r| r.len() == 1) {
                    delivered = true;
                    break;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            delivered
        };
        assert!(shipped, "audit event was not shipped");

        let requests = server.received_requests().await.unwrap();
        let event: AuditEvent = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(event.event_type, AuditEventType::ImpersonationStart);
    }

    #[tokio::test]
    async fn test_failing_sink_never_affects_the_trail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut config = test_config();
        config.app.audit.http_sink = Some(HttpSinkConfig {
            url: server.uri(),
            api_key: None,
            timeout_secs: 2,
        });
        let access = AccessControl::new(&config, Arc::new(InMemoryUserDirectory::new()))
            .await
            .unwrap();

        let denial = access
            .guard()
            .authorize(None, None, &ClientInfo::default())
            .await;

        assert!(denial.is_err());
        assert_eq!(access.audit().len(), 1);
    }
}
