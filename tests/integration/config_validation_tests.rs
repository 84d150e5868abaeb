//! Configuration validation integration tests
//!
//! Every section is validated as part of loading, so a bad value anywhere
//! rejects the whole file.

#[cfg(test)]
mod tests {
    use crate::common::TEST_SECRET;
    use backoffice_rbac::{BackofficeError, Config};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn with_secret(rest: &str) -> String {
        format!("auth:\n  jwt_secret: \"{TEST_SECRET}\"\n{rest}")
    }

    fn config_error(yaml: &str) -> String {
        match Config::from_yaml_str(yaml) {
            Err(BackofficeError::Config(msg)) => msg,
            other => panic!("Expected config error, got {:?}", other.map(|_| ())),
        }
    }

    // ==================== Server ====================

    #[test]
    fn test_zero_port_rejected() {
        let msg = config_error(&with_secret("server:\n  port: 0\n"));
        assert!(msg.contains("Port cannot be 0"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let msg = config_error(&with_secret("server:\n  workers: 0\n"));
        assert!(msg.contains("Worker count cannot be 0"));
    }

    // ==================== Auth ====================

    #[test]
    fn test_short_secret_rejected() {
        let msg = config_error("auth:\n  jwt_secret: \"tooShort1\"\n");
        assert!(msg.contains("Auth config error"));
    }

    #[test]
    fn test_placeholder_secret_rejected() {
        let msg = config_error(
            "auth:\n  jwt_secret: \"replace-with-a-long-random-secret-0123456789\"\n",
        );
        assert!(msg.contains("default values"));
    }

    // ==================== Audit ====================

    #[test]
    fn test_zero_retention_rejected() {
        let msg = config_error(&with_secret("audit:\n  retention_days: 0\n"));
        assert!(msg.contains("Audit retention must be at least one day"));
    }

    #[test]
    fn test_zero_max_events_rejected() {
        let msg = config_error(&with_secret("audit:\n  max_events: 0\n"));
        assert!(msg.contains("Audit max_events cannot be 0"));
    }

    #[test]
    fn test_non_http_sink_rejected() {
        let msg = config_error(&with_secret(
            "audit:\n  http_sink:\n    url: \"file:///var/log/audit\"\n",
        ));
        assert!(msg.contains("Audit http_sink url is not http(s)"));
    }

    // ==================== Conflicts ====================

    #[test]
    fn test_zero_scan_interval_rejected_only_when_enabled() {
        let msg = config_error(&with_secret("conflicts:\n  scan_interval_secs: 0\n"));
        assert!(msg.contains("Conflict scan_interval_secs cannot be 0"));

        let config = Config::from_yaml_str(&with_secret(
            "conflicts:\n  scan_enabled: false\n  scan_interval_secs: 0\n",
        ));
        assert!(config.is_ok());
    }

    // ==================== Loading ====================

    #[test]
    fn test_malformed_yaml_rejected() {
        let msg = config_error("server: [unclosed");
        assert!(msg.contains("Failed to parse config"));
    }

    #[tokio::test]
    async fn test_full_file_round_trips_through_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            with_secret(
                "server:\n  port: 9000\naudit:\n  retention_days: 30\nimpersonation:\n  dashboard_base_url: \"https://app.test/dashboard\"\n",
            )
            .as_bytes(),
        )
        .unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().port, 9000);
        assert_eq!(config.audit().retention_days, 30);

        let reparsed = Config::from_yaml_str(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(
            reparsed.impersonation().dashboard_base_url,
            "https://app.test/dashboard"
        );
    }
}
