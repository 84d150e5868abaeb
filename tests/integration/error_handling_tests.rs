//! Error handling integration tests
//!
//! Service errors and gate denials must reach clients with the right
//! status codes and bodies.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::MessageBody;
    use backoffice_rbac::{BackofficeError, Denial, DenialCode};

    // ==================== BackofficeError ====================

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert_eq!(BackofficeError::auth("bad").error_response().status().as_u16(), 401);
        assert_eq!(
            BackofficeError::unauthorized("bad").error_response().status().as_u16(),
            401
        );
    }

    #[test]
    fn test_lifecycle_errors() {
        assert_eq!(
            BackofficeError::not_found("session").error_response().status().as_u16(),
            404
        );
        assert_eq!(
            BackofficeError::conflict("taken").error_response().status().as_u16(),
            409
        );
        assert_eq!(
            BackofficeError::bad_request("ids").error_response().status().as_u16(),
            400
        );
        assert_eq!(
            BackofficeError::validation("role").error_response().status().as_u16(),
            400
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let response = BackofficeError::internal("db password is hunter2").error_response();
        assert_eq!(response.status().as_u16(), 500);

        let body = response.into_body().try_into_bytes().unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("hunter2"));
        assert!(text.contains("INTERNAL_ERROR"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BackofficeError = io.into();
        assert!(matches!(err, BackofficeError::Io(_)));
    }

    // ==================== Denials ====================

    #[test]
    fn test_denial_status_codes() {
        let cases = [
            (DenialCode::NoToken, 401),
            (DenialCode::InvalidToken, 401),
            (DenialCode::SellerAccessDenied, 403),
            (DenialCode::RoleConflict, 403),
            (DenialCode::InsufficientRole, 403),
            (DenialCode::InsufficientPermission, 403),
            (DenialCode::AuthError, 500),
        ];

        for (code, status) in cases {
            assert_eq!(
                Denial::new(code, "x").status_code().as_u16(),
                status,
                "code {}",
                code.as_str()
            );
        }
    }

    #[test]
    fn test_denial_body_carries_code_and_message() {
        let denial = Denial::new(
            DenialCode::InsufficientPermission,
            "Missing permission configuracoes.critical",
        );
        let body = serde_json::to_value(denial.body()).unwrap();

        assert_eq!(body["code"], "INSUFFICIENT_PERMISSION");
        assert_eq!(body["message"], "Missing permission configuracoes.critical");
        assert_eq!(body["error"], "Forbidden");
    }
}
