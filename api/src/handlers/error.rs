//! Mapping from domain errors to HTTP responses

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};
use std::collections::HashMap;

use ev_core::errors::DomainError;
use ev_shared::{error_codes, ErrorResponse};

/// Convert a domain error into the JSON error envelope
///
/// - `Validation`, `Conflict` and OTP failures: 400
/// - `NotFound`: 404
/// - `Internal`: 500 with a generic message
pub fn handle_domain_error(error: DomainError, request_id: &str) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            log::warn!("[{}] Validation failed: {}", request_id, message);
            HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message))
        }
        DomainError::Conflict { message } => {
            log::warn!("[{}] Conflict: {}", request_id, message);
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::CONFLICT, message))
        }
        DomainError::NotFound { message } => {
            log::info!("[{}] Not found: {}", request_id, message);
            HttpResponse::NotFound().json(ErrorResponse::new(error_codes::NOT_FOUND, message))
        }
        DomainError::Otp(failure) => {
            log::info!("[{}] OTP rejected: {}", request_id, failure);
            HttpResponse::BadRequest().json(
                ErrorResponse::new(failure.code(), failure.to_string())
                    .add_detail("requestNewCode", failure.should_request_new_code()),
            )
        }
        DomainError::Internal { message } => {
            log::error!("[{}] Internal error: {}", request_id, message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 response for request DTOs that fail `validator` checks
pub fn validation_error_response(
    request_id: &str,
    fields: HashMap<String, Vec<String>>,
) -> HttpResponse {
    log::warn!("[{}] Request validation failed: {:?}", request_id, fields);

    let message = fields
        .values()
        .flatten()
        .next()
        .cloned()
        .unwrap_or_else(|| "Invalid request data".to_string());

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, message).add_detail("fields", fields),
    )
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body on {}: {}", req.path(), err);

    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        "Invalid request body",
    ));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use ev_core::errors::OtpFailure;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_otp_failures_are_bad_request_with_distinct_codes() {
        let expired = handle_domain_error(
            DomainError::Otp(OtpFailure::NotFoundOrExpired { expired: true }),
            "t",
        );
        assert_eq!(expired.status(), StatusCode::BAD_REQUEST);
        let json = body_json(expired).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "OTP_EXPIRED");
        assert_eq!(json["message"], "OTP has expired");
        assert_eq!(json["details"]["requestNewCode"], true);

        let invalid = body_json(handle_domain_error(
            DomainError::Otp(OtpFailure::InvalidCode),
            "t",
        ))
        .await;
        assert_eq!(invalid["error"], "OTP_INVALID");
        assert_eq!(invalid["details"]["requestNewCode"], false);
    }

    #[actix_web::test]
    async fn test_status_mapping() {
        let cases = vec![
            (DomainError::validation("Invalid email format"), StatusCode::BAD_REQUEST),
            (
                DomainError::conflict("This email is already registered"),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::not_found("Admin not found"), StatusCode::NOT_FOUND),
            (
                DomainError::internal("lock poisoned"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(error, "t").status(), status);
        }
    }

    #[actix_web::test]
    async fn test_internal_error_hides_details() {
        let json = body_json(handle_domain_error(DomainError::internal("lock poisoned"), "t")).await;
        assert_eq!(json["message"], "An internal error occurred");
    }
}
