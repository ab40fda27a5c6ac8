use serde::{Deserialize, Serialize};
use validator::Validate;

use ev_core::services::flows::AdminOtpVerification;

/// Body of `POST /api/admin/request-login-otp`
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct AdminLoginOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Body of `POST /api/admin/verify-login-otp`
///
/// `otpId` is preferred; `email` only recovers a lost id.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyAdminOtpRequest {
    pub otp_id: Option<String>,
    #[validate(length(min = 1, message = "OTP is required"))]
    pub otp: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl From<VerifyAdminOtpRequest> for AdminOtpVerification {
    fn from(dto: VerifyAdminOtpRequest) -> Self {
        Self {
            otp_id: dto.otp_id.map(|id| id.trim().to_string()),
            code: dto.otp.trim().to_string(),
            email: dto.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_accepts_camel_case() {
        let request: VerifyAdminOtpRequest =
            serde_json::from_str(r#"{"otpId":"abc","otp":"482913"}"#).unwrap();
        assert_eq!(request.otp_id.as_deref(), Some("abc"));
        assert!(request.email.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_verification_trims_submitted_code() {
        let request: VerifyAdminOtpRequest =
            serde_json::from_str(r#"{"otpId":" abc ","otp":" 482913\n"}"#).unwrap();
        let verification = AdminOtpVerification::from(request);
        assert_eq!(verification.otp_id.as_deref(), Some("abc"));
        assert_eq!(verification.code, "482913");
    }

    #[test]
    fn test_verify_request_validation() {
        let request = VerifyAdminOtpRequest {
            otp_id: None,
            otp: String::new(),
            email: Some("not-an-email".to_string()),
        };
        let errors = request.validate().unwrap_err();
        let fields = crate::dto::field_errors(&errors);
        assert_eq!(fields["otp"], vec!["OTP is required".to_string()]);
        assert_eq!(fields["email"], vec!["Invalid email format".to_string()]);
    }

    #[test]
    fn test_login_request_rejects_bad_email() {
        let request = AdminLoginOtpRequest {
            email: "admin@".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
