use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ev_core::repositories::{AdminRepository, ParticipantRepository};
use ev_shared::contact::mask_email;
use ev_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{field_errors, AdminLoginOtpRequest, VerifyAdminOtpRequest};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::RequestIdExt;

use super::otp::OTP_SENT;

/// Handler for POST /api/admin/request-login-otp
///
/// Emails a login code to an active admin. Unknown addresses get 404.
pub async fn request_login_otp<P, A>(
    req: HttpRequest,
    state: web::Data<AppState<P, A>>,
    body: web::Json<AdminLoginOtpRequest>,
) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let request_id = req.request_id();

    if let Err(errors) = body.validate() {
        return validation_error_response(&request_id, field_errors(&errors));
    }

    log::info!(
        "[{}] Admin login OTP requested for {}",
        request_id,
        mask_email(&body.email)
    );

    match state.admin_login.request_otp(&body.email).await {
        Ok(issued) => HttpResponse::Ok().json(ApiResponse::success(OTP_SENT, issued)),
        Err(error) => handle_domain_error(error, &request_id),
    }
}

/// Handler for POST /api/admin/verify-login-otp
///
/// # Request Body
///
/// ```json
/// { "otpId": "3f2a...", "otp": "482913" }
/// ```
///
/// `email` may replace a lost `otpId`; the code is then checked against the
/// first unused login code issued to that address.
pub async fn verify_login_otp<P, A>(
    req: HttpRequest,
    state: web::Data<AppState<P, A>>,
    body: web::Json<VerifyAdminOtpRequest>,
) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let request_id = req.request_id();

    if let Err(errors) = body.validate() {
        return validation_error_response(&request_id, field_errors(&errors));
    }

    match state.admin_login.verify_otp(body.into_inner().into()).await {
        Ok(session) => {
            log::info!(
                "[{}] Admin {} logged in",
                request_id,
                mask_email(&session.email)
            );
            HttpResponse::Ok().json(ApiResponse::success("OTP verified successfully", session))
        }
        Err(error) => handle_domain_error(error, &request_id),
    }
}

/// Handler for GET /api/admin/otp-stats (not mounted in production)
///
/// Counts only; never codes or contacts.
pub async fn otp_stats<P, A>(state: web::Data<AppState<P, A>>) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let stats = state.registry.stats().await;
    HttpResponse::Ok().json(ApiResponse::success("OTP registry statistics", stats))
}
