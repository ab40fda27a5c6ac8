use actix_web::{web, HttpRequest, HttpResponse};

use ev_core::repositories::{AdminRepository, ParticipantRepository};
use ev_shared::contact::mask_email;
use ev_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{DeletionOtpRequestDto, RegistrationOtpRequestDto};
use crate::handlers::handle_domain_error;
use crate::middleware::RequestIdExt;

pub const OTP_SENT: &str = "OTP sent successfully";

/// Handler for POST /api/otp/request-registration-otp
///
/// # Request Body
///
/// ```json
/// { "name": "Asha Patil", "email": "asha@college.edu", "phone": "9876543210", "rollNo": "AI22005" }
/// ```
///
/// # Response (200 OK)
///
/// ```json
/// { "success": true, "message": "OTP sent successfully",
///   "data": { "otpId": "3f2a...", "demoMode": true, "otp": "482913" } }
/// ```
///
/// `otp` is only present outside production when no channel really
/// delivered the code.
pub async fn request_registration_otp<P, A>(
    req: HttpRequest,
    state: web::Data<AppState<P, A>>,
    body: web::Json<RegistrationOtpRequestDto>,
) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let request_id = req.request_id();
    log::info!(
        "[{}] Registration OTP requested for {}",
        request_id,
        mask_email(&body.email)
    );

    match state.registration.request_otp(body.into_inner().into()).await {
        Ok(issued) => HttpResponse::Ok().json(ApiResponse::success(OTP_SENT, issued)),
        Err(error) => handle_domain_error(error, &request_id),
    }
}

/// Handler for POST /api/otp/request-deletion-otp
///
/// Requires roll number, email and phone of one existing registration.
pub async fn request_deletion_otp<P, A>(
    req: HttpRequest,
    state: web::Data<AppState<P, A>>,
    body: web::Json<DeletionOtpRequestDto>,
) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let request_id = req.request_id();
    log::info!(
        "[{}] Deletion OTP requested for roll number {}",
        request_id,
        body.roll_no.trim()
    );

    match state.deletion.request_otp(body.into_inner().into()).await {
        Ok(issued) => HttpResponse::Ok().json(ApiResponse::success(OTP_SENT, issued)),
        Err(error) => handle_domain_error(error, &request_id),
    }
}
