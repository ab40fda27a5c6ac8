use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ev_core::domain::entities::participant::{Participant, ParticipantFilter};
use ev_core::repositories::{AdminRepository, ParticipantRepository};
use ev_shared::{ApiResponse, ListResponse};

use crate::app::AppState;
use crate::dto::{
    field_errors, DeleteParticipantRequest, ParticipantResponse, RegisterParticipantRequest,
    SearchParticipantsQuery,
};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::RequestIdExt;

/// Handler for POST /api/participants/register
///
/// Verifies the registration code and stores the participant.
/// Responds `201 Created` with the stored participant.
pub async fn register<P, A>(
    req: HttpRequest,
    state: web::Data<AppState<P, A>>,
    body: web::Json<RegisterParticipantRequest>,
) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let request_id = req.request_id();

    if let Err(errors) = body.validate() {
        return validation_error_response(&request_id, field_errors(&errors));
    }

    let (otp_id, otp, form) = body.into_inner().into_parts();
    log::info!("[{}] Registration submitted for OTP {}", request_id, otp_id);

    match state.registration.register(&otp_id, &otp, form).await {
        Ok(participant) => {
            log::info!(
                "[{}] Participant {} registered",
                request_id,
                participant.roll_no
            );
            HttpResponse::Created().json(ApiResponse::success(
                "Registration successful!",
                ParticipantResponse::from(participant),
            ))
        }
        Err(error) => handle_domain_error(error, &request_id),
    }
}

/// Handler for POST /api/participants/delete
pub async fn delete<P, A>(
    req: HttpRequest,
    state: web::Data<AppState<P, A>>,
    body: web::Json<DeleteParticipantRequest>,
) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let request_id = req.request_id();
    let (otp_id, otp) = body.into_inner().into_parts();

    match state.deletion.confirm(&otp_id, &otp).await {
        Ok(deleted) => {
            log::info!(
                "[{}] Participant {} deleted",
                request_id,
                deleted.roll_no
            );
            HttpResponse::Ok().json(ApiResponse::success(
                "Registration deleted successfully",
                deleted,
            ))
        }
        Err(error) => handle_domain_error(error, &request_id),
    }
}

fn responses(participants: Vec<Participant>) -> Vec<ParticipantResponse> {
    participants.into_iter().map(ParticipantResponse::from).collect()
}

/// Handler for GET /api/participants/all
///
/// Every registration, newest first, as `{ success, count, data }`.
pub async fn list<P, A>(req: HttpRequest, state: web::Data<AppState<P, A>>) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let request_id = req.request_id();

    match state.review.list().await {
        Ok(participants) => {
            log::info!("[{}] Fetched {} participants", request_id, participants.len());
            HttpResponse::Ok().json(ListResponse::new(responses(participants)))
        }
        Err(error) => handle_domain_error(error, &request_id),
    }
}

/// Handler for GET /api/participants/search
///
/// Query parameters `query`, `department`, `sport` and `gender` are all
/// optional; results are sorted by name.
pub async fn search<P, A>(
    req: HttpRequest,
    state: web::Data<AppState<P, A>>,
    query: web::Query<SearchParticipantsQuery>,
) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let request_id = req.request_id();
    let filter = ParticipantFilter::from(query.into_inner());

    match state.review.search(&filter).await {
        Ok(participants) => HttpResponse::Ok().json(ListResponse::new(responses(participants))),
        Err(error) => handle_domain_error(error, &request_id),
    }
}

/// Handler for GET /api/participants/{roll_no}
pub async fn find_by_roll_no<P, A>(
    req: HttpRequest,
    state: web::Data<AppState<P, A>>,
    roll_no: web::Path<String>,
) -> HttpResponse
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let request_id = req.request_id();

    match state.review.find(&roll_no).await {
        Ok(participant) => HttpResponse::Ok().json(ApiResponse::success(
            "Participant found",
            ParticipantResponse::from(participant),
        )),
        Err(error) => handle_domain_error(error, &request_id),
    }
}
