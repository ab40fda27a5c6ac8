//! HTTP route handlers
//!
//! - `otp` - issuing registration and deletion codes
//! - `participants` - registering and deleting with a code, admin review
//! - `admin` - passwordless admin login

pub mod admin;
pub mod otp;
pub mod participants;

use actix_web::{web, HttpResponse};

use ev_core::repositories::{AdminRepository, ParticipantRepository};
use ev_shared::Environment;

/// Mount every `/api` route
///
/// The registry statistics endpoint only exists outside production.
pub fn configure<P, A>(cfg: &mut web::ServiceConfig, environment: Environment)
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let mut admin_scope = web::scope("/admin")
        .route(
            "/request-login-otp",
            web::post().to(admin::request_login_otp::<P, A>),
        )
        .route(
            "/verify-login-otp",
            web::post().to(admin::verify_login_otp::<P, A>),
        );
    if !environment.is_production() {
        admin_scope = admin_scope.route("/otp-stats", web::get().to(admin::otp_stats::<P, A>));
    }

    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/otp")
                    .route(
                        "/request-registration-otp",
                        web::post().to(otp::request_registration_otp::<P, A>),
                    )
                    .route(
                        "/request-deletion-otp",
                        web::post().to(otp::request_deletion_otp::<P, A>),
                    ),
            )
            .service(
                web::scope("/participants")
                    .route("/register", web::post().to(participants::register::<P, A>))
                    .route("/delete", web::post().to(participants::delete::<P, A>))
                    .route("/all", web::get().to(participants::list::<P, A>))
                    .route("/search", web::get().to(participants::search::<P, A>))
                    .route(
                        "/{roll_no}",
                        web::get().to(participants::find_by_roll_no::<P, A>),
                    ),
            )
            .service(admin_scope),
    );
}

/// Handler for GET /api/health
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "sportsday-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
