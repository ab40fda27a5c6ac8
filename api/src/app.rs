//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};
use std::sync::Arc;

use ev_core::repositories::{AdminRepository, ParticipantRepository};
use ev_core::services::flows::{
    AdminLoginService, DeletionService, FlowConfig, RegistrationService, ReviewService,
};
use ev_core::services::notification::Notifier;
use ev_core::services::otp::{OtpRegistry, SystemClock};
use ev_shared::{error_codes, AppConfig, Environment, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::middleware::{create_cors, RequestIdMiddleware};
use crate::routes;

/// Services shared by every worker
pub struct AppState<P, A>
where
    P: ParticipantRepository,
    A: AdminRepository,
{
    pub registration: RegistrationService<P>,
    pub deletion: DeletionService<P>,
    pub admin_login: AdminLoginService<A>,
    pub review: ReviewService<P>,
    pub registry: Arc<OtpRegistry>,
    pub environment: Environment,
}

impl<P, A> AppState<P, A>
where
    P: ParticipantRepository,
    A: AdminRepository,
{
    /// Wire the three flows around one registry
    pub fn new(
        registry: Arc<OtpRegistry>,
        participants: Arc<P>,
        admins: Arc<A>,
        notifier: Notifier,
        config: &AppConfig,
    ) -> Self {
        let flow_config = FlowConfig::from(config);

        Self {
            registration: RegistrationService::new(
                registry.clone(),
                participants.clone(),
                notifier.clone(),
                flow_config.clone(),
            ),
            deletion: DeletionService::new(
                registry.clone(),
                participants.clone(),
                notifier.clone(),
                flow_config.clone(),
            ),
            admin_login: AdminLoginService::new(
                registry.clone(),
                admins,
                notifier,
                Arc::new(SystemClock),
                flow_config,
            ),
            review: ReviewService::new(participants),
            registry,
            environment: config.environment,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<P, A>(
    app_state: web::Data<AppState<P, A>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    P: ParticipantRepository + 'static,
    A: AdminRepository + 'static,
{
    let cors = create_cors(&config.cors, config.environment);
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Last wrap is outermost; the logger reads the id from the response
        .wrap(RequestIdMiddleware)
        .wrap(Logger::new("%a \"%r\" %s %b %T %{x-request-id}o"))
        .wrap(cors)
        .configure(|cfg| routes::configure::<P, A>(cfg, config.environment))
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
