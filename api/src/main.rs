use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use ev_api::config::Settings;
use ev_api::{create_app, AppState};
use ev_core::services::notification::Notifier;
use ev_core::services::otp::{
    OtpCleanupConfig, OtpCleanupService, OtpRegistry, OtpRegistryConfig,
};
use ev_infra::{
    create_email_service, DemoSmsService, InMemoryAdminRepository, InMemoryParticipantRepository,
};
use ev_shared::config::{LogFormat, LoggingConfig};

/// Install the global subscriber; `log` records from actix are bridged in
fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    match config.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;
    let config = settings.app;
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        expiry_minutes = config.otp.expiry_minutes,
        expose_codes = config.expose_codes(),
        "Starting Sports Day API server"
    );

    let registry = Arc::new(OtpRegistry::with_system_defaults(OtpRegistryConfig::from(
        &config.otp,
    )));
    let cleanup = Arc::new(OtpCleanupService::new(
        registry.clone(),
        OtpCleanupConfig::from(&config.otp),
    ));
    let sweeper = cleanup.start_background_task();

    let notifier = Notifier::new(
        create_email_service(&config.notification, config.otp.expiry_minutes),
        Arc::new(DemoSmsService::new()),
    );

    let participants = Arc::new(InMemoryParticipantRepository::new());
    let admins = Arc::new(InMemoryAdminRepository::from_seeds(&settings.admins));
    if admins.is_empty().await {
        tracing::warn!("No admin accounts configured, admin login is unavailable");
    }

    let state = web::Data::new(AppState::new(
        registry,
        participants,
        admins,
        notifier,
        &config,
    ));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let workers = config.server.workers;
    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")?;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    tracing::info!("Server stopped");
    Ok(())
}
