//! Helpers shared by the route tests

#![allow(dead_code)]

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use serde_json::{json, Value};
use std::sync::Arc;

use ev_api::AppState;
use ev_core::domain::entities::admin::AdminRole;
use ev_core::services::notification::Notifier;
use ev_core::services::otp::{OtpRegistry, OtpRegistryConfig};
use ev_infra::{
    AdminSeed, DemoEmailService, DemoSmsService, InMemoryAdminRepository,
    InMemoryParticipantRepository,
};
use ev_shared::{AppConfig, Environment};

pub type TestState = AppState<InMemoryParticipantRepository, InMemoryAdminRepository>;

pub const ADMIN_EMAIL: &str = "head@college.edu";

pub fn test_config(environment: Environment) -> AppConfig {
    AppConfig::for_environment(environment)
}

pub fn test_state(config: &AppConfig) -> web::Data<TestState> {
    test_state_with_store(config).0
}

/// State plus a handle on its participant store for seeding
pub fn test_state_with_store(
    config: &AppConfig,
) -> (web::Data<TestState>, Arc<InMemoryParticipantRepository>) {
    let registry = Arc::new(OtpRegistry::with_system_defaults(OtpRegistryConfig::from(
        &config.otp,
    )));
    let admins = InMemoryAdminRepository::from_seeds(&[AdminSeed {
        name: "Sports Head".to_string(),
        email: ADMIN_EMAIL.to_string(),
        role: AdminRole::SuperAdmin,
    }]);
    let notifier = Notifier::new(
        Arc::new(DemoEmailService::new()),
        Arc::new(DemoSmsService::new()),
    );

    let participants = Arc::new(InMemoryParticipantRepository::new());
    let state = web::Data::new(AppState::new(
        registry,
        participants.clone(),
        Arc::new(admins),
        notifier,
        config,
    ));
    (state, participants)
}

pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(resp).await;
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

pub fn registration_otp_body() -> Value {
    json!({
        "name": "Asha Patil",
        "email": "asha@college.edu",
        "phone": "9876543210",
        "rollNo": "AI22005"
    })
}

pub fn registration_body(otp_id: &str, otp: &str) -> Value {
    json!({
        "otpId": otp_id,
        "otp": otp,
        "name": "Asha Patil",
        "rollNo": "AI22005",
        "phone": "9876543210",
        "email": "asha@college.edu",
        "department": "AIML",
        "batch": "2022-2026",
        "year": 2,
        "gender": "Female",
        "sports": ["Badminton", "Chess"]
    })
}
