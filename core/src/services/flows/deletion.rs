//! Removal of a registration, confirmed by a code sent to its contacts

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use ev_shared::contact::{mask_email, normalize_email};

use crate::domain::entities::otp_record::{OtpPayload, OtpPurpose};
use crate::domain::entities::participant::Participant;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ParticipantRepository;
use crate::services::notification::Notifier;
use crate::services::otp::{
    Clock, IdGenerator, IssueOtp, OtpRegistry, RandomIdGenerator, SystemClock,
};

use super::{payload_str, require, FlowConfig, IssuedOtp};

#[derive(Debug, Clone, Deserialize)]
pub struct DeletionOtpRequest {
    pub roll_no: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedParticipant {
    pub name: String,
    pub roll_no: String,
}

/// Deletion flow
pub struct DeletionService<
    P: ParticipantRepository,
    C: Clock = SystemClock,
    G: IdGenerator = RandomIdGenerator,
> {
    registry: Arc<OtpRegistry<C, G>>,
    participants: Arc<P>,
    notifier: Notifier,
    config: FlowConfig,
}

impl<P: ParticipantRepository, C: Clock, G: IdGenerator> DeletionService<P, C, G> {
    pub fn new(
        registry: Arc<OtpRegistry<C, G>>,
        participants: Arc<P>,
        notifier: Notifier,
        config: FlowConfig,
    ) -> Self {
        Self {
            registry,
            participants,
            notifier,
            config,
        }
    }

    /// Issue a deletion code for a registration matching all three details
    pub async fn request_otp(&self, request: DeletionOtpRequest) -> DomainResult<IssuedOtp> {
        if !require(&request.roll_no) || !require(&request.email) || !require(&request.phone) {
            return Err(DomainError::validation(
                "Roll number, email, and phone are required",
            ));
        }

        let roll_no = Participant::normalize_roll_no(&request.roll_no);
        let email = normalize_email(&request.email);
        let phone = request.phone.trim().to_string();

        let participant = self
            .participants
            .find_by_roll_no(&roll_no)
            .await?
            .filter(|p| p.matches_contact(&roll_no, &email, &phone))
            .ok_or_else(|| {
                DomainError::not_found("No active registration found with these details")
            })?;

        let mut payload = OtpPayload::new();
        payload.insert("roll_no".to_string(), json!(roll_no));
        payload.insert("email".to_string(), json!(email));
        payload.insert("phone".to_string(), json!(phone));

        let code = self.registry.generate_code();
        let otp_id = self
            .registry
            .issue(IssueOtp {
                email: Some(email.clone()),
                phone: Some(phone.clone()),
                code: code.clone(),
                purpose: OtpPurpose::Deletion,
                payload,
            })
            .await?;

        let delivery = self
            .notifier
            .deliver(
                Some(&email),
                Some(&phone),
                &code,
                &participant.name,
                OtpPurpose::Deletion,
            )
            .await;

        tracing::info!(
            otp_id = %otp_id,
            email = %mask_email(&email),
            demo_mode = delivery.demo_mode,
            event = "deletion_otp_requested",
            "Deletion OTP requested"
        );

        Ok(IssuedOtp::new(otp_id, code, delivery, &self.config))
    }

    /// Verify the code and delete the registration it was issued for
    pub async fn confirm(&self, otp_id: &str, code: &str) -> DomainResult<DeletedParticipant> {
        if !require(otp_id) || !require(code) {
            return Err(DomainError::validation("OTP ID and OTP are required"));
        }

        let payload = self
            .registry
            .verify(otp_id, code, Some(OtpPurpose::Deletion))
            .await?;

        let outcome = self.delete(&payload).await;
        self.registry.discard(otp_id).await;
        outcome
    }

    async fn delete(&self, payload: &OtpPayload) -> DomainResult<DeletedParticipant> {
        let roll_no = payload_str(payload, "roll_no")?;

        let removed = self
            .participants
            .delete_by_roll_no(&roll_no)
            .await?
            .ok_or_else(|| DomainError::not_found("No registration found with this roll number"))?;

        tracing::info!(
            roll_no = %removed.roll_no,
            event = "participant_deleted",
            "Participant registration deleted"
        );

        Ok(DeletedParticipant {
            name: removed.name,
            roll_no: removed.roll_no,
        })
    }
}
