//! Participant registration gated by an emailed code

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use ev_shared::contact::{mask_email, normalize_email};
use ev_shared::validation::{validators, ValidationErrors};

use crate::domain::entities::otp_record::{OtpPayload, OtpPurpose};
use crate::domain::entities::participant::{Department, Gender, Participant, Sport};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ParticipantRepository;
use crate::services::notification::Notifier;
use crate::services::otp::{
    Clock, IdGenerator, IssueOtp, OtpRegistry, RandomIdGenerator, SystemClock,
};

use super::{payload_str, require, FlowConfig, IssuedOtp};

const DATA_MISMATCH: &str = "Data mismatch. Please restart registration.";

/// Contact details submitted before the full form
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationOtpRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub roll_no: Option<String>,
}

/// The full registration form, submitted together with the code
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantForm {
    pub name: String,
    pub roll_no: String,
    pub phone: String,
    pub email: String,
    pub department: String,
    pub batch: String,
    pub year: u8,
    pub gender: String,
    pub sports: Vec<String>,
}

impl ParticipantForm {
    /// Check every field against the catalogues and build the participant
    pub fn into_participant(self) -> Result<Participant, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(require(&self.name), "name", "Name is required");
        errors.check(require(&self.roll_no), "rollNo", "Roll number is required");
        errors.check(
            validators::is_valid_phone(&self.phone),
            "phone",
            "Phone number must be 10 digits",
        );
        errors.check(
            validators::is_valid_email(&self.email),
            "email",
            "Invalid email format",
        );
        errors.check(
            validators::is_valid_batch(&self.batch),
            "batch",
            "Batch format: YYYY-YYYY",
        );
        errors.check(
            validators::is_valid_year(self.year),
            "year",
            "Year must be between 1 and 4",
        );

        let department = self.department.parse::<Department>();
        if department.is_err() {
            errors.add_error("department", "Invalid department");
        }
        let gender = self.gender.parse::<Gender>();
        if gender.is_err() {
            errors.add_error("gender", "Invalid gender");
        }

        if self.sports.is_empty() {
            errors.add_error("sports", "At least one sport must be selected");
        }
        let mut sports = Vec::with_capacity(self.sports.len());
        for name in &self.sports {
            match name.parse::<Sport>() {
                Ok(sport) if !sports.contains(&sport) => sports.push(sport),
                Ok(_) => {}
                Err(message) => errors.add_error("sports", message),
            }
        }

        match (department, gender) {
            (Ok(department), Ok(gender)) if errors.is_empty() => Ok(Participant {
                id: Uuid::new_v4(),
                name: self.name.trim().to_string(),
                roll_no: Participant::normalize_roll_no(&self.roll_no),
                phone: self.phone.trim().to_string(),
                email: normalize_email(&self.email),
                department,
                batch: self.batch.trim().to_string(),
                year: self.year,
                gender,
                sports,
                registered_at: Utc::now(),
            }),
            _ => Err(errors),
        }
    }
}

/// Registration flow
pub struct RegistrationService<
    P: ParticipantRepository,
    C: Clock = SystemClock,
    G: IdGenerator = RandomIdGenerator,
> {
    registry: Arc<OtpRegistry<C, G>>,
    participants: Arc<P>,
    notifier: Notifier,
    config: FlowConfig,
}

impl<P: ParticipantRepository, C: Clock, G: IdGenerator> RegistrationService<P, C, G> {
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

    /// Issue a registration code after checking the contact is not taken
    pub async fn request_otp(&self, request: RegistrationOtpRequest) -> DomainResult<IssuedOtp> {
        if !require(&request.name) || !require(&request.email) || !require(&request.phone) {
            return Err(DomainError::validation("Name, email, and phone are required"));
        }
        if !validators::is_valid_email(&request.email) {
            return Err(DomainError::validation("Invalid email format"));
        }
        if !validators::is_valid_phone(&request.phone) {
            return Err(DomainError::validation("Phone number must be 10 digits"));
        }

        let name = request.name.trim().to_string();
        let email = normalize_email(&request.email);
        let phone = request.phone.trim().to_string();
        let roll_no = request
            .roll_no
            .as_deref()
            .filter(|r| require(r))
            .map(Participant::normalize_roll_no);

        self.ensure_not_registered(roll_no.as_deref(), &email, &phone)
            .await?;

        let mut payload = OtpPayload::new();
        payload.insert("name".to_string(), json!(name));
        payload.insert("email".to_string(), json!(email));
        payload.insert("phone".to_string(), json!(phone));
        if let Some(roll_no) = &roll_no {
            payload.insert("roll_no".to_string(), json!(roll_no));
        }

        let code = self.registry.generate_code();
        let otp_id = self
            .registry
            .issue(IssueOtp {
                email: Some(email.clone()),
                phone: Some(phone.clone()),
                code: code.clone(),
                purpose: OtpPurpose::Registration,
                payload,
            })
            .await?;

        let delivery = self
            .notifier
            .deliver(Some(&email), Some(&phone), &code, &name, OtpPurpose::Registration)
            .await;

        tracing::info!(
            otp_id = %otp_id,
            email = %mask_email(&email),
            demo_mode = delivery.demo_mode,
            event = "registration_otp_requested",
            "Registration OTP requested"
        );

        Ok(IssuedOtp::new(otp_id, code, delivery, &self.config))
    }

    /// Verify the code and create the participant.
    ///
    /// The form is validated before the code is checked so that a typo in
    /// the form does not burn the code. Once the code is accepted it is
    /// discarded whatever the outcome.
    pub async fn register(
        &self,
        otp_id: &str,
        code: &str,
        form: ParticipantForm,
    ) -> DomainResult<Participant> {
        if !require(otp_id) || !require(code) {
            return Err(DomainError::validation("OTP ID and OTP are required"));
        }

        let participant = form.into_participant()?;

        let payload = self
            .registry
            .verify(otp_id, code, Some(OtpPurpose::Registration))
            .await?;

        let outcome = self.complete(&payload, participant).await;
        self.registry.discard(otp_id).await;
        outcome
    }

    async fn complete(
        &self,
        payload: &OtpPayload,
        participant: Participant,
    ) -> DomainResult<Participant> {
        let verified_email = payload_str(payload, "email")?;
        let verified_phone = payload_str(payload, "phone")?;
        let roll_matches = match payload.get("roll_no").and_then(|v| v.as_str()) {
            Some(roll_no) => roll_no == participant.roll_no,
            None => true,
        };

        if verified_email != participant.email || verified_phone != participant.phone || !roll_matches
        {
            tracing::warn!(
                email = %mask_email(&participant.email),
                event = "registration_data_mismatch",
                "Registration form does not match verified contact"
            );
            return Err(DomainError::validation(DATA_MISMATCH));
        }

        self.ensure_not_registered(Some(&participant.roll_no), &participant.email, &participant.phone)
            .await?;

        let created = self.participants.create(participant).await?;

        tracing::info!(
            participant_id = %created.id,
            roll_no = %created.roll_no,
            event = "participant_registered",
            "Participant registered"
        );
        Ok(created)
    }

    async fn ensure_not_registered(
        &self,
        roll_no: Option<&str>,
        email: &str,
        phone: &str,
    ) -> DomainResult<()> {
        if let Some(roll_no) = roll_no {
            if self.participants.find_by_roll_no(roll_no).await?.is_some() {
                return Err(DomainError::conflict("This roll number is already registered"));
            }
        }
        if self.participants.find_by_email(email).await?.is_some() {
            return Err(DomainError::conflict("This email is already registered"));
        }
        if self.participants.find_by_phone(phone).await?.is_some() {
            return Err(DomainError::conflict("This phone number is already registered"));
        }
        Ok(())
    }
}
