use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ev_core::domain::entities::participant::{
    Department, Gender, Participant, ParticipantFilter, Sport,
};
use ev_core::services::flows::ParticipantForm;

/// Body of `POST /api/participants/register`: the code plus the full form
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterParticipantRequest {
    pub otp_id: String,
    pub otp: String,
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[validate(length(max = 20, message = "Roll number must be at most 20 characters"))]
    pub roll_no: String,
    pub phone: String,
    pub email: String,
    pub department: String,
    pub batch: String,
    pub year: u8,
    pub gender: String,
    pub sports: Vec<String>,
}

impl RegisterParticipantRequest {
    /// Split into the code reference and the form
    pub fn into_parts(self) -> (String, String, ParticipantForm) {
        let form = ParticipantForm {
            name: self.name,
            roll_no: self.roll_no,
            phone: self.phone,
            email: self.email,
            department: self.department,
            batch: self.batch,
            year: self.year,
            gender: self.gender,
            sports: self.sports,
        };
        (
            self.otp_id.trim().to_string(),
            self.otp.trim().to_string(),
            form,
        )
    }
}

/// Body of `POST /api/participants/delete`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteParticipantRequest {
    pub otp_id: String,
    pub otp: String,
}

impl DeleteParticipantRequest {
    /// Code reference and code, with stray whitespace from the client removed
    pub fn into_parts(self) -> (String, String) {
        (self.otp_id.trim().to_string(), self.otp.trim().to_string())
    }
}

/// Registered participant as returned to the client
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub id: Uuid,
    pub name: String,
    pub roll_no: String,
    pub phone: String,
    pub email: String,
    pub department: Department,
    pub batch: String,
    pub year: u8,
    pub gender: Gender,
    pub sports: Vec<Sport>,
    pub registered_at: DateTime<Utc>,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name,
            roll_no: participant.roll_no,
            phone: participant.phone,
            email: participant.email,
            department: participant.department,
            batch: participant.batch,
            year: participant.year,
            gender: participant.gender,
            sports: participant.sports,
            registered_at: participant.registered_at,
        }
    }
}

/// Query string of `GET /api/participants/search`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchParticipantsQuery {
    pub query: Option<String>,
    pub department: Option<String>,
    pub sport: Option<String>,
    pub gender: Option<String>,
}

impl From<SearchParticipantsQuery> for ParticipantFilter {
    fn from(query: SearchParticipantsQuery) -> Self {
        Self {
            query: query.query,
            department: query.department,
            sport: query.sport,
            gender: query.gender,
        }
    }
}
