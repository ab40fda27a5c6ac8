use serde::{Deserialize, Serialize};

use ev_core::services::flows::{DeletionOtpRequest, RegistrationOtpRequest};

/// Body of `POST /api/otp/request-registration-otp`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationOtpRequestDto {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub roll_no: Option<String>,
}

impl From<RegistrationOtpRequestDto> for RegistrationOtpRequest {
    fn from(dto: RegistrationOtpRequestDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            roll_no: dto.roll_no,
        }
    }
}

/// Body of `POST /api/otp/request-deletion-otp`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeletionOtpRequestDto {
    pub roll_no: String,
    pub email: String,
    pub phone: String,
}

impl From<DeletionOtpRequestDto> for DeletionOtpRequest {
    fn from(dto: DeletionOtpRequestDto) -> Self {
        Self {
            roll_no: dto.roll_no,
            email: dto.email,
            phone: dto.phone,
        }
    }
}
