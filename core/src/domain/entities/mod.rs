//! Domain entities representing core business objects.

pub mod admin;
pub mod otp_record;
pub mod participant;

// Re-export commonly used types
pub use admin::{Admin, AdminRole, AdminSession};
pub use otp_record::{
    OtpPayload, OtpPurpose, OtpRecord, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES,
};
pub use participant::{Department, Gender, Participant, ParticipantFilter, Sport};
