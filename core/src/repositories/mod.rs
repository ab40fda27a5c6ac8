//! Repository interfaces for the stores the guarded flows act on.

pub mod admin;
pub mod participant;

pub use admin::AdminRepository;
pub use participant::ParticipantRepository;
