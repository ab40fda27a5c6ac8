//! Store module - in-memory repository implementations
//!
//! Participants and admins live in process memory behind `tokio::sync::RwLock`,
//! keyed by their normalized natural keys (upper-cased roll number,
//! lower-cased email).

pub mod admin_store;
pub mod participant_store;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use admin_store::{AdminSeed, InMemoryAdminRepository};
pub use participant_store::InMemoryParticipantRepository;
