//! Participant repository trait.
//!
//! The registration and deletion flows need lookups by the unique contact
//! fields, insert, and delete by roll number; admin review reads everything. Implementations are
//! expected to normalize roll numbers to upper case and emails to lower case
//! before comparing.

use async_trait::async_trait;

use crate::domain::entities::participant::Participant;
use crate::errors::DomainError;

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Find a participant by roll number (case-insensitive)
    async fn find_by_roll_no(&self, roll_no: &str) -> Result<Option<Participant>, DomainError>;

    /// Find a participant by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> Result<Option<Participant>, DomainError>;

    /// Find a participant by phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Participant>, DomainError>;

    /// Insert a new participant
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - roll number or email already present
    async fn create(&self, participant: Participant) -> Result<Participant, DomainError>;

    /// Delete by roll number, returning the removed participant if one existed
    async fn delete_by_roll_no(&self, roll_no: &str) -> Result<Option<Participant>, DomainError>;

    /// Every stored participant, in no particular order
    async fn list_all(&self) -> Result<Vec<Participant>, DomainError>;

    /// Number of stored participants
    async fn count(&self) -> Result<usize, DomainError>;
}
