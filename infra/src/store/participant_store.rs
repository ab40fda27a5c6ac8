//! In-memory implementation of the ParticipantRepository trait.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use ev_core::domain::entities::participant::Participant;
use ev_core::errors::DomainError;
use ev_core::repositories::ParticipantRepository;
use ev_shared::contact::normalize_email;

/// Participants keyed by upper-cased roll number
#[derive(Default)]
pub struct InMemoryParticipantRepository {
    participants: RwLock<HashMap<String, Participant>>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn find_by_roll_no(&self, roll_no: &str) -> Result<Option<Participant>, DomainError> {
        let key = Participant::normalize_roll_no(roll_no);
        Ok(self.participants.read().await.get(&key).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Participant>, DomainError> {
        let email = normalize_email(email);
        Ok(self
            .participants
            .read()
            .await
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Participant>, DomainError> {
        let phone = phone.trim();
        Ok(self
            .participants
            .read()
            .await
            .values()
            .find(|p| p.phone == phone)
            .cloned())
    }

    async fn create(&self, mut participant: Participant) -> Result<Participant, DomainError> {
        participant.roll_no = Participant::normalize_roll_no(&participant.roll_no);
        participant.email = normalize_email(&participant.email);

        // Uniqueness checks and insert under one write lock
        let mut participants = self.participants.write().await;
        if participants.contains_key(&participant.roll_no) {
            return Err(DomainError::conflict("This roll number is already registered"));
        }
        if participants.values().any(|p| p.email == participant.email) {
            return Err(DomainError::conflict("This email is already registered"));
        }
        if participants.values().any(|p| p.phone == participant.phone) {
            return Err(DomainError::conflict("This phone number is already registered"));
        }

        participants.insert(participant.roll_no.clone(), participant.clone());
        tracing::debug!(
            roll_no = %participant.roll_no,
            total = participants.len(),
            "Participant stored"
        );
        Ok(participant)
    }

    async fn delete_by_roll_no(&self, roll_no: &str) -> Result<Option<Participant>, DomainError> {
        let key = Participant::normalize_roll_no(roll_no);
        Ok(self.participants.write().await.remove(&key))
    }

    async fn list_all(&self) -> Result<Vec<Participant>, DomainError> {
        Ok(self.participants.read().await.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.participants.read().await.len())
    }
}
