//! Read-only views of the registrations for the admin dashboard

use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::entities::participant::{Participant, ParticipantFilter};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ParticipantRepository;

pub struct ReviewService<P: ParticipantRepository> {
    participants: Arc<P>,
}

impl<P: ParticipantRepository> ReviewService<P> {
    pub fn new(participants: Arc<P>) -> Self {
        Self { participants }
    }

    /// Every registration, newest first
    pub async fn list(&self) -> DomainResult<Vec<Participant>> {
        let mut all = self.participants.list_all().await?;
        all.sort_by(|a, b| {
            b.registered_at
                .cmp(&a.registered_at)
                .then_with(|| a.roll_no.cmp(&b.roll_no))
        });

        tracing::debug!(count = all.len(), event = "participants_listed", "Listed participants");
        Ok(all)
    }

    /// Registrations matching `filter`, sorted by name
    pub async fn search(&self, filter: &ParticipantFilter) -> DomainResult<Vec<Participant>> {
        let mut found: Vec<Participant> = self
            .participants
            .list_all()
            .await?
            .into_iter()
            .filter(|participant| filter.matches(participant))
            .collect();
        found.sort_by(by_name);

        tracing::debug!(count = found.len(), event = "participants_searched", "Searched participants");
        Ok(found)
    }

    /// One registration by roll number (case-insensitive)
    pub async fn find(&self, roll_no: &str) -> DomainResult<Participant> {
        self.participants
            .find_by_roll_no(roll_no)
            .await?
            .ok_or_else(|| DomainError::not_found("Participant not found"))
    }
}

fn by_name(a: &Participant, b: &Participant) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.roll_no.cmp(&b.roll_no))
}
