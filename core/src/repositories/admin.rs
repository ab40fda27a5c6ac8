//! Admin repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::admin::Admin;
use crate::errors::DomainError;

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find an admin by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError>;

    /// Record a successful login
    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError>;
}
