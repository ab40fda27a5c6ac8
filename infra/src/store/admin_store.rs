//! In-memory implementation of the AdminRepository trait.
//!
//! Admin accounts are seeded from configuration at startup; there is no
//! runtime path that creates them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use ev_core::domain::entities::admin::{Admin, AdminRole};
use ev_core::errors::DomainError;
use ev_core::repositories::AdminRepository;
use ev_shared::contact::normalize_email;

/// Admin account declared in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: AdminRole,
}

/// Admins keyed by lower-cased email
#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: RwLock<HashMap<String, Admin>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository holding one active admin per seed
    ///
    /// A later seed with the same email replaces an earlier one.
    pub fn from_seeds(seeds: &[AdminSeed]) -> Self {
        let admins = seeds
            .iter()
            .map(|seed| {
                let admin = Admin::new(seed.name.clone(), &seed.email, seed.role);
                (admin.email.clone(), admin)
            })
            .collect();
        Self {
            admins: RwLock::new(admins),
        }
    }

    /// Add or replace an admin
    pub async fn insert(&self, admin: Admin) {
        self.admins
            .write()
            .await
            .insert(normalize_email(&admin.email), admin);
    }

    pub async fn len(&self) -> usize {
        self.admins.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.admins.read().await.is_empty()
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        let key = normalize_email(email);
        Ok(self.admins.read().await.get(&key).cloned())
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut admins = self.admins.write().await;
        let admin = admins
            .values_mut()
            .find(|admin| admin.id == id)
            .ok_or_else(|| DomainError::not_found("Admin not found"))?;
        admin.last_login = Some(at);
        Ok(())
    }
}
