//! Time and identifier providers injected into the registry

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of opaque record identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier. Uniqueness is re-checked by the registry.
    fn generate_id(&self) -> Result<String, String>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 16 bytes from the OS CSPRNG, hex encoded
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate_id(&self) -> Result<String, String> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| format!("OS random source unavailable: {}", e))?;
        Ok(hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_ids_are_32_lowercase_hex() {
        let generator = RandomIdGenerator;
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let id = generator.generate_id().unwrap();
            assert_eq!(id.len(), 32);
            assert!(id.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            assert!(seen.insert(id));
        }
    }
}
