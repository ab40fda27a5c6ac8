//! In-memory OTP registry

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

use ev_shared::contact::{mask_email, normalize_email};

use crate::domain::entities::otp_record::{
    OtpPayload, OtpPurpose, OtpRecord, CODE_LENGTH, CODE_MAX, CODE_MIN,
};
use crate::errors::{DomainError, DomainResult, OtpFailure};

use super::config::OtpRegistryConfig;
use super::traits::{Clock, IdGenerator, RandomIdGenerator, SystemClock};
use super::types::{IssueOtp, OtpRegistryStats};

/// Attempts at drawing an unused id before giving up
const MAX_ID_ATTEMPTS: usize = 8;

struct Entry {
    /// Insertion order, breaks ties between equal timestamps
    seq: u64,
    record: OtpRecord,
}

#[derive(Default)]
struct OtpTable {
    records: HashMap<String, Entry>,
    /// Earliest expiry on top. Entries for records already removed are
    /// skipped when popped.
    expiry_queue: BinaryHeap<Reverse<(DateTime<Utc>, u64, String)>>,
    next_seq: u64,
}

/// Registry of every outstanding one-time passcode.
///
/// All operations take the table lock exactly once and do no I/O while
/// holding it, so each one is atomic with respect to the others. In
/// particular the consumed check-and-set in [`verify`](Self::verify) cannot
/// race: of two concurrent verifications of the same code, one succeeds and
/// the other sees `AlreadyUsed`.
pub struct OtpRegistry<C: Clock = SystemClock, G: IdGenerator = RandomIdGenerator> {
    clock: Arc<C>,
    ids: Arc<G>,
    config: OtpRegistryConfig,
    table: Mutex<OtpTable>,
}

impl OtpRegistry<SystemClock, RandomIdGenerator> {
    /// Registry backed by the wall clock and the OS random source
    pub fn with_system_defaults(config: OtpRegistryConfig) -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator), config)
    }
}

impl<C: Clock, G: IdGenerator> OtpRegistry<C, G> {
    /// Create a new registry
    ///
    /// # Arguments
    ///
    /// * `clock` - Time source used for issue and expiry decisions
    /// * `ids` - Identifier source for new records
    /// * `config` - Registry configuration
    pub fn new(clock: Arc<C>, ids: Arc<G>, config: OtpRegistryConfig) -> Self {
        Self {
            clock,
            ids,
            config,
            table: Mutex::new(OtpTable::default()),
        }
    }

    /// Draw a 6-digit code uniformly from `[100000, 999999]` using the OS CSPRNG
    pub fn generate_code(&self) -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Lifetime applied to newly issued codes
    pub fn expiration(&self) -> Duration {
        Duration::minutes(self.config.code_expiration_minutes)
    }

    /// Store a new code and return its identifier.
    ///
    /// The email is lower-cased and the payload gains a `created` timestamp.
    /// No other record is touched.
    pub async fn issue(&self, request: IssueOtp) -> DomainResult<String> {
        if request.code.len() != CODE_LENGTH || !request.code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation("OTP code must be 6 digits"));
        }

        let mut table = self.table.lock().await;
        let now = self.clock.now();
        let id = self.allocate_id(&table)?;

        let mut payload = request.payload;
        payload.insert(
            "created".to_string(),
            serde_json::Value::String(now.to_rfc3339()),
        );

        let email = request
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty());
        let phone = request
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let record = OtpRecord {
            id: id.clone(),
            code: request.code,
            email,
            phone,
            purpose: request.purpose,
            payload,
            issued_at: now,
            expires_at: now + self.expiration(),
            consumed: false,
        };

        let seq = table.next_seq;
        table.next_seq += 1;
        table
            .expiry_queue
            .push(Reverse((record.expires_at, seq, id.clone())));

        let masked_email = record
            .email
            .as_deref()
            .map(mask_email)
            .unwrap_or_else(|| "-".to_string());
        tracing::info!(
            otp_id = %id,
            purpose = %record.purpose,
            email = %masked_email,
            expires_at = %record.expires_at,
            event = "otp_issued",
            "Issued one-time passcode"
        );

        table.records.insert(id.clone(), Entry { seq, record });
        Ok(id)
    }

    fn allocate_id(&self, table: &OtpTable) -> DomainResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.generate_id().map_err(|e| {
                tracing::error!(error = %e, event = "otp_id_generation_failed", "Failed to generate OTP id");
                DomainError::internal(format!("Failed to generate OTP id: {}", e))
            })?;
            if !table.records.contains_key(&candidate) {
                return Ok(candidate);
            }
            tracing::warn!(event = "otp_id_collision", "Generated OTP id already in use, retrying");
        }
        Err(DomainError::internal("Could not allocate a unique OTP id"))
    }

    /// Check a submitted code against the record named by `id`.
    ///
    /// Checks run in a fixed order: existence, expiry (an expired record is
    /// removed on discovery), prior use, purpose, code. Only a full match
    /// consumes the record, and the payload is returned exactly once.
    pub async fn verify(
        &self,
        id: &str,
        submitted_code: &str,
        expected_purpose: Option<OtpPurpose>,
    ) -> Result<OtpPayload, OtpFailure> {
        let mut table = self.table.lock().await;
        let now = self.clock.now();

        let outcome = match table.records.get_mut(id) {
            None => Err(OtpFailure::NotFoundOrExpired { expired: false }),
            Some(entry) if entry.record.is_expired_at(now) => {
                Err(OtpFailure::NotFoundOrExpired { expired: true })
            }
            Some(entry) if entry.record.consumed => Err(OtpFailure::AlreadyUsed),
            Some(entry)
                if expected_purpose.is_some_and(|purpose| purpose != entry.record.purpose) =>
            {
                Err(OtpFailure::PurposeMismatch)
            }
            Some(entry)
                if !constant_time_eq(entry.record.code.as_bytes(), submitted_code.as_bytes()) =>
            {
                Err(OtpFailure::InvalidCode)
            }
            Some(entry) => {
                entry.record.consumed = true;
                Ok(entry.record.payload.clone())
            }
        };

        match &outcome {
            Ok(_) => {
                tracing::info!(otp_id = %id, event = "otp_verified", "OTP verified successfully");
            }
            Err(failure) => {
                if matches!(failure, OtpFailure::NotFoundOrExpired { expired: true }) {
                    table.records.remove(id);
                }
                tracing::warn!(
                    otp_id = %id,
                    reason = failure.code(),
                    event = "otp_verification_failed",
                    "OTP verification failed"
                );
            }
        }

        outcome
    }

    /// First issued unexpired record for `email` (case-insensitive), of any
    /// purpose. Ties on `issued_at` go to the earlier insertion.
    pub async fn lookup_by_email(&self, email: &str) -> Option<OtpRecord> {
        self.find_first(|record, now| !record.is_expired_at(now) && record.matches_email(email))
            .await
    }

    /// First issued unexpired, unconsumed record for `email` with the given
    /// purpose. Used to recover an identifier the client lost.
    pub async fn lookup_by_email_for(&self, email: &str, purpose: OtpPurpose) -> Option<OtpRecord> {
        self.find_first(|record, now| {
            record.purpose == purpose && record.is_redeemable_at(now) && record.matches_email(email)
        })
        .await
    }

    async fn find_first<F>(&self, predicate: F) -> Option<OtpRecord>
    where
        F: Fn(&OtpRecord, DateTime<Utc>) -> bool,
    {
        let table = self.table.lock().await;
        let now = self.clock.now();
        table
            .records
            .values()
            .filter(|entry| predicate(&entry.record, now))
            .min_by_key(|entry| (entry.record.issued_at, entry.seq))
            .map(|entry| entry.record.clone())
    }

    /// Remove every record whose expiry has passed, consumed or not.
    ///
    /// # Returns
    ///
    /// The number of records removed
    pub async fn sweep_expired(&self) -> usize {
        let mut table = self.table.lock().await;
        let now = self.clock.now();
        let mut removed = 0;

        while let Some(Reverse((expires_at, _, _))) = table.expiry_queue.peek() {
            if *expires_at >= now {
                break;
            }
            if let Some(Reverse((_, _, id))) = table.expiry_queue.pop() {
                if table.records.remove(&id).is_some() {
                    removed += 1;
                }
            }
        }

        if removed > 0 {
            tracing::info!(removed = removed, event = "otp_swept", "Removed expired OTP records");
        }
        removed
    }

    /// Drop a record once the action it guarded has completed.
    /// Returns whether a record was present.
    pub async fn discard(&self, id: &str) -> bool {
        let removed = self.table.lock().await.records.remove(id).is_some();
        if removed {
            tracing::debug!(otp_id = %id, event = "otp_discarded", "Discarded OTP record");
        }
        removed
    }

    /// Copy of the record stored under `id`, expired or not. Diagnostic read;
    /// flows go through `verify`.
    pub async fn get(&self, id: &str) -> Option<OtpRecord> {
        let table = self.table.lock().await;
        table.records.get(id).map(|entry| entry.record.clone())
    }

    /// Counts by state
    pub async fn stats(&self) -> OtpRegistryStats {
        let table = self.table.lock().await;
        let now = self.clock.now();
        table
            .records
            .values()
            .fold(OtpRegistryStats::default(), |mut stats, entry| {
                if entry.record.is_redeemable_at(now) {
                    stats.live += 1;
                } else if entry.record.is_expired_at(now) {
                    stats.expired += 1;
                } else {
                    stats.consumed += 1;
                }
                stats
            })
    }

    /// Number of stored records, including ones awaiting the sweep
    pub async fn len(&self) -> usize {
        self.table.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
