//! Strongbox Audit - append-only audit trail
//!
//! Every successful state mutation in the treasury appends an entry; batch
//! operations append one entry per applied item. The trail is append-only
//! and hash-chained, the off-chain replacement for contract event emission.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

use strongbox_types::{Account, Amount, TokenId};

/// Hash seed for the first entry in a trail.
const GENESIS: &str = "genesis";

/// Unique identifier for an audit entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditEntryId(pub String);

impl AuditEntryId {
    pub fn new() -> Self {
        Self(format!("audit_{}", Uuid::new_v4()))
    }
}

impl Default for AuditEntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Types of auditable actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AuditAction {
    /// Administrator granted
    AdminAdded { account: Account },
    /// Administrator revoked
    AdminRemoved { account: Account },
    /// Circuit breaker engaged
    Paused,
    /// Circuit breaker released
    Unpaused,
    /// Transfer caps changed
    CapUpdated {
        token_cap: Amount,
        currency_cap: Amount,
    },
    /// Trustee designated by the owner
    TrusteeAssigned { trustee: Account },
    /// Ownership handed off by the trustee
    OwnerReassigned {
        previous_owner: Account,
        new_owner: Account,
    },
    /// Inbound currency accepted through the receive path
    CurrencyDeposited { from: Account, amount: Amount },
    /// Capped token withdrawal
    TokensTransferred {
        token: TokenId,
        destination: Account,
        amount: Amount,
    },
    /// Capped currency withdrawal
    CurrencyTransferred { destination: Account, amount: Amount },
    /// Full-balance token sweep to the owner
    TokensReclaimed { token: TokenId, amount: Amount },
    /// Full-balance currency sweep to the owner
    CurrencyReclaimed { amount: Amount },
}

/// An audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    /// Previous entry hash (for the chain)
    pub previous_hash: String,
    /// Entry hash
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    /// The caller whose operation produced this entry
    pub actor: Account,
    pub action: AuditAction,
}

impl AuditEntry {
    /// Compute the hash of this entry
    pub fn compute_hash(&self) -> String {
        let content = format!(
            "{}:{}:{:?}:{:?}",
            self.previous_hash,
            self.timestamp.to_rfc3339(),
            self.actor,
            self.action
        );
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Verify the entry hash
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }
}

/// The Strongbox audit trail
///
/// Thread-safe and append-only; entries are never mutated or removed.
#[derive(Clone, Default)]
pub struct AuditTrail {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, chaining it to the previous one.
    pub async fn append(&self, actor: Account, action: AuditAction) -> AuditEntryId {
        let mut entries = self.entries.write().await;
        let previous_hash = entries
            .last()
            .map(|entry| entry.hash.clone())
            .unwrap_or_else(|| GENESIS.to_string());

        let mut entry = AuditEntry {
            id: AuditEntryId::new(),
            previous_hash,
            hash: String::new(),
            timestamp: Utc::now(),
            actor,
            action,
        };
        entry.hash = entry.compute_hash();

        let id = entry.id.clone();
        entries.push(entry);
        id
    }

    /// All entries, oldest first.
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }

    /// Entries produced by one actor.
    pub async fn entries_for(&self, actor: &Account) -> Vec<AuditEntry> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|entry| &entry.actor == actor)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Walk the chain and verify every link and hash.
    pub async fn verify_chain(&self) -> bool {
        let entries = self.entries.read().await;
        let mut previous = GENESIS;
        for entry in entries.iter() {
            if entry.previous_hash != previous || !entry.verify() {
                return false;
            }
            previous = &entry.hash;
        }
        true
    }
}
