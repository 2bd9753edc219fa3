//! Error types for Strongbox
//!
//! Every error is a rejected call, never a crash: an error aborts the whole
//! enclosing operation with no partial state change.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for Strongbox operations
pub type Result<T> = std::result::Result<T, TreasuryError>;

/// Which cap a transfer was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapKind {
    Token,
    Currency,
}

impl fmt::Display for CapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token => write!(f, "token"),
            Self::Currency => write!(f, "currency"),
        }
    }
}

/// Strongbox error types
#[derive(Debug, Clone, Error)]
pub enum TreasuryError {
    // ========================================================================
    // Authorization Errors
    // ========================================================================

    /// Caller is not an administrator
    #[error("Account {account} is not an administrator")]
    AdminRequired { account: String },

    /// Caller is not the owner
    #[error("Account {account} is not the owner")]
    OwnerRequired { account: String },

    /// Caller is not the trustee
    #[error("Account {account} is not the trustee")]
    TrusteeRequired { account: String },

    // ========================================================================
    // Pause-State Errors
    // ========================================================================

    /// Operation requires the active state
    #[error("Operation unavailable while paused")]
    Paused,

    /// pause() called while already paused
    #[error("Already paused")]
    AlreadyPaused,

    /// unpause() called while active
    #[error("Not paused")]
    NotPaused,

    // ========================================================================
    // Cap Errors
    // ========================================================================

    /// Requested amount exceeds the active cap for its kind
    #[error("{kind} transfer of {requested} exceeds the cap of {cap}")]
    CapExceeded {
        kind: CapKind,
        requested: u128,
        cap: u128,
    },

    // ========================================================================
    // Argument Errors
    // ========================================================================

    /// The zero account was used where a real account is required
    #[error("The zero account is not a valid target")]
    ZeroAccount,

    /// Duplicate admin grant
    #[error("Account {account} is already an administrator")]
    AlreadyAdmin { account: String },

    /// Admin revocation of a non-member
    #[error("Account {account} is not in the administrator set")]
    AdminNotFound { account: String },

    /// The owner was targeted by an admin-set mutation
    #[error("The owner's administrator authority is implicit and cannot be granted or revoked")]
    OwnerImmutable,

    /// Bulk request with mismatched list lengths
    #[error("Destination and amount lists differ in length: {destinations} vs {amounts}")]
    LengthMismatch {
        destinations: usize,
        amounts: usize,
    },

    /// Arithmetic overflow while summing amounts
    #[error("Amount arithmetic overflow")]
    AmountOverflow,

    /// Zero-value movement
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    // ========================================================================
    // Fund Errors
    // ========================================================================

    /// Ledger or native balance too low
    #[error("Insufficient balance: have {available}, need {requested}")]
    InsufficientBalance { available: u128, requested: u128 },

    /// Destination refused the inbound value
    #[error("Destination {destination} refused the transfer")]
    TransferRejected { destination: String },
}
