//! Identity types for Strongbox
//!
//! Accounts are opaque, equality-comparable identifiers. A single reserved
//! zero account exists; it never gains authority and is never a valid
//! registry member or trustee.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The reserved zero account string.
const ZERO: &str = "acct_0";

/// Unique identifier for a treasury participant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account(pub String);

impl Account {
    pub fn new() -> Self {
        Self(format!("acct_{}", Uuid::new_v4()))
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The zero sentinel.
    pub fn zero() -> Self {
        Self(ZERO.to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == ZERO
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a fungible-token ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub String);

impl TokenId {
    pub fn new() -> Self {
        Self(format!("token_{}", Uuid::new_v4()))
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
