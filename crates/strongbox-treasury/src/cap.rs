//! Per-call transfer caps.

use serde::{Deserialize, Serialize};

use strongbox_types::{Amount, CapKind, Result, TreasuryError};

/// Ceilings a single transfer may not exceed, set independently for token
/// and native-currency movements.
///
/// Both caps start at zero, so nothing moves until they are explicitly set.
/// These are stateless per-call range checks, not cumulative-spend trackers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CapPolicy {
    token_cap: Amount,
    currency_cap: Amount,
}

impl CapPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, token_cap: Amount, currency_cap: Amount) {
        self.token_cap = token_cap;
        self.currency_cap = currency_cap;
    }

    pub fn get(&self) -> (Amount, Amount) {
        (self.token_cap, self.currency_cap)
    }

    pub fn check_token(&self, amount: Amount) -> Result<()> {
        if amount > self.token_cap {
            return Err(TreasuryError::CapExceeded {
                kind: CapKind::Token,
                requested: amount.0,
                cap: self.token_cap.0,
            });
        }
        Ok(())
    }

    pub fn check_currency(&self, amount: Amount) -> Result<()> {
        if amount > self.currency_cap {
            return Err(TreasuryError::CapExceeded {
                kind: CapKind::Currency,
                requested: amount.0,
                cap: self.currency_cap.0,
            });
        }
        Ok(())
    }
}
