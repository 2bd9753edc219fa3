//! Shared balance-book internals for the in-memory ledgers.

use std::collections::{HashMap, HashSet};

use strongbox_types::{Account, Amount, Result, TreasuryError};

/// Account balances plus the set of accounts that refuse inbound value.
#[derive(Debug, Default)]
pub(crate) struct Book {
    balances: HashMap<Account, Amount>,
    rejecting: HashSet<Account>,
}

impl Book {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn balance_of(&self, account: &Account) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::zero())
    }

    pub(crate) fn set_rejecting(&mut self, account: Account, rejects: bool) {
        if rejects {
            self.rejecting.insert(account);
        } else {
            self.rejecting.remove(&account);
        }
    }

    /// Credit an account directly. Bypasses the rejection flag: this is the
    /// out-of-band force-funding path.
    pub(crate) fn credit(&mut self, account: &Account, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Err(TreasuryError::ZeroAmount);
        }
        let current = self.balance_of(account);
        let next = current
            .checked_add(amount)
            .ok_or(TreasuryError::AmountOverflow)?;
        self.balances.insert(account.clone(), next);
        Ok(())
    }

    /// Apply a multi-leg fan-out from one account as a single atomic unit.
    ///
    /// Every leg is validated (non-zero amount, accepting destination) and
    /// the full post-state is staged before anything is written, so a
    /// failing leg leaves the book untouched.
    pub(crate) fn transfer_many(
        &mut self,
        from: &Account,
        legs: &[(Account, Amount)],
    ) -> Result<()> {
        let mut total = Amount::zero();
        for (destination, amount) in legs {
            if amount.is_zero() {
                return Err(TreasuryError::ZeroAmount);
            }
            if self.rejecting.contains(destination) {
                return Err(TreasuryError::TransferRejected {
                    destination: destination.to_string(),
                });
            }
            total = total
                .checked_add(*amount)
                .ok_or(TreasuryError::AmountOverflow)?;
        }

        let available = self.balance_of(from);
        let remainder =
            available
                .checked_sub(total)
                .ok_or(TreasuryError::InsufficientBalance {
                    available: available.0,
                    requested: total.0,
                })?;

        let mut staged: HashMap<Account, Amount> = HashMap::new();
        staged.insert(from.clone(), remainder);
        for (destination, amount) in legs {
            let current = staged
                .get(destination)
                .copied()
                .unwrap_or_else(|| self.balance_of(destination));
            let next = current
                .checked_add(*amount)
                .ok_or(TreasuryError::AmountOverflow)?;
            staged.insert(destination.clone(), next);
        }

        self.balances.extend(staged);
        Ok(())
    }
}
