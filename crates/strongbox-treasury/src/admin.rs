//! Administrator registry.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use strongbox_types::{Account, Result, TreasuryError};

/// The administrator set.
///
/// The owner is never stored here; owner authority is implicit and checked
/// alongside membership. The zero account is never a member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminRegistry {
    admins: HashSet<Account>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// True for the owner and for any member of the set.
    pub fn is_admin(&self, owner: &Account, account: &Account) -> bool {
        account == owner || self.admins.contains(account)
    }

    pub fn members(&self) -> Vec<Account> {
        self.admins.iter().cloned().collect()
    }

    pub fn add(&mut self, owner: &Account, account: &Account) -> Result<()> {
        if account.is_zero() {
            return Err(TreasuryError::ZeroAccount);
        }
        if account == owner {
            return Err(TreasuryError::OwnerImmutable);
        }
        if !self.admins.insert(account.clone()) {
            return Err(TreasuryError::AlreadyAdmin {
                account: account.to_string(),
            });
        }
        Ok(())
    }

    pub fn remove(&mut self, owner: &Account, account: &Account) -> Result<()> {
        if account == owner {
            return Err(TreasuryError::OwnerImmutable);
        }
        if !self.admins.remove(account) {
            return Err(TreasuryError::AdminNotFound {
                account: account.to_string(),
            });
        }
        Ok(())
    }

    /// All-or-nothing batch grant in list order: one invalid entry leaves
    /// the set untouched.
    pub fn add_many(&mut self, owner: &Account, accounts: &[Account]) -> Result<()> {
        let mut staged = self.clone();
        for account in accounts {
            staged.add(owner, account)?;
        }
        self.admins = staged.admins;
        Ok(())
    }

    /// All-or-nothing batch revocation in list order.
    pub fn remove_many(&mut self, owner: &Account, accounts: &[Account]) -> Result<()> {
        let mut staged = self.clone();
        for account in accounts {
            staged.remove(owner, account)?;
        }
        self.admins = staged.admins;
        Ok(())
    }

    /// Drop a membership without the owner-targeting checks. Used when an
    /// existing member becomes the owner, whose authority must stay
    /// implicit. Returns whether the account was a member.
    pub fn purge(&mut self, account: &Account) -> bool {
        self.admins.remove(account)
    }
}
