//! Shared control plane for the treasury aggregates.

use serde::{Deserialize, Serialize};

use strongbox_types::{Account, Result, TreasuryError};

use crate::{AdminRegistry, Ownership, PauseGate};

/// Ownership, admin registry, and pause gate, mutated as one unit.
///
/// Authorization runs at the top of every mutating operation; the
/// aggregates lock a `Controls` value for the duration of each call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Controls {
    pub(crate) ownership: Ownership,
    pub(crate) registry: AdminRegistry,
    pub(crate) gate: PauseGate,
}

impl Controls {
    pub(crate) fn new(owner: Account) -> Self {
        Self {
            ownership: Ownership::new(owner),
            registry: AdminRegistry::new(),
            gate: PauseGate::new(),
        }
    }

    pub(crate) fn is_admin(&self, account: &Account) -> bool {
        self.registry.is_admin(self.ownership.owner(), account)
    }

    pub(crate) fn ensure_admin(&self, caller: &Account) -> Result<()> {
        if !self.is_admin(caller) {
            return Err(TreasuryError::AdminRequired {
                account: caller.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn add_admin(&mut self, caller: &Account, account: &Account) -> Result<()> {
        self.ensure_admin(caller)?;
        let owner = self.ownership.owner().clone();
        self.registry.add(&owner, account)
    }

    pub(crate) fn remove_admin(&mut self, caller: &Account, account: &Account) -> Result<()> {
        self.ensure_admin(caller)?;
        let owner = self.ownership.owner().clone();
        self.registry.remove(&owner, account)
    }

    pub(crate) fn add_many_admins(
        &mut self,
        caller: &Account,
        accounts: &[Account],
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        let owner = self.ownership.owner().clone();
        self.registry.add_many(&owner, accounts)
    }

    pub(crate) fn remove_many_admins(
        &mut self,
        caller: &Account,
        accounts: &[Account],
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        let owner = self.ownership.owner().clone();
        self.registry.remove_many(&owner, accounts)
    }

    pub(crate) fn pause(&mut self, caller: &Account) -> Result<()> {
        self.ensure_admin(caller)?;
        self.gate.engage()
    }

    pub(crate) fn unpause(&mut self, caller: &Account) -> Result<()> {
        self.ensure_admin(caller)?;
        self.gate.release()
    }

    pub(crate) fn assign_trustee(&mut self, caller: &Account, account: &Account) -> Result<()> {
        self.ownership.assign_trustee(caller, account)
    }

    /// Hand ownership off and keep the owner-not-a-member invariant: an
    /// incoming owner that sat in the admin set is purged (its authority is
    /// implicit from now on). Returns the previous owner.
    pub(crate) fn reassign_owner(
        &mut self,
        caller: &Account,
        account: &Account,
    ) -> Result<Account> {
        let previous = self.ownership.owner().clone();
        self.ownership.reassign_owner(caller, account)?;
        self.registry.purge(account);
        Ok(previous)
    }
}
