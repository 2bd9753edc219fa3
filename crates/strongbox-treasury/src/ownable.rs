//! Two-party ownership handoff.

use serde::{Deserialize, Serialize};

use strongbox_types::{Account, Result, TreasuryError};

/// Owner plus an optional trustee.
///
/// The owner designates a trustee; only the trustee may hand ownership to a
/// new account. Every handoff clears the trustee, forcing the new owner to
/// run the ceremony afresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ownership {
    owner: Account,
    trustee: Option<Account>,
}

impl Ownership {
    pub fn new(owner: Account) -> Self {
        Self {
            owner,
            trustee: None,
        }
    }

    pub fn owner(&self) -> &Account {
        &self.owner
    }

    pub fn trustee(&self) -> Option<&Account> {
        self.trustee.as_ref()
    }

    pub fn ensure_owner(&self, caller: &Account) -> Result<()> {
        if caller != &self.owner {
            return Err(TreasuryError::OwnerRequired {
                account: caller.to_string(),
            });
        }
        Ok(())
    }

    /// Designate or replace the trustee. Owner-only.
    pub fn assign_trustee(&mut self, caller: &Account, account: &Account) -> Result<()> {
        self.ensure_owner(caller)?;
        if account.is_zero() {
            return Err(TreasuryError::ZeroAccount);
        }
        self.trustee = Some(account.clone());
        Ok(())
    }

    /// Hand ownership to `account`. Trustee-only; the trustee is cleared.
    pub fn reassign_owner(&mut self, caller: &Account, account: &Account) -> Result<()> {
        match self.trustee.as_ref() {
            Some(trustee) if trustee == caller => {}
            _ => {
                return Err(TreasuryError::TrusteeRequired {
                    account: caller.to_string(),
                })
            }
        }
        if account.is_zero() {
            return Err(TreasuryError::ZeroAccount);
        }
        self.owner = account.clone();
        self.trustee = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_replace_trustee() {
        let owner = Account::new();
        let mut ownership = Ownership::new(owner.clone());

        let t1 = Account::new();
        let t2 = Account::new();

        ownership.assign_trustee(&owner, &t1).unwrap();
        assert_eq!(ownership.trustee(), Some(&t1));

        ownership.assign_trustee(&owner, &t2).unwrap();
        assert_eq!(ownership.trustee(), Some(&t2));
    }

    #[test]
    fn test_only_owner_assigns_trustee() {
        let mut ownership = Ownership::new(Account::new());
        let stranger = Account::new();

        let result = ownership.assign_trustee(&stranger, &Account::new());
        assert!(matches!(result, Err(TreasuryError::OwnerRequired { .. })));
    }

    #[test]
    fn test_zero_trustee_rejected() {
        let owner = Account::new();
        let mut ownership = Ownership::new(owner.clone());

        let result = ownership.assign_trustee(&owner, &Account::zero());
        assert!(matches!(result, Err(TreasuryError::ZeroAccount)));
    }

    #[test]
    fn test_handoff_clears_trustee() {
        let owner = Account::new();
        let trustee = Account::new();
        let next_owner = Account::new();
        let mut ownership = Ownership::new(owner.clone());

        // Nobody can reassign before a trustee exists
        assert!(matches!(
            ownership.reassign_owner(&owner, &next_owner),
            Err(TreasuryError::TrusteeRequired { .. })
        ));

        ownership.assign_trustee(&owner, &trustee).unwrap();
        ownership.reassign_owner(&trustee, &next_owner).unwrap();
        assert_eq!(ownership.owner(), &next_owner);
        assert_eq!(ownership.trustee(), None);

        // Trustee authority does not survive the handoff
        assert!(matches!(
            ownership.reassign_owner(&trustee, &Account::new()),
            Err(TreasuryError::TrusteeRequired { .. })
        ));
    }
}
