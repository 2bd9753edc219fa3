//! The treasury aggregate.
//!
//! Holds token and native-currency balances on the external collaborators
//! and releases them only through admin-gated, capped, pause-respecting
//! withdrawals, single or fanned out. Every mutating operation runs as one
//! serialized unit: the control lock is held across the external ledger
//! call, so a pause cannot interleave mid-operation.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use strongbox_audit::{AuditAction, AuditTrail};
use strongbox_ledger::{NativeCurrency, TokenLedger};
use strongbox_types::{Account, Amount, Result, TreasuryError};

use crate::controls::Controls;
use crate::CapPolicy;

/// Control state guarded as one unit.
#[derive(Debug)]
struct State {
    controls: Controls,
    caps: CapPolicy,
}

/// A permissioned treasury.
#[derive(Clone)]
pub struct Treasury {
    account: Account,
    state: Arc<RwLock<State>>,
    bank: Arc<dyn NativeCurrency>,
    audit: AuditTrail,
}

impl Treasury {
    /// Create a treasury with a fresh ledger account.
    pub fn new(owner: Account, bank: Arc<dyn NativeCurrency>) -> Self {
        Self::with_account(Account::new(), owner, bank)
    }

    pub fn with_account(account: Account, owner: Account, bank: Arc<dyn NativeCurrency>) -> Self {
        Self {
            account,
            state: Arc::new(RwLock::new(State {
                controls: Controls::new(owner),
                caps: CapPolicy::new(),
            })),
            bank,
            audit: AuditTrail::new(),
        }
    }

    /// The treasury's own ledger account.
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub async fn owner(&self) -> Account {
        self.state.read().await.controls.ownership.owner().clone()
    }

    pub async fn trustee(&self) -> Option<Account> {
        self.state.read().await.controls.ownership.trustee().cloned()
    }

    pub async fn is_admin(&self, account: &Account) -> bool {
        self.state.read().await.controls.is_admin(account)
    }

    pub async fn is_paused(&self) -> bool {
        self.state.read().await.controls.gate.is_paused()
    }

    pub async fn get_cap(&self) -> (Amount, Amount) {
        self.state.read().await.caps.get()
    }

    /// Validate a token amount against the cap. Returns `Ok(true)` or the
    /// cap error; never `Ok(false)`.
    pub async fn check_if_valid_transfer(&self, amount: Amount) -> Result<bool> {
        self.state.read().await.caps.check_token(amount)?;
        Ok(true)
    }

    /// Validate a currency amount against the cap.
    pub async fn check_if_valid_currency_transfer(&self, amount: Amount) -> Result<bool> {
        self.state.read().await.caps.check_currency(amount)?;
        Ok(true)
    }

    /// The treasury's balance on a token ledger.
    pub async fn token_balance_of(&self, token: &dyn TokenLedger) -> Amount {
        token.balance_of(&self.account).await
    }

    // ========================================================================
    // Administrator registry
    // ========================================================================

    pub async fn add_admin(&self, caller: &Account, account: &Account) -> Result<()> {
        let mut state = self.state.write().await;
        state.controls.add_admin(caller, account)?;
        info!(account = %account, "administrator added");
        self.audit
            .append(
                caller.clone(),
                AuditAction::AdminAdded {
                    account: account.clone(),
                },
            )
            .await;
        Ok(())
    }

    pub async fn remove_admin(&self, caller: &Account, account: &Account) -> Result<()> {
        let mut state = self.state.write().await;
        state.controls.remove_admin(caller, account)?;
        info!(account = %account, "administrator removed");
        self.audit
            .append(
                caller.clone(),
                AuditAction::AdminRemoved {
                    account: account.clone(),
                },
            )
            .await;
        Ok(())
    }

    pub async fn add_many_admins(&self, caller: &Account, accounts: &[Account]) -> Result<()> {
        let mut state = self.state.write().await;
        state.controls.add_many_admins(caller, accounts)?;
        info!(count = accounts.len(), "administrators added");
        for account in accounts {
            self.audit
                .append(
                    caller.clone(),
                    AuditAction::AdminAdded {
                        account: account.clone(),
                    },
                )
                .await;
        }
        Ok(())
    }

    pub async fn remove_many_admins(&self, caller: &Account, accounts: &[Account]) -> Result<()> {
        let mut state = self.state.write().await;
        state.controls.remove_many_admins(caller, accounts)?;
        info!(count = accounts.len(), "administrators removed");
        for account in accounts {
            self.audit
                .append(
                    caller.clone(),
                    AuditAction::AdminRemoved {
                        account: account.clone(),
                    },
                )
                .await;
        }
        Ok(())
    }

    // ========================================================================
    // Pause gate
    // ========================================================================

    pub async fn pause(&self, caller: &Account) -> Result<()> {
        let mut state = self.state.write().await;
        state.controls.pause(caller)?;
        warn!(caller = %caller, "treasury paused");
        self.audit.append(caller.clone(), AuditAction::Paused).await;
        Ok(())
    }

    pub async fn unpause(&self, caller: &Account) -> Result<()> {
        let mut state = self.state.write().await;
        state.controls.unpause(caller)?;
        info!(caller = %caller, "treasury unpaused");
        self.audit
            .append(caller.clone(), AuditAction::Unpaused)
            .await;
        Ok(())
    }

    // ========================================================================
    // Cap policy
    // ========================================================================

    /// Set both caps. Frozen while paused, so a compromised admin key
    /// cannot raise ceilings during an emergency halt.
    pub async fn set_cap(
        &self,
        caller: &Account,
        token_cap: Amount,
        currency_cap: Amount,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state.controls.gate.ensure_active()?;
        state.controls.ensure_admin(caller)?;
        state.caps.set(token_cap, currency_cap);
        info!(token_cap = %token_cap, currency_cap = %currency_cap, "transfer caps updated");
        self.audit
            .append(
                caller.clone(),
                AuditAction::CapUpdated {
                    token_cap,
                    currency_cap,
                },
            )
            .await;
        Ok(())
    }

    // ========================================================================
    // Ownership
    // ========================================================================

    pub async fn assign_trustee(&self, caller: &Account, account: &Account) -> Result<()> {
        let mut state = self.state.write().await;
        state.controls.assign_trustee(caller, account)?;
        info!(trustee = %account, "trustee assigned");
        self.audit
            .append(
                caller.clone(),
                AuditAction::TrusteeAssigned {
                    trustee: account.clone(),
                },
            )
            .await;
        Ok(())
    }

    pub async fn reassign_owner(&self, caller: &Account, account: &Account) -> Result<()> {
        let mut state = self.state.write().await;
        let previous = state.controls.reassign_owner(caller, account)?;
        info!(previous = %previous, owner = %account, "ownership reassigned");
        self.audit
            .append(
                caller.clone(),
                AuditAction::OwnerReassigned {
                    previous_owner: previous,
                    new_owner: account.clone(),
                },
            )
            .await;
        Ok(())
    }

    // ========================================================================
    // Funds
    // ========================================================================

    /// Inbound native-currency credit, the receive path. Open to anyone,
    /// but only while active.
    pub async fn deposit(&self, from: &Account, amount: Amount) -> Result<()> {
        let state = self.state.read().await;
        state.controls.gate.ensure_active()?;
        self.bank.transfer(from, &self.account, amount).await?;
        info!(from = %from, amount = %amount, "currency deposit accepted");
        self.audit
            .append(
                from.clone(),
                AuditAction::CurrencyDeposited {
                    from: from.clone(),
                    amount,
                },
            )
            .await;
        Ok(())
    }

    /// Capped, admin-gated token withdrawal.
    pub async fn transfer_tokens(
        &self,
        caller: &Account,
        token: &dyn TokenLedger,
        destination: &Account,
        amount: Amount,
    ) -> Result<()> {
        let state = self.state.read().await;
        state.controls.gate.ensure_active()?;
        state.controls.ensure_admin(caller)?;
        state.caps.check_token(amount)?;
        token.transfer(&self.account, destination, amount).await?;
        info!(token = %token.id(), destination = %destination, amount = %amount, "tokens released");
        self.audit
            .append(
                caller.clone(),
                AuditAction::TokensTransferred {
                    token: token.id().clone(),
                    destination: destination.clone(),
                    amount,
                },
            )
            .await;
        Ok(())
    }

    /// Capped, admin-gated currency withdrawal.
    pub async fn transfer_currency(
        &self,
        caller: &Account,
        destination: &Account,
        amount: Amount,
    ) -> Result<()> {
        let state = self.state.read().await;
        state.controls.gate.ensure_active()?;
        state.controls.ensure_admin(caller)?;
        state.caps.check_currency(amount)?;
        self.bank
            .transfer(&self.account, destination, amount)
            .await?;
        info!(destination = %destination, amount = %amount, "currency released");
        self.audit
            .append(
                caller.clone(),
                AuditAction::CurrencyTransferred {
                    destination: destination.clone(),
                    amount,
                },
            )
            .await;
        Ok(())
    }

    /// Atomic multi-recipient token disbursement. The summed request is
    /// validated against the token cap, then the fan-out applies as a
    /// single unit on the ledger: one bad leg moves nothing.
    pub async fn bulk_transfer(
        &self,
        caller: &Account,
        token: &dyn TokenLedger,
        destinations: &[Account],
        amounts: &[Amount],
    ) -> Result<()> {
        let state = self.state.read().await;
        state.controls.gate.ensure_active()?;
        state.controls.ensure_admin(caller)?;
        let (legs, total) = stage_legs(destinations, amounts)?;
        state.caps.check_token(total)?;
        token.transfer_many(&self.account, &legs).await?;
        info!(token = %token.id(), legs = legs.len(), total = %total, "bulk tokens released");
        for (destination, amount) in &legs {
            self.audit
                .append(
                    caller.clone(),
                    AuditAction::TokensTransferred {
                        token: token.id().clone(),
                        destination: destination.clone(),
                        amount: *amount,
                    },
                )
                .await;
        }
        Ok(())
    }

    /// Atomic multi-recipient currency disbursement against the currency
    /// cap.
    pub async fn bulk_transfer_currency(
        &self,
        caller: &Account,
        destinations: &[Account],
        amounts: &[Amount],
    ) -> Result<()> {
        let state = self.state.read().await;
        state.controls.gate.ensure_active()?;
        state.controls.ensure_admin(caller)?;
        let (legs, total) = stage_legs(destinations, amounts)?;
        state.caps.check_currency(total)?;
        self.bank.transfer_many(&self.account, &legs).await?;
        info!(legs = legs.len(), total = %total, "bulk currency released");
        for (destination, amount) in &legs {
            self.audit
                .append(
                    caller.clone(),
                    AuditAction::CurrencyTransferred {
                        destination: destination.clone(),
                        amount: *amount,
                    },
                )
                .await;
        }
        Ok(())
    }
}

/// Pair up a bulk request and compute its checked sum.
fn stage_legs(
    destinations: &[Account],
    amounts: &[Amount],
) -> Result<(Vec<(Account, Amount)>, Amount)> {
    if destinations.len() != amounts.len() {
        return Err(TreasuryError::LengthMismatch {
            destinations: destinations.len(),
            amounts: amounts.len(),
        });
    }
    let mut total = Amount::zero();
    let mut legs = Vec::with_capacity(destinations.len());
    for (destination, amount) in destinations.iter().zip(amounts) {
        total = total
            .checked_add(*amount)
            .ok_or(TreasuryError::AmountOverflow)?;
        legs.push((destination.clone(), *amount));
    }
    Ok((legs, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_legs_length_mismatch() {
        let result = stage_legs(&[Account::new()], &[]);
        assert!(matches!(
            result,
            Err(TreasuryError::LengthMismatch {
                destinations: 1,
                amounts: 0
            })
        ));
    }

    #[test]
    fn test_stage_legs_sums() {
        let destinations = vec![Account::new(), Account::new()];
        let amounts = vec![Amount::new(3), Amount::new(4)];
        let (legs, total) = stage_legs(&destinations, &amounts).unwrap();
        assert_eq!(legs.len(), 2);
        assert_eq!(total, Amount::new(7));
    }

    #[test]
    fn test_stage_legs_overflow() {
        let destinations = vec![Account::new(), Account::new()];
        let amounts = vec![Amount::new(u128::MAX), Amount::new(1)];
        assert!(matches!(
            stage_legs(&destinations, &amounts),
            Err(TreasuryError::AmountOverflow)
        ));
    }
}
