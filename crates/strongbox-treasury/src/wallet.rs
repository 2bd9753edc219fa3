//! Custodial recovery wallet.
//!
//! A holder distinct from the treasury whose only purpose is to receive
//! accidental or forced inbound value and sweep it back to its owner. It
//! carries the same ownership, registry, and pause controls but no caps and
//! no capped withdrawal surface.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use strongbox_audit::{AuditAction, AuditTrail};
use strongbox_ledger::{NativeCurrency, TokenLedger};
use strongbox_types::{Account, Result};

use crate::controls::Controls;

/// A custodial wallet with owner-only, full-balance reclamation.
#[derive(Clone)]
pub struct CustodialWallet {
    account: Account,
    controls: Arc<RwLock<Controls>>,
    bank: Arc<dyn NativeCurrency>,
    audit: AuditTrail,
}

impl CustodialWallet {
    /// Create a wallet with a fresh ledger account.
    pub fn new(owner: Account, bank: Arc<dyn NativeCurrency>) -> Self {
        Self::with_account(Account::new(), owner, bank)
    }

    pub fn with_account(account: Account, owner: Account, bank: Arc<dyn NativeCurrency>) -> Self {
        Self {
            account,
            controls: Arc::new(RwLock::new(Controls::new(owner))),
            bank,
            audit: AuditTrail::new(),
        }
    }

    /// The wallet's own ledger account.
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
        self.controls.read().await.ownership.owner().clone()
    }

    pub async fn trustee(&self) -> Option<Account> {
        self.controls.read().await.ownership.trustee().cloned()
    }

    pub async fn is_admin(&self, account: &Account) -> bool {
        self.controls.read().await.is_admin(account)
    }

    pub async fn is_paused(&self) -> bool {
        self.controls.read().await.gate.is_paused()
    }

    // ========================================================================
    // Controls
    // ========================================================================

    pub async fn add_admin(&self, caller: &Account, account: &Account) -> Result<()> {
        let mut controls = self.controls.write().await;
        controls.add_admin(caller, account)?;
        info!(account = %account, "wallet administrator added");
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
        let mut controls = self.controls.write().await;
        controls.remove_admin(caller, account)?;
        info!(account = %account, "wallet administrator removed");
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
        let mut controls = self.controls.write().await;
        controls.add_many_admins(caller, accounts)?;
        info!(count = accounts.len(), "wallet administrators added");
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
        let mut controls = self.controls.write().await;
        controls.remove_many_admins(caller, accounts)?;
        info!(count = accounts.len(), "wallet administrators removed");
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

    pub async fn pause(&self, caller: &Account) -> Result<()> {
        let mut controls = self.controls.write().await;
        controls.pause(caller)?;
        warn!(caller = %caller, "wallet paused");
        self.audit.append(caller.clone(), AuditAction::Paused).await;
        Ok(())
    }

    pub async fn unpause(&self, caller: &Account) -> Result<()> {
        let mut controls = self.controls.write().await;
        controls.unpause(caller)?;
        info!(caller = %caller, "wallet unpaused");
        self.audit
            .append(caller.clone(), AuditAction::Unpaused)
            .await;
        Ok(())
    }

    pub async fn assign_trustee(&self, caller: &Account, account: &Account) -> Result<()> {
        let mut controls = self.controls.write().await;
        controls.assign_trustee(caller, account)?;
        info!(trustee = %account, "wallet trustee assigned");
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
        let mut controls = self.controls.write().await;
        let previous = controls.reassign_owner(caller, account)?;
        info!(previous = %previous, owner = %account, "wallet ownership reassigned");
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
    // Reclamation
    // ========================================================================

    /// Sweep the wallet's entire balance of one token to the owner.
    /// Owner-only; blocked while paused. A zero balance is a valid no-op.
    pub async fn reclaim_token(&self, caller: &Account, token: &dyn TokenLedger) -> Result<()> {
        let controls = self.controls.read().await;
        controls.gate.ensure_active()?;
        controls.ownership.ensure_owner(caller)?;

        let balance = token.balance_of(&self.account).await;
        if balance.is_zero() {
            return Ok(());
        }
        let owner = controls.ownership.owner().clone();
        token.transfer(&self.account, &owner, balance).await?;
        info!(token = %token.id(), amount = %balance, "token balance reclaimed");
        self.audit
            .append(
                caller.clone(),
                AuditAction::TokensReclaimed {
                    token: token.id().clone(),
                    amount: balance,
                },
            )
            .await;
        Ok(())
    }

    /// Sweep the wallet's entire native balance to the owner, including
    /// out-of-band force credits: the sweep reads the rail's actual balance,
    /// never a locally tracked counter.
    pub async fn reclaim_currency(&self, caller: &Account) -> Result<()> {
        let controls = self.controls.read().await;
        controls.gate.ensure_active()?;
        controls.ownership.ensure_owner(caller)?;

        let balance = self.bank.balance_of(&self.account).await;
        if balance.is_zero() {
            return Ok(());
        }
        let owner = controls.ownership.owner().clone();
        self.bank.transfer(&self.account, &owner, balance).await?;
        info!(amount = %balance, "currency balance reclaimed");
        self.audit
            .append(
                caller.clone(),
                AuditAction::CurrencyReclaimed { amount: balance },
            )
            .await;
        Ok(())
    }
}
