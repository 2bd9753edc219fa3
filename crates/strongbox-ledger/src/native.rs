//! Native-currency transfer primitive.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use strongbox_types::{Account, Amount, Result};

use crate::book::Book;

/// Native-currency rail.
///
/// A recipient that refuses the inbound value produces a typed
/// `TransferRejected` error rather than a panic; the failed call moves no
/// funds.
#[async_trait]
pub trait NativeCurrency: Send + Sync {
    async fn balance_of(&self, account: &Account) -> Amount;

    async fn transfer(&self, from: &Account, to: &Account, amount: Amount) -> Result<()>;

    /// Apply a multi-leg fan-out from one account as a single atomic unit.
    async fn transfer_many(&self, from: &Account, legs: &[(Account, Amount)]) -> Result<()>;

    /// Credit an account directly, bypassing any receive path. This is the
    /// off-chain analogue of force-funding an address.
    async fn force_credit(&self, account: &Account, amount: Amount) -> Result<()>;
}

/// In-memory reference rail.
#[derive(Clone, Default)]
pub struct InMemoryBank {
    book: Arc<RwLock<Book>>,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an account as refusing inbound transfers.
    pub async fn set_rejecting(&self, account: Account, rejects: bool) {
        self.book.write().await.set_rejecting(account, rejects);
    }
}

#[async_trait]
impl NativeCurrency for InMemoryBank {
    async fn balance_of(&self, account: &Account) -> Amount {
        self.book.read().await.balance_of(account)
    }

    async fn transfer(&self, from: &Account, to: &Account, amount: Amount) -> Result<()> {
        let legs = [(to.clone(), amount)];
        self.book.write().await.transfer_many(from, &legs)?;
        info!(from = %from, to = %to, amount = %amount, "currency transfer");
        Ok(())
    }

    async fn transfer_many(&self, from: &Account, legs: &[(Account, Amount)]) -> Result<()> {
        self.book.write().await.transfer_many(from, legs)?;
        info!(from = %from, legs = legs.len(), "currency fan-out");
        Ok(())
    }

    async fn force_credit(&self, account: &Account, amount: Amount) -> Result<()> {
        self.book.write().await.credit(account, amount)?;
        info!(account = %account, amount = %amount, "out-of-band credit");
        Ok(())
    }
}
