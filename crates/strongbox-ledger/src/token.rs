//! Fungible-token ledger collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use strongbox_types::{Account, Amount, Result, TokenId};

use crate::book::Book;

/// External fungible-token ledger.
///
/// Transfer failures (insufficient balance, rejecting destination) surface
/// as typed errors; a failed call moves no funds.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Identifier of the token this ledger tracks.
    fn id(&self) -> &TokenId;

    async fn balance_of(&self, account: &Account) -> Amount;

    async fn transfer(&self, from: &Account, to: &Account, amount: Amount) -> Result<()>;

    /// Apply a multi-leg fan-out from one account as a single atomic unit:
    /// either every leg applies or none does.
    async fn transfer_many(&self, from: &Account, legs: &[(Account, Amount)]) -> Result<()>;
}

/// In-memory reference token.
///
/// The full initial supply is credited to a single holder at construction,
/// in the manner of a standard token deployment.
#[derive(Clone)]
pub struct InMemoryToken {
    id: TokenId,
    book: Arc<RwLock<Book>>,
}

impl InMemoryToken {
    pub fn new(id: TokenId, holder: Account, supply: Amount) -> Self {
        let mut book = Book::new();
        if !supply.is_zero() {
            // Fresh book, cannot overflow
            let _ = book.credit(&holder, supply);
        }
        Self {
            id,
            book: Arc::new(RwLock::new(book)),
        }
    }

    /// Mark an account as refusing inbound transfers.
    pub async fn set_rejecting(&self, account: Account, rejects: bool) {
        self.book.write().await.set_rejecting(account, rejects);
    }
}

#[async_trait]
impl TokenLedger for InMemoryToken {
    fn id(&self) -> &TokenId {
        &self.id
    }

    async fn balance_of(&self, account: &Account) -> Amount {
        self.book.read().await.balance_of(account)
    }

    async fn transfer(&self, from: &Account, to: &Account, amount: Amount) -> Result<()> {
        let legs = [(to.clone(), amount)];
        self.book.write().await.transfer_many(from, &legs)?;
        info!(token = %self.id, from = %from, to = %to, amount = %amount, "token transfer");
        Ok(())
    }

    async fn transfer_many(&self, from: &Account, legs: &[(Account, Amount)]) -> Result<()> {
        self.book.write().await.transfer_many(from, legs)?;
        info!(token = %self.id, from = %from, legs = legs.len(), "token fan-out");
        Ok(())
    }
}
