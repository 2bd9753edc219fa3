//! Strongbox Ledger - external fund collaborators
//!
//! The treasury core never tracks balances of its own; it consults two
//! external collaborators:
//!
//! - [`TokenLedger`] - a fungible-token ledger with standard transfer
//!   semantics (fails on insufficient balance or destination rejection)
//! - [`NativeCurrency`] - the native-currency rail, including out-of-band
//!   force credits that bypass any receive path
//!
//! Both come with in-memory reference implementations whose multi-leg
//! transfers apply under a single write lock: a batch either fully applies
//! or fully fails.

mod book;
pub mod native;
pub mod token;

pub use native::{InMemoryBank, NativeCurrency};
pub use token::{InMemoryToken, TokenLedger};
