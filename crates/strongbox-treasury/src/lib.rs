//! Strongbox Treasury - permissioned custody of tokens and native currency
//!
//! The treasury releases funds only through admin-gated, capped,
//! pause-respecting operations, and any administrator can halt it
//! instantly. A separate custodial wallet recovers stray balances through
//! an owner-only reclamation path gated by a two-party ownership handoff.
//!
//! # Invariants
//!
//! 1. The owner is never a member of the admin set
//! 2. The zero account never gains authority
//! 3. Both caps start at zero; nothing moves until they are set
//! 4. Every mutating operation is a single serialized unit; a failure
//!    anywhere leaves no partial state
//! 5. Every successful mutation appends an audit entry (one per batch item)

pub mod admin;
pub mod cap;
mod controls;
pub mod ownable;
pub mod pause;
pub mod treasury;
pub mod wallet;

pub use admin::AdminRegistry;
pub use cap::CapPolicy;
pub use ownable::Ownership;
pub use pause::PauseGate;
pub use treasury::Treasury;
pub use wallet::CustodialWallet;
