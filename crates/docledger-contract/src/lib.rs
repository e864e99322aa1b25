//! Asset transfer contract for the document asset ledger.
//!
//! The contract is a pure library of operations over an injected
//! [`WorldState`](docledger_state::WorldState). The surrounding ledger
//! platform owns ordering, endorsement, and commit; each operation here runs
//! synchronously against the state handle carried by a
//! [`TransactionContext`].
//!
//! - [`AssetTransfer`] implements the typed operations
//! - [`ContractRouter`] maps operation names to handlers for by-name
//!   invocation, with a fixed fallthrough for unknown names
//! - [`ContractError`] carries the machine-readable code used as the error
//!   payload

pub mod context;
pub mod contract;
pub mod error;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use context::TransactionContext;
pub use contract::AssetTransfer;
pub use error::{ContractError, ContractResult, ErrorCode};
pub use router::{ContractRouter, RouterError, REQUIRED_OPERATIONS};
