//! World state storage for the document asset ledger.
//!
//! The ledger platform owns the world state: the current key/value snapshot
//! of every tracked asset. This crate defines the narrow interface the
//! contract sees and the backends used to run it outside a live network.
//!
//! # Storage Backends
//!
//! All backends implement the [`WorldState`] trait:
//!
//! - [`InMemoryWorldState`] -- `BTreeMap`-based store for tests and embedding
//! - [`FileWorldState`] -- in-memory store persisted to a checksummed snapshot
//!
//! # Design Rules
//!
//! 1. Keys are opaque strings; values are opaque bytes.
//! 2. Range scans are ascending by key, start-inclusive, end-exclusive, and
//!    an empty bound means unbounded on that side.
//! 3. Every scan is a resource: it is closed on every exit path, which
//!    [`ScanGuard`] enforces.
//! 4. The store never interprets values.

pub mod digest;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use digest::{state_digest, StateDigest};
pub use error::{StateError, StateResult};
pub use file::FileWorldState;
pub use memory::InMemoryWorldState;
pub use traits::{KeyValue, ScanGuard, StateIterator, WorldState};
