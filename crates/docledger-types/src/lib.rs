//! Foundation types for the document asset ledger.
//!
//! This crate holds the single ledger entity, [`Asset`], together with its
//! canonical storage encoding. Every other docledger crate depends on
//! `docledger-types`.
//!
//! # Key Types
//!
//! - [`Asset`]: a registered document (identifier, link, owner, serial)
//! - [`encode_asset`] / [`decode_asset`]: the byte-exact JSON codec
//! - [`CodecError`]: why a stored value failed to decode
//! - [`sample_assets`]: the bootstrap set written by `InitLedger`

pub mod asset;
pub mod codec;
pub mod error;
pub mod sample;

pub use asset::Asset;
pub use codec::{decode_asset, encode_asset, encode_asset_list};
pub use error::{CodecError, CodecResult};
pub use sample::{sample_assets, SAMPLE_DOCUMENT_LINK};
