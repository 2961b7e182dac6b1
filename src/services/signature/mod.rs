//! Signature resolution.
//!
//! Maps the 32-byte signature word of an action step to the argument layout
//! needed to decode matching logs and calldata.

mod catalog;
mod error;
mod manifest;
mod shape;

pub use catalog::{
	catalog_key, signature_hash, KnownSignatures, LayeredCatalog, SignatureCatalog,
	SignatureEntry, SignatureRegistry,
};
pub use error::SignatureError;
pub use manifest::static_catalog;
pub use shape::DecodedShape;
