//! Signature catalogs keyed by signature hash.
//!
//! A catalog maps `(SignatureType, hash)` to every known argument layout for
//! that hash. Two implementations exist: the process-wide manifest built once
//! at startup and [`KnownSignatures`] supplied per validation call.
//! [`LayeredCatalog`] consults the per-call override before the manifest.

use std::collections::{hash_map::Entry, HashMap};

use alloy::primitives::B256;

use crate::{
	models::SignatureType,
	services::signature::{DecodedShape, SignatureError},
	utils::logging::error::ErrorMetadata,
};

/// Read-only lookup from signature hash to argument layouts.
pub trait SignatureCatalog: Send + Sync {
	/// Returns the entry for `signature`, or `None` when unknown.
	fn lookup(&self, signature_type: SignatureType, signature: &B256) -> Option<&SignatureEntry>;

	/// Like [`lookup`](Self::lookup) but reports unknown signatures as an error.
	fn resolve(
		&self,
		signature_type: SignatureType,
		signature: &B256,
	) -> Result<&SignatureEntry, SignatureError> {
		self.lookup(signature_type, signature).ok_or_else(|| {
			SignatureError::not_found(
				format!("no {:?} signature registered for {}", signature_type, signature),
				None,
				Some(ErrorMetadata::from([(
					"signature".to_string(),
					signature.to_string(),
				)])),
			)
		})
	}
}

/// Normalizes a stored signature word to its lookup key.
///
/// Function selectors only use the first 4 bytes; the padding is ignored.
pub fn catalog_key(signature_type: SignatureType, signature: &B256) -> (SignatureType, B256) {
	match signature_type {
		SignatureType::Event => (signature_type, *signature),
		SignatureType::Func => (
			signature_type,
			B256::right_padding_from(&signature.as_slice()[..4]),
		),
	}
}

/// Computes the 32-byte word stored in `ActionStep::signature` for a
/// human-readable signature.
pub fn signature_hash(
	signature_type: SignatureType,
	signature: &str,
) -> Result<B256, SignatureError> {
	Ok(DecodedShape::parse(signature_type, signature)?.selector())
}

/// All known layouts sharing one signature hash. Never empty: an entry is
/// created from its first layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEntry {
	signature_type: SignatureType,
	selector: B256,
	layouts: Vec<DecodedShape>,
}

impl SignatureEntry {
	pub fn new(shape: DecodedShape) -> Self {
		Self {
			signature_type: shape.signature_type(),
			selector: shape.selector(),
			layouts: vec![shape],
		}
	}

	pub fn signature_type(&self) -> SignatureType {
		self.signature_type
	}

	pub fn selector(&self) -> &B256 {
		&self.selector
	}

	pub fn layouts(&self) -> &[DecodedShape] {
		&self.layouts
	}

	/// Picks the layout matching a log with `topic_count` topics.
	///
	/// Layouts sharing a topic hash differ only in which arguments are
	/// indexed, so the number of indexed arguments must be `topic_count - 1`.
	/// Falls back to the first layout.
	pub fn layout_for_topics(&self, topic_count: usize) -> &DecodedShape {
		let indexed = topic_count.saturating_sub(1);
		self.layouts
			.iter()
			.find(|layout| layout.indexed_count() == indexed)
			.unwrap_or(&self.layouts[0])
	}

	/// Layout used for calldata. Function selectors identify a single layout.
	pub fn primary_layout(&self) -> &DecodedShape {
		&self.layouts[0]
	}

	/// Largest arity among the known layouts.
	pub fn max_arity(&self) -> usize {
		self.layouts
			.iter()
			.map(DecodedShape::arity)
			.max()
			.unwrap_or(0)
	}
}

/// Hash-indexed set of signature layouts
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
	entries: HashMap<(SignatureType, B256), SignatureEntry>,
}

impl SignatureRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a registry from human-readable signatures.
	///
	/// Signatures that fail to parse are logged and skipped, so one bad
	/// manifest line cannot take the whole catalog down.
	pub fn from_manifest(manifest: &[(SignatureType, &str)]) -> Self {
		let mut registry = Self::new();
		for (signature_type, signature) in manifest {
			if let Err(e) = registry.register(*signature_type, signature) {
				tracing::error!(signature = %signature, error = %e, "Skipping manifest signature");
			}
		}
		tracing::debug!(entries = registry.len(), "Signature manifest loaded");
		registry
	}

	/// Parses and registers one signature, returning its hash.
	pub fn register(
		&mut self,
		signature_type: SignatureType,
		signature: &str,
	) -> Result<B256, SignatureError> {
		let shape = DecodedShape::parse(signature_type, signature)?;
		let selector = shape.selector();
		self.insert(shape);
		Ok(selector)
	}

	/// Adds a layout under its own selector. Identical layouts are stored once.
	pub fn insert(&mut self, shape: DecodedShape) {
		let selector = shape.selector();
		match self.entries.entry((shape.signature_type(), selector)) {
			Entry::Occupied(mut occupied) => {
				let entry = occupied.get_mut();
				if !entry.layouts.contains(&shape) {
					entry.layouts.push(shape);
				}
			}
			Entry::Vacant(vacant) => {
				vacant.insert(SignatureEntry::new(shape));
			}
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl SignatureCatalog for SignatureRegistry {
	fn lookup(&self, signature_type: SignatureType, signature: &B256) -> Option<&SignatureEntry> {
		self.entries.get(&catalog_key(signature_type, signature))
	}
}

/// Signatures supplied by the caller for one validation call
#[derive(Debug, Clone, Default)]
pub struct KnownSignatures {
	registry: SignatureRegistry,
}

impl KnownSignatures {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds the set from signatures carrying their `event`/`function` keyword.
	pub fn from_signatures<I, S>(signatures: I) -> Result<Self, SignatureError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		signatures
			.into_iter()
			.try_fold(Self::new(), |known, signature| {
				let signature = signature.as_ref().trim();
				if signature.starts_with("event ") {
					known.with_event(signature)
				} else if signature.starts_with("function ") {
					known.with_function(signature)
				} else {
					Err(SignatureError::invalid_signature(
						format!(
							"signature '{}' must start with 'event' or 'function'",
							signature
						),
						None,
						None,
					))
				}
			})
	}

	/// Adds an event layout. The `event` keyword is optional.
	pub fn with_event(mut self, signature: &str) -> Result<Self, SignatureError> {
		self.registry.register(SignatureType::Event, signature)?;
		Ok(self)
	}

	/// Adds a function layout. The `function` keyword is optional.
	pub fn with_function(mut self, signature: &str) -> Result<Self, SignatureError> {
		self.registry.register(SignatureType::Func, signature)?;
		Ok(self)
	}

	pub fn len(&self) -> usize {
		self.registry.len()
	}

	pub fn is_empty(&self) -> bool {
		self.registry.is_empty()
	}
}

impl SignatureCatalog for KnownSignatures {
	fn lookup(&self, signature_type: SignatureType, signature: &B256) -> Option<&SignatureEntry> {
		self.registry.lookup(signature_type, signature)
	}
}

/// Per-call override on top of a base catalog. The override wins.
pub struct LayeredCatalog<'a> {
	overrides: Option<&'a dyn SignatureCatalog>,
	base: &'a dyn SignatureCatalog,
}

impl<'a> LayeredCatalog<'a> {
	pub fn new(overrides: Option<&'a dyn SignatureCatalog>, base: &'a dyn SignatureCatalog) -> Self {
		Self { overrides, base }
	}
}

impl SignatureCatalog for LayeredCatalog<'_> {
	fn lookup(&self, signature_type: SignatureType, signature: &B256) -> Option<&SignatureEntry> {
		self.overrides
			.and_then(|overrides| overrides.lookup(signature_type, signature))
			.or_else(|| self.base.lookup(signature_type, signature))
	}
}
