//! Validation of a single action step.
//!
//! A step moves through
//! `Pending -> ResolvingSignature -> LocatingEntity -> Extracting -> Evaluating`
//! and ends `Satisfied`, `Unsatisfied` or `Failed`. With several candidates
//! the step cycles between `Extracting` and `Evaluating` until one candidate
//! satisfies the filter.

use alloy::core::dyn_abi::DynSolType;
use tracing::{debug, trace};

use crate::{
	models::{ActionStep, ActionTarget},
	services::{
		blockchain::ProviderPool,
		filter::{extract, helpers::primitive_accepts, DecodedEntity, FilterError, FilterEvaluator},
		signature::{SignatureCatalog, SignatureEntry},
		validation::{error::ValidationError, session::ValidationSession},
	},
	utils::logging::error::ErrorMetadata,
};

/// Lifecycle of one step evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepState {
	Pending,
	ResolvingSignature,
	LocatingEntity,
	Extracting,
	Evaluating,
	Satisfied,
	Unsatisfied,
	Failed,
}

impl StepState {
	pub fn is_terminal(self) -> bool {
		matches!(self, Self::Satisfied | Self::Unsatisfied | Self::Failed)
	}

	/// Whether the transition `self -> next` is allowed.
	pub fn can_advance_to(self, next: StepState) -> bool {
		use StepState::*;

		match (self, next) {
			(Pending, ResolvingSignature)
			| (ResolvingSignature, LocatingEntity)
			| (LocatingEntity, Extracting)
			| (LocatingEntity, Unsatisfied)
			| (Extracting, Extracting)
			| (Extracting, Evaluating)
			| (Extracting, Unsatisfied)
			| (Evaluating, Extracting)
			| (Evaluating, Satisfied)
			| (Evaluating, Unsatisfied) => true,
			(from, Failed) => from != Pending && !from.is_terminal(),
			_ => false,
		}
	}
}

/// Result of a step that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
	Satisfied,
	Unsatisfied,
}

impl StepOutcome {
	pub fn is_satisfied(self) -> bool {
		self == Self::Satisfied
	}
}

/// Types the field at `field_index` takes across the layouts of `entry`.
///
/// Layouts too short for the index are left out; if every layout is too short
/// the index is out of range.
pub(crate) fn field_types(
	entry: &SignatureEntry,
	field_index: usize,
) -> Result<Vec<DynSolType>, FilterError> {
	let types: Vec<_> = entry
		.layouts()
		.iter()
		.filter_map(|layout| layout.extracted_type(field_index))
		.collect();

	if types.is_empty() {
		return Err(FilterError::field_out_of_range(
			format!(
				"field index {} is out of range for a signature with {} arguments",
				field_index,
				entry.max_arity()
			),
			None,
			Some(ErrorMetadata::from([
				("field_index".to_string(), field_index.to_string()),
				("signature".to_string(), entry.selector().to_string()),
			])),
		));
	}

	Ok(types)
}

/// Drives one [`ActionStep`] through its states.
pub struct ActionStepValidator<'a> {
	index: usize,
	step: &'a ActionStep,
	entry: Option<&'a SignatureEntry>,
	state: StepState,
	evaluator: FilterEvaluator,
}

impl<'a> ActionStepValidator<'a> {
	pub fn new(index: usize, step: &'a ActionStep) -> Self {
		Self {
			index,
			step,
			entry: None,
			state: StepState::Pending,
			evaluator: FilterEvaluator::new(),
		}
	}

	pub fn state(&self) -> StepState {
		self.state
	}

	/// Resolves the signature and runs every check that needs no chain data.
	pub fn resolve(&mut self, catalog: &'a dyn SignatureCatalog) -> Result<(), ValidationError> {
		self.advance(StepState::ResolvingSignature);

		if let Err(e) = self.step.validate() {
			return Err(self.fail(e));
		}

		let entry = match catalog.resolve(self.step.signature_type, &self.step.signature) {
			Ok(entry) => entry,
			Err(e) => return Err(self.fail(e)),
		};

		let step = self.step;
		let parameter = &step.action_parameter;
		let types = match field_types(entry, step.field_index()) {
			Ok(types) => types,
			Err(e) => return Err(self.fail(e)),
		};

		if let Some(abi_type) = types
			.iter()
			.find(|abi_type| !primitive_accepts(parameter.field_type, abi_type))
		{
			let error = FilterError::type_mismatch(
				format!(
					"field {} is {} and cannot be compared as {:?}",
					parameter.field_index,
					abi_type.sol_type_name(),
					parameter.field_type
				),
				None,
				None,
			);
			return Err(self.fail(error));
		}

		self.entry = Some(entry);
		Ok(())
	}

	/// Locates the candidates and evaluates the filter on each of them.
	///
	/// The step is satisfied as soon as one candidate passes. Candidates that do
	/// not decode under the resolved layout are skipped.
	pub(crate) async fn run<P: ProviderPool>(
		&mut self,
		session: &mut ValidationSession<'_, P>,
	) -> Result<StepOutcome, ValidationError> {
		let Some(entry) = self.entry else {
			let error = ValidationError::configuration_error(
				format!("step {} was run before its signature was resolved", self.index),
				None,
				None,
			);
			self.state = StepState::Failed;
			return Err(error);
		};

		self.advance(StepState::LocatingEntity);
		let candidates = match session.candidates(self.step).await {
			Ok(candidates) => candidates,
			Err(e) => {
				self.advance(StepState::Failed);
				return Err(e);
			}
		};

		debug!(
			step = self.index,
			candidates = candidates.len(),
			"Located candidates"
		);

		let step = self.step;
		let parameter = &step.action_parameter;
		for (position, entity) in candidates.entities().into_iter().enumerate() {
			self.advance(StepState::Extracting);
			let layout = match entity {
				DecodedEntity::Log(log) => entry.layout_for_topics(log.topics.len()),
				DecodedEntity::Calldata(_) => entry.primary_layout(),
			};

			let value = match extract(entity, layout, step.field_index()) {
				Ok(value) => value,
				Err(e @ FilterError::DecodeError(_)) => {
					debug!(step = self.index, candidate = position, error = %e, "Skipping candidate");
					continue;
				}
				Err(e) => return Err(self.fail(e)),
			};

			self.advance(StepState::Evaluating);
			match self.evaluator.evaluate(
				&value,
				parameter.field_type,
				parameter.filter_type,
				&parameter.filter_data,
			) {
				Ok(true) => {
					debug!(step = self.index, candidate = position, "Candidate satisfies filter");
					self.advance(StepState::Satisfied);
					return Ok(StepOutcome::Satisfied);
				}
				Ok(false) => {
					trace!(step = self.index, candidate = position, "Candidate rejected");
				}
				Err(e) => return Err(self.fail(e)),
			}
		}

		self.advance(StepState::Unsatisfied);
		Ok(StepOutcome::Unsatisfied)
	}

	fn advance(&mut self, next: StepState) {
		debug_assert!(
			self.state.can_advance_to(next),
			"invalid step transition {:?} -> {:?}",
			self.state,
			next
		);
		trace!(step = self.index, from = ?self.state, to = ?next, "Step transition");
		self.state = next;
	}

	fn fail<E>(&mut self, error: E) -> ValidationError
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		self.advance(StepState::Failed);
		ValidationError::configuration_error(
			format!("step {} is misconfigured", self.index),
			Some(Box::new(error)),
			Some(ErrorMetadata::from([
				("step".to_string(), self.index.to_string()),
				("chain_id".to_string(), self.step.chain_id.to_string()),
				("signature".to_string(), self.step.signature.to_string()),
			])),
		)
	}
}
