//! Top-level validation entry points.

use alloy::primitives::Address;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
	models::{ActionStep, ConfigLoader, EventActionPayload},
	services::{
		blockchain::ProviderPool,
		signature::{static_catalog, LayeredCatalog, SignatureCatalog},
		validation::{
			claimant,
			context::ValidationContext,
			error::ValidationError,
			session::ValidationSession,
			step::{ActionStepValidator, StepOutcome},
		},
	},
};

/// Validates action payloads against chain data.
///
/// The engine holds no per-call state, so one instance can serve concurrent
/// validations. Each call builds its own session, which caches the chain data
/// fetched for that call only.
pub struct ActionValidationEngine<P: ProviderPool> {
	providers: Arc<P>,
	catalog: &'static dyn SignatureCatalog,
}

impl<P: ProviderPool> ActionValidationEngine<P> {
	/// Creates an engine resolving signatures against the built-in manifest.
	pub fn new(providers: Arc<P>) -> Self {
		Self::with_catalog(providers, static_catalog())
	}

	/// Creates an engine with a different base catalog. Signatures supplied in
	/// the validation context still take precedence.
	pub fn with_catalog(providers: Arc<P>, catalog: &'static dyn SignatureCatalog) -> Self {
		Self { providers, catalog }
	}

	fn catalog<'a>(&'a self, context: &'a ValidationContext) -> LayeredCatalog<'a> {
		LayeredCatalog::new(
			context
				.known_signatures
				.as_ref()
				.map(|known| known as &dyn SignatureCatalog),
			self.catalog,
		)
	}

	/// Returns whether every step of `payload` is satisfied in `context`.
	///
	/// All static checks run before the first fetch. Steps then run in order
	/// and the first unsatisfied step ends the call. A payload without steps is
	/// satisfied.
	#[instrument(skip_all, fields(steps = payload.action_steps.len(), chain_id = ?context.chain_id))]
	pub async fn validate_action(
		&self,
		payload: &EventActionPayload,
		context: &ValidationContext,
	) -> Result<bool, ValidationError> {
		payload.validate()?;

		let catalog = self.catalog(context);
		let mut validators = payload
			.action_steps
			.iter()
			.enumerate()
			.map(|(index, step)| ActionStepValidator::new(index, step))
			.collect::<Vec<_>>();

		for validator in validators.iter_mut() {
			validator.resolve(&catalog)?;
		}

		let mut session = ValidationSession::new(context, self.providers.as_ref());
		for (index, validator) in validators.iter_mut().enumerate() {
			if validator.run(&mut session).await? == StepOutcome::Unsatisfied {
				info!(step = index, "Action not satisfied");
				return Ok(false);
			}
		}

		info!("Action satisfied");
		Ok(true)
	}

	/// Evaluates a single step in `context`.
	#[instrument(skip_all, fields(chain_id = step.chain_id, signature = %step.signature))]
	pub async fn validate_step(
		&self,
		step: &ActionStep,
		context: &ValidationContext,
	) -> Result<StepOutcome, ValidationError> {
		let catalog = self.catalog(context);
		let mut validator = ActionStepValidator::new(0, step);
		validator.resolve(&catalog)?;

		let mut session = ValidationSession::new(context, self.providers.as_ref());
		validator.run(&mut session).await
	}

	/// Returns the address credited with the action of `payload`.
	///
	/// Independent of [`validate_action`](Self::validate_action): only the
	/// claimant rule is read.
	#[instrument(skip_all, fields(chain_id = payload.action_claimant.chain_id))]
	pub async fn resolve_claimant(
		&self,
		payload: &EventActionPayload,
		context: &ValidationContext,
	) -> Result<Address, ValidationError> {
		let catalog = self.catalog(context);
		let mut session = ValidationSession::new(context, self.providers.as_ref());
		let address =
			claimant::resolve_claimant(&payload.action_claimant, &catalog, &mut session).await?;
		info!(claimant = %address, "Claimant resolved");
		Ok(address)
	}
}
