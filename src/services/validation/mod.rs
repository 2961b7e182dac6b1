//! Action validation.
//!
//! - `context`: chain data and signatures supplied per call
//! - `step`: state machine evaluating one step
//! - `engine`: `validate_action`, `validate_step` and `resolve_claimant`

mod claimant;
mod context;
mod engine;
mod error;
mod session;
mod step;

pub use context::{BlockRange, ValidationContext};
pub use engine::ActionValidationEngine;
pub use error::ValidationError;
pub use step::{ActionStepValidator, StepOutcome, StepState};
