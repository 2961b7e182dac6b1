//! Field extraction and filter evaluation.
//!
//! - `extractor`: reads one argument out of a log or calldata payload
//! - `evaluator`: compares the argument against a filter operand
//! - `helpers`: address normalization and type compatibility

mod error;
mod evaluator;
mod extractor;
pub mod helpers;

pub use error::FilterError;
pub use evaluator::{evaluate, FilterEvaluator};
pub use extractor::{extract, DecodedEntity};
