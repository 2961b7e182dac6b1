//! Declarative action validation for boosts.
//!
//! A boost declares which on-chain event or function call qualifies a user,
//! which argument identifies the claimant and which filters must hold. This
//! library re-derives that judgement from chain data.
//!
//! # Module Structure
//!
//! - `models`: Action rules, chain data and configuration
//! - `services`: Signature resolution, filtering, chain access and validation
//! - `utils`: Logging, client storage and test builders

pub mod models;
pub mod services;
pub mod utils;
