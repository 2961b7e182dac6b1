//! Core services implementing the business logic.
//!
//! This module contains the main service implementations:
//! - `blockchain`: Chain data provider interface and JSON-RPC client
//! - `filter`: Field extraction and filter evaluation
//! - `signature`: Signature catalog and argument layouts
//! - `validation`: Step evaluation, claimant resolution and the engine

pub mod blockchain;
pub mod filter;
pub mod signature;
pub mod validation;
