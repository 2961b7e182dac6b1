//! Utility modules for common functionality.
//!
//! - client_storage: Thread-safe cache of chain data clients
//! - logging: Logging setup and the shared error context
//! - tests: Test builders

pub mod client_storage;
pub mod logging;

pub use client_storage::ClientStorage;
