//! Blockchain client interfaces and implementations.
//!
//! - [`ChainDataProvider`]: the read operations the validation engine needs
//! - [`EvmClient`]: JSON-RPC implementation for EVM chains
//! - [`ProviderPool`]: providers keyed by chain id
//! - HTTP transport and its error types

mod client;
mod clients;
mod error;
mod pool;
mod transports;

pub use client::{ChainDataProvider, LogQuery};
pub use clients::EvmClient;
pub use error::BlockChainError;
pub use pool::{ClientPool, OfflineProviders, ProviderPool};
pub use transports::{BlockchainTransport, HttpTransportClient, TransportError};
