//! Chain data models.
//!
//! Only EVM chains are supported; the types mirror the JSON-RPC objects
//! returned by `eth_getLogs`, `eth_getTransactionReceipt` and
//! `eth_getTransactionByHash`.

pub mod evm;
