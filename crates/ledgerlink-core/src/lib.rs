//! Core domain logic for Ledgerlink: one chain-state interface over two
//! heterogeneous backends, a pattern-matching UTXO indexer reached over
//! HTTP and a ledger-node bridge reached over per-call JSON-RPC.

pub mod auth;
pub mod bridge;
pub mod confirm;
pub mod error;
pub mod indexer;
pub mod normalize;
pub mod provider;
pub mod script;
#[cfg(test)]
pub(crate) mod test_util;
pub mod types;

pub use error::CoreError;
pub use provider::{DualBackendProvider, ProviderConfig, StateProvider};
