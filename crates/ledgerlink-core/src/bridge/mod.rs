//! Ledger-node bridge abstraction.
//!
//! Defines the [`NodeBridge`] trait and provides the one-connection-per-call
//! JSON-RPC implementation ([`NodeBridgeClient`]) plus a test mock
//! (`mock::MockBridge`).

mod client;
#[cfg(test)]
pub mod mock;
mod parsing;
mod protocol;

pub use client::NodeBridgeClient;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{Delegation, ProtocolParameters, TxHash};

/// Minimal trait covering the node-bridge queries the provider core needs.
#[async_trait]
pub trait NodeBridge: Send + Sync {
    /// The current protocol-parameter snapshot.
    async fn protocol_parameters(&self) -> Result<ProtocolParameters, CoreError>;

    /// Delegation state for one reward address. An address the ledger has
    /// no entry for yields [`Delegation::empty`].
    async fn delegation(&self, reward_address: &str) -> Result<Delegation, CoreError>;

    /// Submit a transaction's binary encoding (hex CBOR) and return the
    /// backend-assigned transaction id.
    async fn submit_tx(&self, tx_cbor: &str) -> Result<TxHash, CoreError>;
}
