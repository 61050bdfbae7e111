//! Chain-state provider abstraction.
//!
//! Defines the [`StateProvider`] trait (the narrow contract the rest of the
//! system consumes) and its one concrete implementation,
//! [`DualBackendProvider`], which routes each operation to the indexer or
//! the node bridge. Alternate backends can be substituted by implementing
//! the trait without touching callers.

mod connect;
mod dual;

pub use dual::{DualBackendProvider, ProviderConfig};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{
    Delegation, OutputRef, ProtocolParameters, QueryTarget, TxHash, UnspentOutput,
};

/// The provider surface consumed by the rest of the system.
///
/// Implementations are expected to select a backend per operation, handle
/// authentication, and return canonical domain entities. All failures are
/// fatal to the specific call: no retry, no fallback between backends.
#[async_trait]
pub trait StateProvider: Send + Sync {
    /// Current protocol-parameter snapshot.
    async fn protocol_parameters(&self) -> Result<ProtocolParameters, CoreError>;

    /// Unspent outputs of an address or payment credential, optionally
    /// filtered to outputs carrying the given asset unit.
    async fn utxos(
        &self,
        target: &QueryTarget,
        unit_filter: Option<&str>,
    ) -> Result<Vec<UnspentOutput>, CoreError>;

    /// The unique unspent output holding an asset unit. Fails when the unit
    /// is held by zero or by more than one output.
    async fn utxo_by_unit(&self, unit: &str) -> Result<UnspentOutput, CoreError>;

    /// Exactly the outputs named by the given references, normalized. Order
    /// follows the backend's per-transaction listing; duplicates in the
    /// input do not produce duplicate outputs.
    async fn utxos_by_out_ref(
        &self,
        refs: &[OutputRef],
    ) -> Result<Vec<UnspentOutput>, CoreError>;

    /// Delegation state of one reward address.
    async fn delegation(&self, reward_address: &str) -> Result<Delegation, CoreError>;

    /// A datum body by hash.
    async fn datum(&self, datum_hash: &str) -> Result<String, CoreError>;

    /// Wait until a submitted transaction's outputs are visible as unspent.
    /// Resolves `true` on confirmation; runs until cancelled otherwise.
    async fn await_tx(
        &self,
        tx_hash: &TxHash,
        check_interval: Option<Duration>,
    ) -> Result<bool, CoreError>;

    /// Submit a transaction's hex CBOR encoding; returns the assigned id.
    async fn submit_tx(&self, tx_cbor: &str) -> Result<TxHash, CoreError>;
}
