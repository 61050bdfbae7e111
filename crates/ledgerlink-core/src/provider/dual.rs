use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::auth::AuthSession;
use crate::bridge::{NodeBridge, NodeBridgeClient};
use crate::confirm::{ConfirmationPoller, DEFAULT_CHECK_INTERVAL};
use crate::error::CoreError;
use crate::indexer::{Indexer, IndexerClient};
use crate::normalize::normalize;
use crate::types::{
    Delegation, OutputRef, ProtocolParameters, QueryTarget, TxHash, UnspentOutput,
};

use super::connect::{parse_bridge_url, parse_indexer_url};
use super::StateProvider;

/// Connection settings for the two backends.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Indexer base URL (`http://` or `https://`).
    pub indexer_url: String,
    /// Node-bridge URL (`ws://` or `wss://`).
    pub bridge_url: String,
    pub client_id: String,
    pub client_secret: String,
}

/// The one concrete [`StateProvider`]: a pattern-matching indexer for UTXO,
/// datum, and script reads, and a ledger-node bridge for parameters,
/// delegation, and submission.
///
/// Both backends authenticate through one shared [`AuthSession`], so a
/// session cookie earned on any indexer call is presented on every
/// subsequent call to either backend.
pub struct DualBackendProvider {
    indexer: Arc<dyn Indexer>,
    bridge: Arc<dyn NodeBridge>,
}

impl DualBackendProvider {
    /// Validate the configuration and wire up both backend clients.
    pub fn new(config: ProviderConfig) -> Result<Self, CoreError> {
        let indexer_url = parse_indexer_url(&config.indexer_url)?;
        let bridge_url = parse_bridge_url(&config.bridge_url)?;
        let session = Arc::new(AuthSession::new(config.client_id, config.client_secret));

        Ok(Self {
            indexer: Arc::new(IndexerClient::new(indexer_url, Arc::clone(&session))),
            bridge: Arc::new(NodeBridgeClient::new(bridge_url, session)),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_backends(indexer: Arc<dyn Indexer>, bridge: Arc<dyn NodeBridge>) -> Self {
        Self { indexer, bridge }
    }
}

#[async_trait]
impl StateProvider for DualBackendProvider {
    async fn protocol_parameters(&self) -> Result<ProtocolParameters, CoreError> {
        self.bridge.protocol_parameters().await
    }

    async fn utxos(
        &self,
        target: &QueryTarget,
        unit_filter: Option<&str>,
    ) -> Result<Vec<UnspentOutput>, CoreError> {
        let records = self.indexer.utxos_by_target(target, unit_filter).await?;
        normalize(self.indexer.as_ref(), records).await
    }

    async fn utxo_by_unit(&self, unit: &str) -> Result<UnspentOutput, CoreError> {
        let records = self.indexer.utxos_by_unit(unit).await?;
        match records.len() {
            0 => Err(CoreError::UnitNotFound(unit.to_owned())),
            1 => {
                let mut outputs = normalize(self.indexer.as_ref(), records).await?;
                Ok(outputs.pop().expect("normalize preserves record count"))
            }
            count => Err(CoreError::AmbiguousUnit {
                unit: unit.to_owned(),
                count,
            }),
        }
    }

    async fn utxos_by_out_ref(
        &self,
        refs: &[OutputRef],
    ) -> Result<Vec<UnspentOutput>, CoreError> {
        let records = self.indexer.utxos_by_refs(refs).await?;
        normalize(self.indexer.as_ref(), records).await
    }

    async fn delegation(&self, reward_address: &str) -> Result<Delegation, CoreError> {
        self.bridge.delegation(reward_address).await
    }

    async fn datum(&self, datum_hash: &str) -> Result<String, CoreError> {
        self.indexer.datum(datum_hash).await
    }

    async fn await_tx(
        &self,
        tx_hash: &TxHash,
        check_interval: Option<Duration>,
    ) -> Result<bool, CoreError> {
        let poller = ConfirmationPoller::new(check_interval.unwrap_or(DEFAULT_CHECK_INTERVAL));
        poller.wait(self.indexer.as_ref(), tx_hash).await
    }

    async fn submit_tx(&self, tx_cbor: &str) -> Result<TxHash, CoreError> {
        self.bridge.submit_tx(tx_cbor).await
    }
}
