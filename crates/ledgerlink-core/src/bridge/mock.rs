use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{Delegation, ProtocolParameters, TxHash};

use super::NodeBridge;

/// A mock node-bridge backend for testing. Returns canned values populated
/// via the builder pattern; `submit_tx` echoes a fixed transaction id or a
/// canned RPC error payload.
pub struct MockBridge {
    parameters: Option<ProtocolParameters>,
    delegations: HashMap<String, Delegation>,
    submit_result: Result<TxHash, serde_json::Value>,
}

impl MockBridge {
    pub fn builder() -> MockBridgeBuilder {
        MockBridgeBuilder {
            parameters: None,
            delegations: HashMap::new(),
            submit_result: Ok(TxHash::from("00".repeat(32).as_str())),
        }
    }
}

pub struct MockBridgeBuilder {
    parameters: Option<ProtocolParameters>,
    delegations: HashMap<String, Delegation>,
    submit_result: Result<TxHash, serde_json::Value>,
}

impl MockBridgeBuilder {
    pub fn with_parameters(mut self, parameters: ProtocolParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_delegation(mut self, reward_address: &str, delegation: Delegation) -> Self {
        self.delegations.insert(reward_address.to_owned(), delegation);
        self
    }

    pub fn with_submit_id(mut self, tx_hash: TxHash) -> Self {
        self.submit_result = Ok(tx_hash);
        self
    }

    pub fn with_submit_error(mut self, payload: serde_json::Value) -> Self {
        self.submit_result = Err(payload);
        self
    }

    pub fn build(self) -> MockBridge {
        MockBridge {
            parameters: self.parameters,
            delegations: self.delegations,
            submit_result: self.submit_result,
        }
    }
}

#[async_trait]
impl NodeBridge for MockBridge {
    async fn protocol_parameters(&self) -> Result<ProtocolParameters, CoreError> {
        self.parameters.clone().ok_or_else(|| {
            CoreError::InvalidResponse("mock has no protocol parameters".to_owned())
        })
    }

    async fn delegation(&self, reward_address: &str) -> Result<Delegation, CoreError> {
        Ok(self
            .delegations
            .get(reward_address)
            .cloned()
            .unwrap_or_else(Delegation::empty))
    }

    async fn submit_tx(&self, _tx_cbor: &str) -> Result<TxHash, CoreError> {
        match &self.submit_result {
            Ok(tx_hash) => Ok(tx_hash.clone()),
            Err(payload) => Err(CoreError::Rpc(payload.clone())),
        }
    }
}
