use std::sync::Arc;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, trace};

use crate::auth::AuthSession;
use crate::error::CoreError;
use crate::types::{Delegation, ProtocolParameters, TxHash};

use super::parsing::{parse_delegation, parse_protocol_parameters, parse_submit_result};
use super::protocol::{unwrap_response, JsonRpcRequest};
use super::NodeBridge;

/// Ledger-node bridge client: one JSON-RPC request per connection.
///
/// Each call opens a dedicated WebSocket connection, authenticates with the
/// current [`AuthSession`] headers, sends exactly one request, resolves on
/// the first data frame, and drops the connection. Connections are never
/// reused or shared, so at most one request is ever outstanding on a given
/// connection; that invariant is what lets the protocol layer skip
/// request-id correlation entirely. No timeout is enforced here.
pub struct NodeBridgeClient {
    url: String,
    session: Arc<AuthSession>,
}

impl NodeBridgeClient {
    /// Create a client for a validated `ws://` or `wss://` URL.
    pub(crate) fn new(url: String, session: Arc<AuthSession>) -> Self {
        Self { url, session }
    }

    /// Open a connection, perform one request/response exchange, close.
    async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, CoreError> {
        debug!(bridge.method = method, "bridge call");

        let mut request = self.url.as_str().into_client_request()?;
        let headers = request.headers_mut();
        for (name, value) in self.session.headers() {
            let name = HeaderName::from_static(name);
            let value = HeaderValue::from_str(&value)
                .map_err(|e| CoreError::Config(format!("invalid auth header value: {e}")))?;
            headers.insert(name, value);
        }

        let (stream, _response) = connect_async(request).await?;
        let (mut sink, mut source) = stream.split();

        let envelope = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
        };
        let body = serde_json::to_string(&envelope)
            .map_err(|e| CoreError::Config(format!("encode bridge request: {e}")))?;
        sink.send(Message::Text(body)).await?;

        while let Some(frame) = source.next().await {
            match frame? {
                Message::Text(text) => {
                    trace!(bridge.method = method, body = %text, "bridge response body");
                    return unwrap_response(&text);
                }
                Message::Binary(bytes) => {
                    let text = String::from_utf8(bytes).map_err(|e| {
                        CoreError::InvalidResponse(format!("non-UTF-8 bridge frame: {e}"))
                    })?;
                    trace!(bridge.method = method, body = %text, "bridge response body");
                    return unwrap_response(&text);
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
                Message::Close(_) => break,
            }
        }

        Err(CoreError::InvalidResponse(format!(
            "bridge closed the connection before answering {method}"
        )))
    }
}

#[async_trait]
impl NodeBridge for NodeBridgeClient {
    async fn protocol_parameters(&self) -> Result<ProtocolParameters, CoreError> {
        let raw = self
            .call("queryLedgerState/protocolParameters", serde_json::json!({}))
            .await?;
        parse_protocol_parameters(&raw)
    }

    async fn delegation(&self, reward_address: &str) -> Result<Delegation, CoreError> {
        let raw = self
            .call(
                "queryLedgerState/rewardAccountSummaries",
                serde_json::json!({ "keys": [reward_address] }),
            )
            .await?;
        parse_delegation(&raw, reward_address)
    }

    async fn submit_tx(&self, tx_cbor: &str) -> Result<TxHash, CoreError> {
        let raw = self
            .call(
                "submitTransaction",
                serde_json::json!({ "transaction": { "cbor": tx_cbor } }),
            )
            .await?;
        parse_submit_result(&raw)
    }
}
