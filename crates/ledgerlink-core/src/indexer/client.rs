use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::auth::AuthSession;
use crate::error::CoreError;
use crate::types::{QueryTarget, TxHash};

use super::query::{target_pattern, tx_pattern, unit_filter_params, unit_pattern};
use super::records::{MatchRecord, ScriptBody};
use super::Indexer;

/// Pattern-matching indexer client over HTTP(S).
///
/// Every request attaches the [`AuthSession`]'s current header set and feeds
/// response headers back into it, so the credential-to-cookie upgrade
/// happens transparently on whichever call first triggers it. No timeout is
/// enforced here; callers needing bounded latency must impose one
/// externally.
pub struct IndexerClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<AuthSession>,
}

impl IndexerClient {
    /// Create a client for a validated `http://` or `https://` base URL.
    pub(crate) fn new(base_url: String, session: Arc<AuthSession>) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .expect("reqwest client builder uses valid static config");

        Self {
            client,
            base_url,
            session,
        }
    }

    /// Issue one authenticated GET and decode the JSON body.
    async fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value, CoreError> {
        let url = format!("{}{path_and_query}", self.base_url);
        debug!(indexer.path = %path_and_query, "indexer query");

        let mut builder = self.client.get(&url);
        for (name, value) in self.session.headers() {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;
        self.session.absorb(response.headers());
        let status = response.status();

        let body = response.text().await?;
        debug!(indexer.path = %path_and_query, %status, body_len = body.len(), "indexer response");
        trace!(indexer.path = %path_and_query, body = %body, "indexer response body");

        serde_json::from_str(&body).map_err(|e| {
            CoreError::InvalidResponse(format!("decode indexer response: {e}; body={body}"))
        })
    }

    async fn matches(&self, path_and_query: &str) -> Result<Vec<MatchRecord>, CoreError> {
        let raw = self.get_json(path_and_query).await?;
        serde_json::from_value(raw)
            .map_err(|e| CoreError::InvalidResponse(format!("decode match records: {e}")))
    }
}

#[async_trait]
impl Indexer for IndexerClient {
    async fn utxos_by_target(
        &self,
        target: &QueryTarget,
        unit_filter: Option<&str>,
    ) -> Result<Vec<MatchRecord>, CoreError> {
        let mut path = format!("/matches/{}?unspent", target_pattern(target));
        if let Some(unit) = unit_filter {
            for (name, value) in unit_filter_params(unit)? {
                path.push_str(&format!("&{name}={value}"));
            }
        }
        self.matches(&path).await
    }

    async fn utxos_by_unit(&self, unit: &str) -> Result<Vec<MatchRecord>, CoreError> {
        let path = format!("/matches/{}?unspent", unit_pattern(unit)?);
        self.matches(&path).await
    }

    async fn utxos_by_tx(&self, tx_hash: &TxHash) -> Result<Vec<MatchRecord>, CoreError> {
        let path = format!("/matches/{}?unspent", tx_pattern(tx_hash));
        self.matches(&path).await
    }

    async fn datum(&self, datum_hash: &str) -> Result<String, CoreError> {
        let raw = self.get_json(&format!("/datums/{datum_hash}")).await?;
        raw.get("datum")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| CoreError::DatumNotFound(datum_hash.to_owned()))
    }

    async fn script(&self, script_hash: &str) -> Result<ScriptBody, CoreError> {
        let raw = self.get_json(&format!("/scripts/{script_hash}")).await?;
        serde_json::from_value(raw).map_err(|e| {
            CoreError::InvalidResponse(format!("decode script {script_hash}: {e}"))
        })
    }
}
