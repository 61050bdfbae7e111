//! Pattern-matching chain-indexer abstraction.
//!
//! Defines the [`Indexer`] trait and provides the HTTP implementation
//! ([`IndexerClient`]) plus a test mock (`mock::MockIndexer`). Queries are
//! expressed as match patterns (address, credential wildcard, asset unit,
//! transaction hash) and always restricted to unspent outputs.

mod client;
#[cfg(test)]
pub mod mock;
pub mod query;
pub mod records;

pub use client::IndexerClient;
pub use records::{DatumType, MatchRecord, MatchValue, ScriptBody, ScriptLanguage};

use std::collections::HashSet;

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::debug;

use crate::error::CoreError;
use crate::types::{OutputRef, QueryTarget, TxHash};

/// Minimal trait covering the indexer queries the provider core needs.
///
/// Implementations are expected to handle authentication, session upkeep,
/// and response deserialization internally.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Unspent matches for an address or payment credential, optionally
    /// filtered to outputs carrying the given asset unit.
    async fn utxos_by_target(
        &self,
        target: &QueryTarget,
        unit_filter: Option<&str>,
    ) -> Result<Vec<MatchRecord>, CoreError>;

    /// Unspent matches holding an exact asset unit. Returns every match;
    /// the single-holder contract is enforced by the caller.
    async fn utxos_by_unit(&self, unit: &str) -> Result<Vec<MatchRecord>, CoreError>;

    /// All unspent outputs produced by one transaction. Also reused for
    /// confirmation polling.
    async fn utxos_by_tx(&self, tx_hash: &TxHash) -> Result<Vec<MatchRecord>, CoreError>;

    /// Exactly the match records named by the given output references.
    ///
    /// The indexer is queried by transaction hash only, so this is a
    /// two-phase fetch-then-filter: one `utxos_by_tx` query per unique hash
    /// (issued concurrently), then a cut down to the requested
    /// (hash, index) pairs. Duplicate references do not produce duplicate
    /// records.
    async fn utxos_by_refs(&self, refs: &[OutputRef]) -> Result<Vec<MatchRecord>, CoreError> {
        if refs.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen: HashSet<&TxHash> = HashSet::new();
        let mut unique_hashes: Vec<&TxHash> = Vec::new();
        for out_ref in refs {
            if seen.insert(&out_ref.tx_hash) {
                unique_hashes.push(&out_ref.tx_hash);
            }
        }
        debug!(
            requested = refs.len(),
            unique_txs = unique_hashes.len(),
            "resolving outputs by reference"
        );

        let queries: Vec<_> = unique_hashes
            .into_iter()
            .map(|tx_hash| self.utxos_by_tx(tx_hash))
            .collect();
        let batches = try_join_all(queries).await?;

        let wanted: HashSet<(&TxHash, u32)> = refs
            .iter()
            .map(|out_ref| (&out_ref.tx_hash, out_ref.output_index))
            .collect();
        Ok(batches
            .into_iter()
            .flatten()
            .filter(|record| wanted.contains(&(&record.transaction_id, record.output_index)))
            .collect())
    }

    /// A datum body by hash. Fails with [`CoreError::DatumNotFound`] when
    /// the indexer holds no body for the hash.
    async fn datum(&self, datum_hash: &str) -> Result<String, CoreError>;

    /// A script body and its language tag by script hash. Used only during
    /// normalization.
    async fn script(&self, script_hash: &str) -> Result<ScriptBody, CoreError>;
}
