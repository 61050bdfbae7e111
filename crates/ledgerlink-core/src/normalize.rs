//! Normalization of raw indexer match records into canonical
//! [`UnspentOutput`] entities.
//!
//! Records are processed concurrently; output order always matches input
//! order. Inline datum bodies and reference scripts are resolved through
//! secondary indexer calls, and versioned script bodies are re-encoded into
//! their canonical wire form. Script bodies are re-fetched on every call;
//! there is no cache keyed by script hash.

use futures::future::try_join_all;

use crate::error::CoreError;
use crate::indexer::{DatumType, Indexer, MatchRecord, MatchValue, ScriptLanguage};
use crate::script::canonical_script_body;
use crate::types::{AssetMap, DatumAttachment, ScriptRef, UnspentOutput, LOVELACE};

/// Normalize a batch of match records, concurrently, preserving order.
pub async fn normalize(
    indexer: &dyn Indexer,
    records: Vec<MatchRecord>,
) -> Result<Vec<UnspentOutput>, CoreError> {
    let futures: Vec<_> = records
        .into_iter()
        .map(|record| normalize_record(indexer, record))
        .collect();
    try_join_all(futures).await
}

async fn normalize_record(
    indexer: &dyn Indexer,
    record: MatchRecord,
) -> Result<UnspentOutput, CoreError> {
    let assets = build_assets(&record.value);

    let datum = match (record.datum_type, record.datum_hash) {
        (Some(DatumType::Hash), Some(hash)) => DatumAttachment::Hash(hash),
        (Some(DatumType::Inline), Some(hash)) => {
            DatumAttachment::Inline(indexer.datum(&hash).await?)
        }
        (None, _) => DatumAttachment::None,
        (Some(_), None) => {
            return Err(CoreError::InvalidResponse(format!(
                "match {}#{} declares a datum type but no datum hash",
                record.transaction_id, record.output_index
            )));
        }
    };

    let script_ref = match &record.script_hash {
        Some(hash) => Some(resolve_script(indexer, hash).await?),
        None => None,
    };

    Ok(UnspentOutput {
        tx_hash: record.transaction_id,
        output_index: record.output_index,
        address: record.address,
        assets,
        datum,
        script_ref,
    })
}

/// Build the canonical asset map: native coins under the `lovelace` key,
/// every listed asset under its policy-id + asset-name unit with the
/// separator removed.
fn build_assets(value: &MatchValue) -> AssetMap {
    let mut assets = AssetMap::new();
    assets.insert(LOVELACE.to_owned(), value.coins);
    for (key, quantity) in &value.assets {
        assets.insert(key.replace('.', ""), *quantity);
    }
    assets
}

async fn resolve_script(indexer: &dyn Indexer, script_hash: &str) -> Result<ScriptRef, CoreError> {
    let body = indexer.script(script_hash).await?;
    match body.language {
        ScriptLanguage::Native => Ok(ScriptRef::Native(body.script)),
        ScriptLanguage::PlutusV1 => Ok(ScriptRef::PlutusV1(canonical_script_body(&body.script)?)),
        ScriptLanguage::PlutusV2 => Ok(ScriptRef::PlutusV2(canonical_script_body(&body.script)?)),
    }
}
