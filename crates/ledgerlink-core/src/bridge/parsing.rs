//! Decoders for the bridge's ledger-state payloads.
//!
//! The bridge nests monetary amounts under `{ "ada": { "lovelace": .. } }`,
//! expresses execution prices as `"numerator/denominator"` strings, and keys
//! cost models by `plutus:vN` tags; these helpers normalize all of that into
//! the flat domain types. A failure on any field rejects the whole payload;
//! no partial snapshot is ever produced.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::types::{Delegation, PlutusVersion, ProtocolParameters, TxHash};

/// Decode a `queryLedgerState/protocolParameters` result.
pub(crate) fn parse_protocol_parameters(
    raw: &serde_json::Value,
) -> Result<ProtocolParameters, CoreError> {
    Ok(ProtocolParameters {
        min_fee_coefficient: u64_at(raw, "/minFeeCoefficient")?,
        min_fee_constant: u64_at(raw, "/minFeeConstant/ada/lovelace")?,
        max_tx_size: u64_at(raw, "/maxTransactionSize/bytes")?,
        max_value_size: u64_at(raw, "/maxValueSize/bytes")?,
        stake_key_deposit: u64_at(raw, "/stakeCredentialDeposit/ada/lovelace")?,
        pool_deposit: u64_at(raw, "/stakePoolDeposit/ada/lovelace")?,
        coins_per_utxo_byte: u64_at(raw, "/minUtxoDepositCoefficient")?,
        collateral_percentage: u64_at(raw, "/collateralPercentage")?,
        max_collateral_inputs: u64_at(raw, "/maxCollateralInputs")?,
        price_memory: ratio_at(raw, "/scriptExecutionPrices/memory")?,
        price_steps: ratio_at(raw, "/scriptExecutionPrices/cpu")?,
        max_tx_ex_memory: u64_at(raw, "/maxExecutionUnitsPerTransaction/memory")?,
        max_tx_ex_steps: u64_at(raw, "/maxExecutionUnitsPerTransaction/cpu")?,
        cost_models: parse_cost_models(raw.pointer("/plutusCostModels"))?,
    })
}

/// Decode a `queryLedgerState/rewardAccountSummaries` result down to the
/// entry for one reward address. No entry means the address is unknown to
/// the ledger: not delegated, zero rewards.
pub(crate) fn parse_delegation(
    raw: &serde_json::Value,
    reward_address: &str,
) -> Result<Delegation, CoreError> {
    let Some(entry) = raw.get(reward_address) else {
        return Ok(Delegation::empty());
    };

    let pool_id = entry
        .pointer("/delegate/id")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);
    let rewards = entry
        .pointer("/rewards/ada/lovelace")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);

    Ok(Delegation { pool_id, rewards })
}

/// Decode a `submitTransaction` result into the assigned transaction id.
pub(crate) fn parse_submit_result(raw: &serde_json::Value) -> Result<TxHash, CoreError> {
    raw.pointer("/transaction/id")
        .and_then(serde_json::Value::as_str)
        .map(TxHash::from)
        .ok_or_else(|| {
            CoreError::InvalidResponse(format!("submit result carries no transaction id: {raw}"))
        })
}

/// Parse the per-version cost-model map: each `plutus:vN` key is reduced to
/// its version component, uppercased, and re-tagged as a [`PlutusVersion`].
pub(crate) fn parse_cost_models(
    raw: Option<&serde_json::Value>,
) -> Result<BTreeMap<PlutusVersion, Vec<i64>>, CoreError> {
    let Some(raw) = raw else {
        return Ok(BTreeMap::new());
    };
    let object = raw.as_object().ok_or_else(|| {
        CoreError::InvalidResponse(format!("plutusCostModels is not an object: {raw}"))
    })?;

    let mut models = BTreeMap::new();
    for (key, value) in object {
        let Some(version) = PlutusVersion::from_wire_tag(key) else {
            // Newer script generations than this core understands are
            // skipped rather than failing the whole snapshot.
            continue;
        };
        let costs: Vec<i64> = serde_json::from_value(value.clone()).map_err(|e| {
            CoreError::InvalidResponse(format!("cost model for {key} is not an integer array: {e}"))
        })?;
        models.insert(version, costs);
    }
    Ok(models)
}

/// Parse a `"numerator/denominator"` price string into its numeric ratio.
pub(crate) fn parse_ratio(value: &str, field: &str) -> Result<f64, CoreError> {
    let (numerator, denominator) = value.split_once('/').ok_or_else(|| {
        CoreError::InvalidResponse(format!("{field} is not a ratio: `{value}`"))
    })?;

    let numerator: f64 = numerator
        .trim()
        .parse()
        .map_err(|e| CoreError::InvalidResponse(format!("{field} numerator: {e}")))?;
    let denominator: f64 = denominator
        .trim()
        .parse()
        .map_err(|e| CoreError::InvalidResponse(format!("{field} denominator: {e}")))?;
    if denominator == 0.0 {
        return Err(CoreError::InvalidResponse(format!(
            "{field} has zero denominator: `{value}`"
        )));
    }

    Ok(numerator / denominator)
}

fn u64_at(raw: &serde_json::Value, pointer: &str) -> Result<u64, CoreError> {
    raw.pointer(pointer)
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| CoreError::InvalidResponse(format!("missing integer field {pointer}")))
}

fn ratio_at(raw: &serde_json::Value, pointer: &str) -> Result<f64, CoreError> {
    let value = raw
        .pointer(pointer)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| CoreError::InvalidResponse(format!("missing ratio field {pointer}")))?;
    parse_ratio(value, pointer)
}
