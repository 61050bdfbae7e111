//! Match-pattern and query-string construction for indexer calls.
//!
//! Pure functions, separated from the HTTP client so the predicate grammar
//! can be tested without a backend.

use crate::error::CoreError;
use crate::types::{QueryTarget, TxHash, POLICY_ID_HEX_LEN};

/// Separator between policy id and asset name in the indexer's asset keys
/// and match patterns.
pub const UNIT_SEPARATOR: char = '.';

/// Match pattern for an address or credential target. Credential queries use
/// a wildcard suffix to match every address under that credential.
pub fn target_pattern(target: &QueryTarget) -> String {
    match target {
        QueryTarget::Address(address) => address.clone(),
        QueryTarget::PaymentCredential(credential) => format!("{credential}/*"),
    }
}

/// Match pattern selecting every output of one transaction.
pub fn tx_pattern(tx_hash: &TxHash) -> String {
    format!("*@{tx_hash}")
}

/// Split an asset unit into its policy-id and asset-name components.
///
/// The policy id is the fixed-length hex prefix; the remainder is the asset
/// name, which may be empty. Concatenating the two components reproduces the
/// unit.
pub fn split_unit(unit: &str) -> Result<(&str, &str), CoreError> {
    if unit.len() < POLICY_ID_HEX_LEN || !unit.is_ascii() {
        return Err(CoreError::InvalidUnit(unit.to_owned()));
    }
    Ok(unit.split_at(POLICY_ID_HEX_LEN))
}

/// Match pattern for an exact asset unit: `policy.name`, or `policy.*` when
/// the unit carries no asset name.
pub fn unit_pattern(unit: &str) -> Result<String, CoreError> {
    let (policy_id, asset_name) = split_unit(unit)?;
    if asset_name.is_empty() {
        Ok(format!("{policy_id}{UNIT_SEPARATOR}*"))
    } else {
        Ok(format!("{policy_id}{UNIT_SEPARATOR}{asset_name}"))
    }
}

/// Query-string filters narrowing a target query to one asset unit.
pub fn unit_filter_params(unit: &str) -> Result<Vec<(&'static str, String)>, CoreError> {
    let (policy_id, asset_name) = split_unit(unit)?;
    let mut params = vec![("policy_id", policy_id.to_owned())];
    if !asset_name.is_empty() {
        params.push(("asset_name", asset_name.to_owned()));
    }
    Ok(params)
}
