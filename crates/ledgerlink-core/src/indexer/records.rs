//! Raw wire records returned by the indexer.
//!
//! These mirror the indexer's JSON shapes and are normalized into the
//! canonical domain types by `crate::normalize`; nothing outside this crate
//! should see them except through the [`Indexer`](super::Indexer) trait.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::TxHash;

/// One raw match record from a `/matches` query.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRecord {
    pub transaction_id: TxHash,
    pub output_index: u32,
    pub address: String,
    pub value: MatchValue,
    /// Hash of the attached datum, set for both referenced and inline
    /// datums.
    #[serde(default)]
    pub datum_hash: Option<String>,
    /// How the datum is attached: `hash` or `inline`. Absent when the
    /// output carries no datum.
    #[serde(default)]
    pub datum_type: Option<DatumType>,
    #[serde(default)]
    pub script_hash: Option<String>,
}

/// Attachment mode of a match record's datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatumType {
    Hash,
    Inline,
}

/// Value breakdown of a match record: native coins plus listed assets keyed
/// by `policy_id.asset_name`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchValue {
    pub coins: u64,
    #[serde(default)]
    pub assets: BTreeMap<String, u64>,
}

/// A script body and its language tag, from `/scripts/{hash}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptBody {
    pub script: String,
    pub language: ScriptLanguage,
}

/// Script language tag as reported by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ScriptLanguage {
    #[serde(rename = "native")]
    Native,
    #[serde(rename = "plutus:v1")]
    PlutusV1,
    #[serde(rename = "plutus:v2")]
    PlutusV2,
}
