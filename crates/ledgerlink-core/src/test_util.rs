//! Shared test helpers for `ledgerlink-core` unit tests.
//!
//! Builder functions for raw match records so that tests across modules
//! share a single source of truth for dummy data construction.

use crate::indexer::records::{MatchRecord, MatchValue};
use crate::types::TxHash;

/// Create a deterministic `TxHash` from a single distinguishing byte.
/// Useful where hashes only need to be unique, not realistic.
pub fn tx_hash_from_byte(b: u8) -> TxHash {
    TxHash(format!("{b:02x}").repeat(32))
}

/// Build a minimal match record: one million lovelace, no assets, no datum,
/// no script. Override individual fields after construction when needed.
pub fn make_match(tx_hash: TxHash, output_index: u32) -> MatchRecord {
    MatchRecord {
        transaction_id: tx_hash,
        output_index,
        address: "addr_test1qzexample".to_owned(),
        value: MatchValue {
            coins: 1_000_000,
            assets: Default::default(),
        },
        datum_hash: None,
        datum_type: None,
        script_hash: None,
    }
}

/// Build a match record carrying the given `policy.name`-keyed assets.
pub fn make_match_with_assets(
    tx_hash: TxHash,
    output_index: u32,
    assets: Vec<(String, u64)>,
) -> MatchRecord {
    let mut record = make_match(tx_hash, output_index);
    record.value.assets = assets.into_iter().collect();
    record
}
