//! Domain types for the canonical chain-state model.
//!
//! Contains the canonical unspent-output entity (`UnspentOutput`,
//! `DatumAttachment`, `ScriptRef`), the protocol-parameter snapshot
//! (`ProtocolParameters`, `PlutusVersion`), delegation state (`Delegation`),
//! and the query predicate shapes (`QueryTarget`, `OutputRef`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Asset-map key for the native currency. Always present in an `AssetMap`.
pub const LOVELACE: &str = "lovelace";

/// Length in hex characters of a minting-policy id (28 bytes).
pub const POLICY_ID_HEX_LEN: usize = 56;

// ==============================================================================
// Transaction Hash and Output Reference
// ==============================================================================

/// A hex-encoded transaction id, wrapped for type safety.
///
/// `#[serde(transparent)]` keeps the JSON representation a bare string, so
/// this newtype is wire-compatible with the backends' `transaction_id`
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl From<&str> for TxHash {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A reference to one output of one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputRef {
    pub tx_hash: TxHash,
    pub output_index: u32,
}

impl OutputRef {
    pub fn new(tx_hash: impl Into<TxHash>, output_index: u32) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            output_index,
        }
    }
}

impl std::fmt::Display for OutputRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.tx_hash, self.output_index)
    }
}

// ==============================================================================
// Query Predicates
// ==============================================================================

/// The two predicate shapes accepted by UTXO queries: a literal address, or
/// a payment-credential hash matching every address under that credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    Address(String),
    PaymentCredential(String),
}

// ==============================================================================
// Canonical Unspent Output
// ==============================================================================

/// Mapping from asset unit (the native currency marker, or policy id and
/// asset name hex concatenated with no separator) to quantity.
pub type AssetMap = BTreeMap<String, u64>;

/// Datum carried by an output: referenced by hash, embedded inline, or
/// absent. At most one form is ever populated, which this enum encodes
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatumAttachment {
    None,
    /// The datum's hash; the body lives elsewhere.
    Hash(String),
    /// The datum body itself, hex-encoded.
    Inline(String),
}

impl DatumAttachment {
    /// The datum hash, when the output references one.
    pub fn hash(&self) -> Option<&str> {
        match self {
            Self::Hash(h) => Some(h),
            _ => None,
        }
    }

    /// The inline datum body, when the output embeds one.
    pub fn inline(&self) -> Option<&str> {
        match self {
            Self::Inline(d) => Some(d),
            _ => None,
        }
    }
}

/// A reference script attached to an output, tagged by script language and
/// carrying the canonical hex-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "language", content = "script")]
pub enum ScriptRef {
    #[serde(rename = "native")]
    Native(String),
    #[serde(rename = "plutus:v1")]
    PlutusV1(String),
    #[serde(rename = "plutus:v2")]
    PlutusV2(String),
}

/// The canonical unspent-output entity returned by every UTXO operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    pub tx_hash: TxHash,
    pub output_index: u32,
    pub address: String,
    pub assets: AssetMap,
    pub datum: DatumAttachment,
    pub script_ref: Option<ScriptRef>,
}

impl UnspentOutput {
    pub fn out_ref(&self) -> OutputRef {
        OutputRef {
            tx_hash: self.tx_hash.clone(),
            output_index: self.output_index,
        }
    }

    /// Native-currency quantity. The normalizer always populates this entry.
    pub fn lovelace(&self) -> u64 {
        self.assets.get(LOVELACE).copied().unwrap_or(0)
    }
}

// ==============================================================================
// Protocol Parameters
// ==============================================================================

/// On-chain script language generation, used to key per-version cost models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlutusVersion {
    #[serde(rename = "PlutusV1")]
    V1,
    #[serde(rename = "PlutusV2")]
    V2,
}

impl PlutusVersion {
    /// Parse the backends' wire tag (`plutus:v1` / `plutus:v2`).
    pub fn from_wire_tag(tag: &str) -> Option<Self> {
        let version = tag.strip_prefix("plutus:")?;
        match version.to_ascii_uppercase().as_str() {
            "V1" => Some(Self::V1),
            "V2" => Some(Self::V2),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlutusVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "PlutusV1"),
            Self::V2 => write!(f, "PlutusV2"),
        }
    }
}

/// Immutable snapshot of ledger-wide economic and size constants.
///
/// Refreshed on demand, never partially updated: a decode failure on any
/// field rejects the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolParameters {
    /// Per-byte fee coefficient.
    pub min_fee_coefficient: u64,
    /// Flat fee constant, in lovelace.
    pub min_fee_constant: u64,
    pub max_tx_size: u64,
    pub max_value_size: u64,
    pub stake_key_deposit: u64,
    pub pool_deposit: u64,
    pub coins_per_utxo_byte: u64,
    pub collateral_percentage: u64,
    pub max_collateral_inputs: u64,
    /// Execution price per memory unit.
    pub price_memory: f64,
    /// Execution price per cpu step.
    pub price_steps: f64,
    pub max_tx_ex_memory: u64,
    pub max_tx_ex_steps: u64,
    pub cost_models: BTreeMap<PlutusVersion, Vec<i64>>,
}

// ==============================================================================
// Delegation
// ==============================================================================

/// Delegation state of one reward address: the pool it delegates to (`None`
/// when not delegated) and the accumulated reward balance in lovelace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub pool_id: Option<String>,
    pub rewards: u64,
}

impl Delegation {
    /// The state of an address the ledger has no entry for.
    pub fn empty() -> Self {
        Self {
            pool_id: None,
            rewards: 0,
        }
    }
}
