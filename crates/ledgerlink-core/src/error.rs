//! Error type shared across the provider core.
//!
//! Transport failures are propagated as-is (no retry or backend fallback
//! happens at this layer); domain failures carry enough context to name the
//! missing or offending entity.

/// Unified error for every provider operation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// HTTP transport failure talking to the indexer. Not retried here.
    #[error("indexer transport failure: {0}")]
    Http(#[from] reqwest::Error),

    /// WebSocket transport failure talking to the node bridge. Not retried
    /// here.
    #[error("bridge transport failure: {0}")]
    Ws(#[from] tokio_tungstenite::tungstenite::Error),

    /// The node bridge answered with a JSON-RPC error. The payload is the
    /// backend's error object, unchanged.
    #[error("bridge RPC error: {0}")]
    Rpc(serde_json::Value),

    /// The indexer holds no datum body for the requested hash.
    #[error("datum not found: {0}")]
    DatumNotFound(String),

    /// An exact-unit lookup matched nothing.
    #[error("no unspent output holds unit {0}")]
    UnitNotFound(String),

    /// An exact-unit lookup matched more than one output. The single-holder
    /// assumption is part of the operation's contract, so this is a caller
    /// error rather than a transient failure.
    #[error("unit {unit} is held by {count} outputs, expected exactly one")]
    AmbiguousUnit { unit: String, count: usize },

    /// A unit string that cannot be split into policy id and asset name.
    #[error("invalid asset unit `{0}`: expected at least a {policy_len}-char hex policy id", policy_len = crate::types::POLICY_ID_HEX_LEN)]
    InvalidUnit(String),

    /// A backend message failed to decode. No partial or default values are
    /// substituted.
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    /// Construction-time configuration problem (bad URL, bad credentials).
    #[error("invalid configuration: {0}")]
    Config(String),
}
