//! Canonical re-encoding of on-chain script bodies.
//!
//! The indexer serves versioned-script bodies in whatever encoding it
//! ingested them with. The rest of the system expects the canonical wire
//! form: the raw script bytes wrapped in a CBOR byte string. This module is
//! the narrow boundary to that encoding concern; nothing else in the crate
//! touches CBOR.

use crate::error::CoreError;

/// Re-encode a hex script body into its canonical wire form.
///
/// The body is hex-decoded, wrapped as a CBOR byte string, re-serialized,
/// and hex-encoded again. Any backend-specific encoding quirk disappears in
/// the round trip.
pub fn canonical_script_body(script_hex: &str) -> Result<String, CoreError> {
    let raw = hex::decode(script_hex)
        .map_err(|e| CoreError::InvalidResponse(format!("invalid script body hex: {e}")))?;

    let mut wrapped = Vec::with_capacity(raw.len() + 9);
    minicbor::Encoder::new(&mut wrapped)
        .bytes(&raw)
        .map_err(|e| CoreError::InvalidResponse(format!("re-encode script body: {e}")))?;

    Ok(hex::encode(wrapped))
}
