use reqwest::Url;

use crate::error::CoreError;

/// Validate the indexer base URL: HTTP(S) only, trailing slash trimmed so
/// paths can be appended verbatim.
pub(super) fn parse_indexer_url(raw: &str) -> Result<String, CoreError> {
    parse_with_schemes(raw, &["http", "https"])
}

/// Validate the node-bridge URL: WebSocket schemes only.
pub(super) fn parse_bridge_url(raw: &str) -> Result<String, CoreError> {
    parse_with_schemes(raw, &["ws", "wss"])
}

fn parse_with_schemes(raw: &str, schemes: &[&str]) -> Result<String, CoreError> {
    let parsed = Url::parse(raw)
        .map_err(|e| CoreError::Config(format!("invalid URL `{raw}`: {e}")))?;
    if !schemes.contains(&parsed.scheme()) {
        return Err(CoreError::Config(format!(
            "unsupported scheme `{}` in `{raw}`; expected one of {schemes:?}",
            parsed.scheme()
        )));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}
