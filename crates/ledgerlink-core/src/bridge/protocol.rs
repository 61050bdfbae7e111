use crate::error::CoreError;

/// One JSON-RPC request. No `id` field is sent: each request travels on its
/// own connection (see [`super::NodeBridgeClient`]), so there is never more
/// than one response to correlate.
#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) method: &'a str,
    pub(super) params: serde_json::Value,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Decode one response body and unwrap its result.
///
/// An `error` member fails the call with the backend's payload unchanged;
/// otherwise the `result` member (or JSON null) is returned.
pub(super) fn unwrap_response(body: &str) -> Result<serde_json::Value, CoreError> {
    let decoded: JsonRpcResponse = serde_json::from_str(body).map_err(|e| {
        CoreError::InvalidResponse(format!("decode bridge response: {e}; body={body}"))
    })?;

    if let Some(err) = decoded.error {
        return Err(CoreError::Rpc(err));
    }

    Ok(decoded.result.unwrap_or(serde_json::Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_is_unwrapped() {
        let value = unwrap_response(r#"{"jsonrpc":"2.0","result":{"ok":true}}"#)
            .expect("result body must unwrap");
        assert_eq!(value, serde_json::json!({"ok": true}));
    }

    #[test]
    fn error_payload_is_preserved_verbatim() {
        let body = r#"{"jsonrpc":"2.0","error":{"code":3005,"message":"era mismatch","data":{"queryEra":"alonzo"}}}"#;
        let err = unwrap_response(body).expect_err("error body must fail");
        match err {
            CoreError::Rpc(payload) => {
                assert_eq!(payload["code"], 3005);
                assert_eq!(payload["data"]["queryEra"], "alonzo");
            }
            other => panic!("expected Rpc error, got {other:?}"),
        }
    }

    #[test]
    fn missing_result_yields_null() {
        let value = unwrap_response(r#"{"jsonrpc":"2.0"}"#).expect("must unwrap");
        assert!(value.is_null());
    }

    #[test]
    fn malformed_body_is_rejected() {
        let err = unwrap_response("not json").expect_err("must fail");
        assert!(matches!(err, CoreError::InvalidResponse(_)));
    }
}
