use serde::Serialize;

use crate::error::RpcError;

pub(super) const JSONRPC_VERSION: &str = "1.0";

/// Identifier sent with every request. namecoind echoes it back; responses
/// are not matched on it since each call has its own HTTP exchange.
pub(super) const CLIENT_ID: &str = "nmc-core";

#[derive(Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: &'static str,
    pub(super) method: &'a str,
    pub(super) params: &'a [serde_json::Value],
}

impl<'a> JsonRpcRequest<'a> {
    pub(super) fn new(method: &'a str, params: &'a [serde_json::Value]) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: CLIENT_ID,
            method,
            params,
        }
    }
}

/// Unwrap a JSON-RPC response body into its result value.
///
/// The body must be a JSON object. A non-null `error` wins over any `result`
/// and is returned verbatim; an explicit `"result": null` is a success.
pub(super) fn decode_response(body: &str) -> Result<serde_json::Value, RpcError> {
    let decoded: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        RpcError::InvalidResponse(format!("decode JSON-RPC response: {e}; body={body}"))
    })?;
    let serde_json::Value::Object(mut fields) = decoded else {
        return Err(RpcError::InvalidResponse(format!(
            "JSON-RPC response is not an object; body={body}"
        )));
    };

    match fields.remove("error") {
        None | Some(serde_json::Value::Null) => {}
        Some(err) => return Err(RpcError::Server(err)),
    }

    fields.remove("result").ok_or_else(|| {
        RpcError::InvalidResponse(format!("response has neither result nor error; body={body}"))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_envelope_shape() {
        let params = vec![json!("d/rubyists"), json!(5)];
        let encoded = serde_json::to_string(&JsonRpcRequest::new("name_scan", &params))
            .expect("request must serialize");

        let parsed: serde_json::Value =
            serde_json::from_str(&encoded).expect("encoded request must be JSON");
        assert_eq!(
            parsed,
            json!({
                "jsonrpc": "1.0",
                "id": "nmc-core",
                "method": "name_scan",
                "params": ["d/rubyists", 5],
            })
        );

        let round_tripped = parsed["params"].as_array().expect("params must be an array");
        assert_eq!(round_tripped.as_slice(), params.as_slice());
        assert!(round_tripped[0].is_string());
        assert!(round_tripped[1].is_u64());
    }

    #[test]
    fn request_with_no_params_sends_empty_array() {
        let encoded = serde_json::to_value(JsonRpcRequest::new("getblockcount", &[]))
            .expect("request must serialize");
        assert_eq!(encoded["params"], json!([]));
    }

    #[test]
    fn decode_result() {
        let result = decode_response(r#"{"result": 42, "error": null, "id": "nmc-core"}"#)
            .expect("must decode");
        assert_eq!(result, json!(42));
    }

    #[test]
    fn decode_falsy_results_are_success() {
        for body in [
            r#"{"result": null, "error": null}"#,
            r#"{"result": false, "error": null}"#,
            r#"{"result": 0, "error": null}"#,
            r#"{"result": [], "error": null}"#,
            r#"{"result": {}}"#,
        ] {
            assert!(decode_response(body).is_ok(), "body {body} must decode");
        }
    }

    #[test]
    fn decode_error_is_passed_through_verbatim() {
        let err = decode_response(r#"{"result": null, "error": {"code": -1, "message": "bad"}}"#)
            .expect_err("must fail");
        match err {
            RpcError::Server(value) => assert_eq!(value, json!({"code": -1, "message": "bad"})),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_error_wins_over_result() {
        let err = decode_response(r#"{"result": 1, "error": "nope"}"#).expect_err("must fail");
        assert!(matches!(err, RpcError::Server(serde_json::Value::String(s)) if s == "nope"));
    }

    #[test]
    fn decode_missing_result_is_invalid() {
        let err = decode_response(r#"{"id": "nmc-core"}"#).expect_err("must fail");
        assert!(matches!(err, RpcError::InvalidResponse(_)));
    }

    #[test]
    fn decode_non_json_is_invalid() {
        let err = decode_response("<html>oops</html>").expect_err("must fail");
        assert!(matches!(err, RpcError::InvalidResponse(_)));

        let err = decode_response("[1, 2]").expect_err("must fail");
        assert!(matches!(err, RpcError::InvalidResponse(_)));
    }

    #[test]
    fn decode_array_body_is_not_taken_as_positional_fields() {
        for body in ["[42]", "[null, null]", "[1, 2]", "42", "\"ok\"", "null"] {
            let err = decode_response(body).expect_err("non-object body must fail");
            assert!(
                matches!(err, RpcError::InvalidResponse(_)),
                "body {body} must be an invalid response, got {err}"
            );
        }
    }
}
