use bitcoin::{Denomination, SignedAmount};
use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// Decode a call result into the wrapper's return type.
pub(super) fn decode_result<T: DeserializeOwned>(
    method: &'static str,
    value: serde_json::Value,
) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| CoreError::InvalidResult {
        method,
        message: e.to_string(),
    })
}

/// Parse a coin amount reported as a JSON number (or numeric string).
///
/// Balances can be negative for accounts that moved funds out, so this
/// yields a [`SignedAmount`].
pub(super) fn parse_signed_amount(
    method: &'static str,
    value: &serde_json::Value,
) -> Result<SignedAmount, CoreError> {
    let invalid = |message: String| CoreError::InvalidResult { method, message };
    match value {
        serde_json::Value::Number(n) => {
            let parsed = n
                .as_f64()
                .ok_or_else(|| invalid(format!("invalid amount `{value}`")))?;
            SignedAmount::from_float_in(parsed, Denomination::Bitcoin)
                .map_err(|e| invalid(format!("invalid amount `{value}`: {e}")))
        }
        serde_json::Value::String(s) => SignedAmount::from_str_in(s, Denomination::Bitcoin)
            .map_err(|e| invalid(format!("invalid amount `{s}`: {e}"))),
        _ => Err(invalid(format!("expected numeric amount, got: {value}"))),
    }
}

/// Drop absent optional arguments from the end of a positional list.
///
/// Interior `null`s stay so that later arguments keep their position.
pub(super) fn trim_trailing_nulls(mut params: Vec<serde_json::Value>) -> Vec<serde_json::Value> {
    while params.last().is_some_and(serde_json::Value::is_null) {
        params.pop();
    }
    params
}
