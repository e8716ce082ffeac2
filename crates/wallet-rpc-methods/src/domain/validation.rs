//! Request validation for `wallet_switchEthereumChain`.
//!
//! Pure: no collaborator is touched until these checks pass.

use crate::domain::chain_id::{ChainId, ChainIdError};
use crate::domain::error::{ApiError, ApiResult};
use serde_json::Value;

/// The only key accepted on the parameter object
pub const CHAIN_ID_KEY: &str = "chainId";

/// Echoed in messages for an absent value
const ABSENT: &str = "undefined";

/// Validated parameters of a chain switch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchChainParams {
    pub chain_id: ChainId,
    /// `chainId` exactly as the requester sent it
    pub raw_chain_id: String,
}

/// Validate the raw params of a chain switch request and extract the chain id.
///
/// Expects `[{ "chainId": "0x..." }]`. Any failure is `-32602` with a message
/// that echoes what was received.
pub fn validate_switch_chain_params(
    params: Option<&Value>,
    max_safe: u64,
) -> ApiResult<SwitchChainParams> {
    let param = params
        .and_then(Value::as_array)
        .and_then(|p| p.first())
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ApiError::invalid_params(format!(
                "Expected single, object parameter. Received:\n{}",
                display_json(params)
            ))
        })?;

    let other_keys: Vec<&str> = param
        .keys()
        .map(String::as_str)
        .filter(|k| *k != CHAIN_ID_KEY)
        .collect();
    if !other_keys.is_empty() {
        return Err(ApiError::invalid_params(format!(
            "Received unexpected keys on object parameter. Unsupported keys:\n{}",
            other_keys.join(",")
        )));
    }

    let raw = param.get(CHAIN_ID_KEY);
    let Some(chain_id) = raw.and_then(Value::as_str) else {
        return Err(malformed(&display_received(raw)));
    };

    let parsed = ChainId::parse_with_max(chain_id, max_safe).map_err(|e| match e {
        ChainIdError::Malformed(_) => malformed(chain_id),
        ChainIdError::Unsafe { chain_id: lowered, .. } => ApiError::invalid_params(format!(
            "Invalid chain ID \"{}\": numerical value greater than max safe value. Received:\n{}",
            lowered, chain_id
        )),
    })?;

    Ok(SwitchChainParams {
        chain_id: parsed,
        raw_chain_id: chain_id.to_string(),
    })
}

fn malformed(received: &str) -> ApiError {
    ApiError::invalid_params(format!(
        "Expected 0x-prefixed, unpadded, non-zero hexadecimal string 'chainId'. Received:\n{}",
        received
    ))
}

/// Strings are echoed verbatim, anything else as JSON.
fn display_received(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => ABSENT.to_string(),
    }
}

fn display_json(value: Option<&Value>) -> String {
    value.map_or_else(|| ABSENT.to_string(), Value::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain_id::MAX_SAFE_CHAIN_ID;
    use proptest::prelude::*;
    use serde_json::json;

    fn validate(params: Value) -> ApiResult<SwitchChainParams> {
        validate_switch_chain_params(Some(&params), MAX_SAFE_CHAIN_ID)
    }

    #[test]
    fn test_valid_chain_id() {
        let params = validate(json!([{ "chainId": "0x1" }])).unwrap();
        assert_eq!(params.chain_id.as_str(), "0x1");
    }

    #[test]
    fn test_uppercase_chain_id_lowercased() {
        let params = validate(json!([{ "chainId": "0x2A" }])).unwrap();
        assert_eq!(params.chain_id.as_str(), "0x2a");
        assert_eq!(params.raw_chain_id, "0x2A");
    }

    #[test]
    fn test_missing_params() {
        let err = validate_switch_chain_params(None, MAX_SAFE_CHAIN_ID).unwrap_err();
        assert!(err.is_invalid_params());
        assert!(err.message.starts_with("Expected single, object parameter."));
        assert!(err.message.ends_with("Received:\nundefined"));
    }

    #[test]
    fn test_non_object_param() {
        for params in [json!([]), json!(["0x1"]), json!([null]), json!([1]), json!([["0x1"]]), json!({ "chainId": "0x1" })] {
            let err = validate(params.clone()).unwrap_err();
            assert!(err.is_invalid_params(), "{params} should be rejected");
            assert!(err.message.contains("Expected single, object parameter"));
        }
    }

    #[test]
    fn test_extra_keys() {
        let err = validate(json!([{ "chainId": "0x1", "rpcUrl": "x", "foo": 1 }])).unwrap_err();
        assert!(err.is_invalid_params());
        assert!(err.message.contains("Unsupported keys"));
        assert!(err.message.contains("foo"));
        assert!(err.message.contains("rpcUrl"));
    }

    #[test]
    fn test_non_hex_echoes_value() {
        let err = validate(json!([{ "chainId": "0xg1" }])).unwrap_err();
        assert!(err.is_invalid_params());
        assert!(err.message.contains("0xg1"));
    }

    #[test]
    fn test_non_string_chain_id() {
        let err = validate(json!([{ "chainId": 1 }])).unwrap_err();
        assert!(err.is_invalid_params());
        assert!(err.message.ends_with("Received:\n1"));

        let err = validate(json!([{}])).unwrap_err();
        assert!(err.message.contains("hexadecimal string 'chainId'"));
        assert!(err.message.ends_with("Received:\nundefined"));

        let err = validate(json!([{ "chainId": null }])).unwrap_err();
        assert!(err.message.ends_with("Received:\nnull"));
    }

    #[test]
    fn test_exceeds_max_safe_value() {
        let err = validate(json!([{ "chainId": "0x20000000000000" }])).unwrap_err();
        assert!(err.is_invalid_params());
        assert!(err.message.contains("numerical value greater than max safe value"));
        assert!(err.message.contains("0x20000000000000"));
    }

    #[test]
    fn test_custom_ceiling() {
        let params = json!([{ "chainId": "0x64" }]);
        assert!(validate_switch_chain_params(Some(&params), 99).is_err());
        assert!(validate_switch_chain_params(Some(&params), 100).is_ok());
    }

    proptest! {
        #[test]
        fn prop_arbitrary_strings_never_panic(s in ".*") {
            let _ = validate(json!([{ "chainId": s }]));
        }

        #[test]
        fn prop_non_hex_rejected(s in "0x[0-9a-f]*[g-z][0-9a-z]*") {
            let err = validate(json!([{ "chainId": s.clone() }])).unwrap_err();
            prop_assert!(err.is_invalid_params());
            prop_assert!(err.message.contains(&s));
        }

        #[test]
        fn prop_extra_key_always_rejected(key in "[a-zA-Z]{1,12}") {
            prop_assume!(key != CHAIN_ID_KEY);
            let mut param = serde_json::Map::new();
            param.insert(CHAIN_ID_KEY.to_string(), json!("0x1"));
            param.insert(key, json!(true));
            let err = validate(json!([param])).unwrap_err();
            prop_assert!(err.message.contains("Unsupported keys"));
        }
    }
}
