//! Wallet RPC error types with JSON-RPC 2.0 and EIP-1193 error codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON-RPC and provider error codes
pub mod codes {
    // JSON-RPC 2.0 standard errors (-32700 to -32600)
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    // EIP-1193 provider errors
    pub const USER_REJECTED: i32 = 4001;

    // To-be-standardized "unrecognized chain ID" error (EIP-3326)
    pub const UNRECOGNIZED_CHAIN: i32 = 4902;
}

/// Wallet RPC error with JSON-RPC code
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// JSON-RPC error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Optional additional data
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create error with additional data
    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Parse error - invalid JSON
    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(
            codes::PARSE_ERROR,
            format!("Parse error: {}", details.into()),
        )
    }

    /// Invalid request - not a valid JSON-RPC request
    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_REQUEST,
            format!("Invalid request: {}", details.into()),
        )
    }

    /// Method not found
    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )
    }

    /// Invalid parameters.
    ///
    /// The message is passed through as-is so callers can echo the
    /// offending value back to the requester.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(codes::INVALID_PARAMS, message)
    }

    /// Internal error
    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(
            codes::INTERNAL_ERROR,
            format!("Internal error: {}", details.into()),
        )
    }

    /// User rejected the request
    pub fn user_rejected() -> Self {
        Self::new(codes::USER_REJECTED, "User rejected the request.")
    }

    /// Chain id not found in the built-in table nor the custom network store
    pub fn unrecognized_chain(chain_id: &str, add_method: &str) -> Self {
        Self::new(
            codes::UNRECOGNIZED_CHAIN,
            format!(
                "Unrecognized chain ID \"{}\". Try adding the chain using {} first.",
                chain_id, add_method
            ),
        )
    }

    /// Returns true for the JSON-RPC invalid params code
    pub fn is_invalid_params(&self) -> bool {
        self.code == codes::INVALID_PARAMS
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let len = if self.data.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("ApiError", len)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        if let Some(ref data) = self.data {
            state.serialize_field("data", data)?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for ApiError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ErrorHelper {
            code: i32,
            message: String,
            data: Option<serde_json::Value>,
        }

        let helper = ErrorHelper::deserialize(deserializer)?;
        Ok(ApiError {
            code: helper.code,
            message: helper.message,
            data: helper.data,
        })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_syntax() || e.is_eof() {
            ApiError::parse_error(e.to_string())
        } else {
            ApiError::invalid_params(e.to_string())
        }
    }
}

/// Result type for RPC operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Service-level errors (not JSON-RPC, internal use)
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),
}

/// Approval queue errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApprovalError {
    /// The user declined the request
    #[error("approval {0} rejected by user")]
    Rejected(uuid::Uuid),

    /// The pending entry was discarded without a decision
    #[error("approval {0} dropped before a decision was made")]
    Dropped(uuid::Uuid),

    /// No pending approval with this id
    #[error("no pending approval {0}")]
    UnknownId(uuid::Uuid),
}

impl From<ApprovalError> for ApiError {
    fn from(e: ApprovalError) -> Self {
        match e {
            ApprovalError::Rejected(_) => ApiError::user_rejected(),
            ApprovalError::Dropped(_) | ApprovalError::UnknownId(_) => {
                ApiError::internal(e.to_string())
            }
        }
    }
}

/// Provider switch errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// No built-in network registered for this provider type
    #[error("no built-in network for provider type {0}")]
    UnknownProviderType(String),

    /// Chain id is not in the built-in table
    #[error("chain {0} is not a built-in network")]
    NotBuiltin(String),

    /// Applying the new target failed; the previous one stays active
    #[error("failed to switch provider: {0}")]
    SwitchFailed(String),
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        ApiError::internal(e.to_string())
    }
}

/// Hardware information errors
#[derive(Debug, thiserror::Error)]
pub enum HardwareInfoError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}: {details}")]
    Parse { what: &'static str, details: String },

    #[error("hardware information unavailable: {0}")]
    Unsupported(String),
}

impl From<HardwareInfoError> for ApiError {
    fn from(e: HardwareInfoError) -> Self {
        ApiError::internal(e.to_string())
    }
}
