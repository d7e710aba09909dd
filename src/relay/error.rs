//! Fee relayer errors

use serde::Deserialize;

/// Detail object the relayer attaches to an error response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// Error body returned by the fee relayer service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub message: String,
    pub data: Option<ErrorDetail>,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Solana RPC call failed (network, node or decoding error)
    #[error("rpc request failed: {0}")]
    Rpc(String),
    /// The collaborator did not answer within its configured timeout
    #[error("{0} timed out")]
    Timeout(&'static str),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The relayer answered with a structured error
    #[error("fee relayer error {code}: {message}")]
    Api { code: i64, message: String, data: Option<ErrorDetail> },
    #[error("invalid fee relayer url: {0}")]
    InvalidUrl(String),
    #[error("invalid fee payer pubkey: {0}")]
    InvalidFeePayer(String),
    /// Lamport arithmetic left the u64 range
    #[error("lamport overflow while computing {0}")]
    Overflow(&'static str),
    #[error("network fees are not initialized")]
    NetworkFeesUninitialized,
}

impl From<ApiErrorBody> for RelayError {
    fn from(body: ApiErrorBody) -> Self {
        RelayError::Api { code: body.code, message: body.message, data: body.data }
    }
}

impl RelayError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, RelayError::Rpc(_) | RelayError::Timeout(_) | RelayError::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_api_error_body() {
        let raw = r#"{"code":6,"message":"Not enough balance","data":{"type":"NotEnoughBalance","data":null}}"#;
        let body: ApiErrorBody = serde_json::from_str(raw).unwrap();
        let err: RelayError = body.into();
        match err {
            RelayError::Api { code, message, data } => {
                assert_eq!(code, 6);
                assert_eq!(message, "Not enough balance");
                assert_eq!(data.unwrap().kind.as_deref(), Some("NotEnoughBalance"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(RelayError::Rpc("connection reset".into()).is_transient());
        assert!(RelayError::Timeout("destination lookup").is_transient());
        assert!(!RelayError::Overflow("transaction fee").is_transient());
        assert!(!RelayError::InvalidUrl("::".into()).is_transient());
    }
}
