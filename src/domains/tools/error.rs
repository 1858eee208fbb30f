//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

use super::definitions::EanSearchError;

/// Errors that end a tool call with a protocol-level error.
///
/// Expected outcomes such as a missing token or an unknown barcode are
/// answered with text instead and never reach this type.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The remote ean-search.org call failed.
    #[error("Remote lookup failed: {0}")]
    Remote(#[from] EanSearchError),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::InvalidArguments(_) => McpError::invalid_params(err.to_string(), None),
            ToolError::Remote(_) => McpError::internal_error(err.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_invalid_arguments_maps_to_invalid_params() {
        let err: McpError = ToolError::invalid_arguments("missing field `barcode`").into();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("barcode"));
    }

    #[test]
    fn test_remote_failure_maps_to_internal_error() {
        let err: McpError =
            ToolError::from(EanSearchError::Status(StatusCode::SERVICE_UNAVAILABLE)).into();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("503"));
    }
}
