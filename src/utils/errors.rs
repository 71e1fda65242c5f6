use axum::http::StatusCode;
use thiserror::Error;

use crate::params::ParamError;

/// Every way a gateway request can fail. The `Display` text is what the
/// client sees in the `{"error": ...}` envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The `name` query parameter matched no configured node.
    #[error("Node name requested doesn't exist")]
    UnknownNode(String),

    /// A query parameter failed validation.
    #[error(transparent)]
    InvalidParameter(#[from] ParamError),

    /// The node was resolved but could not be reached.
    #[error("Failed to establish connection using socket: {address}")]
    Connection { address: String },

    /// The node answered the call with an error, or the answer could not be
    /// shaped into the endpoint's payload.
    #[error("{message}")]
    Remote { message: &'static str },
}

impl GatewayError {
    /// HTTP status for the error reply.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::UnknownNode(_) | GatewayError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            GatewayError::Connection { .. } | GatewayError::Remote { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short category label used in log fields.
    pub fn category(&self) -> &'static str {
        match self {
            GatewayError::UnknownNode(_) => "unknown_node",
            GatewayError::InvalidParameter(_) => "invalid_parameter",
            GatewayError::Connection { .. } => "connection",
            GatewayError::Remote { .. } => "remote",
        }
    }

    /// Client errors are rejected before any connection is opened.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, GatewayError>;
