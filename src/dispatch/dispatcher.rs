use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use super::connection::{ConnectionGuard, Connector};
use crate::params::RequestParameters;

/// One remote operation with its validated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCall {
    pub method: &'static str,
    pub params: RequestParameters,
}

impl RemoteCall {
    pub fn new(method: &'static str, params: RequestParameters) -> Self {
        Self { method, params }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to encode params for {method}: {source}")]
    Encode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("remote call {method} failed: {source}")]
    Call {
        method: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// Single-attempt dispatcher. No retries, no timeout beyond the transport's.
pub struct Dispatcher<C: Connector> {
    connector: C,
}

impl<C: Connector> Dispatcher<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Connect to `address`, invoke `call` once, release the connection, and
    /// hand back the payload untouched.
    pub async fn dispatch(&self, address: &str, call: &RemoteCall) -> Result<Value, DispatchError> {
        // encode before connecting so a bad request never opens a socket
        let params = call
            .params
            .to_value()
            .map_err(|source| DispatchError::Encode { method: call.method, source })?;

        let conn = self.connector.connect(address).await.map_err(|source| {
            error!(address, error = %source, "failed to establish connection");
            DispatchError::Connect { address: address.to_string(), source }
        })?;

        let guard = ConnectionGuard::new(conn);
        let outcome = guard.call(call.method, params).await;
        guard.release();

        match outcome {
            Ok(payload) => {
                debug!(address, method = call.method, "remote call succeeded");
                Ok(payload)
            }
            Err(source) => {
                error!(address, method = call.method, error = %source, "remote call failed");
                Err(DispatchError::Call { method: call.method, source })
            }
        }
    }
}
