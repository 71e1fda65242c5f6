//! Connector over jsonrpsee clients.
//!
//! `ws://`/`wss://` addresses open a WebSocket client, `http://`/`https://`
//! build an HTTP client. Closing drops the client, which also stops the
//! WebSocket background task.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::ws_client::{WsClient, WsClientBuilder};
use serde_json::Value;
use tracing::debug;

use super::connection::{Connection, Connector};

/// Builds one jsonrpsee client per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRpcConnector;

impl JsonRpcConnector {
    pub fn new() -> Self {
        Self
    }
}

enum RpcClient {
    Ws(WsClient),
    Http(HttpClient),
}

pub struct JsonRpcConnection {
    address: String,
    client: Option<RpcClient>,
}

#[async_trait]
impl Connector for JsonRpcConnector {
    type Conn = JsonRpcConnection;

    async fn connect(&self, address: &str) -> Result<JsonRpcConnection> {
        let client = if address.starts_with("ws://") || address.starts_with("wss://") {
            RpcClient::Ws(WsClientBuilder::default().build(address).await?)
        } else if address.starts_with("http://") || address.starts_with("https://") {
            RpcClient::Http(HttpClientBuilder::default().build(address)?)
        } else {
            bail!("unsupported node address scheme: {}", address);
        };
        debug!(address, "connection opened");
        Ok(JsonRpcConnection { address: address.to_string(), client: Some(client) })
    }
}

#[async_trait]
impl Connection for JsonRpcConnection {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let params = object_params(params)?;
        let value = match &self.client {
            Some(RpcClient::Ws(c)) => c.request::<Value, _>(method, params).await?,
            Some(RpcClient::Http(c)) => c.request::<Value, _>(method, params).await?,
            None => return Err(anyhow!("connection to {} is closed", self.address)),
        };
        Ok(value)
    }

    fn close(&mut self) {
        if self.client.take().is_some() {
            debug!(address = %self.address, "connection closed");
        }
    }
}

/// Named params for the request; `Null` means the method takes none.
fn object_params(params: Value) -> Result<ObjectParams> {
    let mut out = ObjectParams::new();
    match params {
        Value::Null => {}
        Value::Object(map) => {
            for (name, value) in map {
                out.insert(&name, value)?;
            }
        }
        other => bail!("params must be a JSON object, got {}", other),
    }
    Ok(out)
}
