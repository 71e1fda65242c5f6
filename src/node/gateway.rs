//! Gateway wiring: configuration -> directory -> handler -> HTTP server.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::dispatch::{Connector, JsonRpcConnector};
use crate::node::config::GatewayConfig;
use crate::node::service_handle::ServiceHandle;
use crate::rpc::{GatewayHandler, GatewayServer};

/// Main gateway object
pub struct Gateway<C: Connector = JsonRpcConnector> {
    cfg: GatewayConfig,
    connector: C,
}

impl Gateway<JsonRpcConnector> {
    pub fn new(cfg: GatewayConfig) -> Self {
        Self { cfg, connector: JsonRpcConnector::new() }
    }
}

impl<C: Connector> Gateway<C> {
    /// Same wiring over a custom connector.
    pub fn with_connector(cfg: GatewayConfig, connector: C) -> Self {
        Self { cfg, connector }
    }

    /// Bind the API socket, spawn the server and return the handle that
    /// stops it, along with the address actually bound.
    pub async fn start(self) -> Result<(ServiceHandle, SocketAddr)> {
        self.cfg.validate()?;
        let (mut svc_handle, shutdown_rx) = ServiceHandle::new();

        let directory = Arc::new(self.cfg.directory());
        info!(nodes = directory.len(), "node directory loaded");
        let handler = Arc::new(GatewayHandler::new(directory, self.connector));

        let server = GatewayServer::bind(self.cfg.bind_addr()?, handler).await?;
        let bound = server.local_addr()?;

        let h: JoinHandle<Result<()>> = tokio::spawn(async move {
            if let Err(e) = server.start(shutdown_rx).await {
                error!("gateway server failed: {:?}", e);
                return Err(e);
            }
            Ok(())
        });
        svc_handle.attach(h);

        info!("Gateway started, API: {}", bound);
        Ok((svc_handle, bound))
    }
}
