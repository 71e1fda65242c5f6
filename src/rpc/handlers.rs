use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::directory::NodeDirectory;
use crate::dispatch::{Connector, DispatchError, Dispatcher, RemoteCall};
use crate::params::QueryParams;
use crate::rpc::endpoints::EndpointSpec;
use crate::utils::{GatewayError, Result};

/// Runs every table endpoint: resolve the node, validate the query, dispatch
/// one call, shape the payload.
pub struct GatewayHandler<C: Connector> {
    directory: Arc<NodeDirectory>,
    dispatcher: Dispatcher<C>,
}

impl<C: Connector> GatewayHandler<C> {
    pub fn new(directory: Arc<NodeDirectory>, connector: C) -> Self {
        Self { directory, dispatcher: Dispatcher::new(connector) }
    }

    pub async fn handle(&self, ep: &EndpointSpec, query: &QueryParams) -> Result<Value> {
        let name = query.get("name");
        let address = self.directory.resolve(name).ok_or_else(|| {
            let err = GatewayError::UnknownNode(name.to_string());
            warn!(endpoint = ep.path, category = err.category(), node = name, "node name requested doesn't exist");
            err
        })?;

        let params = (ep.validate)(query).map_err(|e| {
            let err = GatewayError::from(e.clone());
            warn!(
                endpoint = ep.path,
                category = err.category(),
                param = e.param(),
                received = e.received().unwrap_or(""),
                "rejected request parameter"
            );
            err
        })?;

        let call = RemoteCall::new(ep.method, params);
        let payload = match self.dispatcher.dispatch(address, &call).await {
            Ok(payload) => payload,
            Err(DispatchError::Connect { address, source }) => {
                let err = GatewayError::Connection { address };
                error!(endpoint = ep.path, category = err.category(), error = %source, "{}", err);
                return Err(err);
            }
            Err(e) => {
                let err = GatewayError::Remote { message: ep.failure };
                error!(endpoint = ep.path, category = err.category(), address, error = %e, "{}", err);
                return Err(err);
            }
        };

        let shaped = ep.shape.apply(payload).map_err(|message| {
            let err = GatewayError::Remote { message };
            error!(endpoint = ep.path, category = err.category(), address, "{}", err);
            err
        })?;

        info!(endpoint = ep.path, node = name, "responding with result");
        Ok(shaped)
    }

    /// Configured node names, no node contact.
    pub fn connections(&self) -> Value {
        Value::from(self.directory.names())
    }
}
