//! oasis-gateway: read-only HTTP/JSON gateway in front of node RPC endpoints.
//!
//! Every request follows the same path:
//!
//! ```text
//! GET /api/...?name=<node>  ->  directory  ->  params  ->  dispatch  ->  node RPC
//!                                   |            |            |
//!                                   +------------+------------+--> {"result"} | {"error"}
//! ```
//!
//! - [`directory`]: immutable node name -> address table
//! - [`params`]: query-string validation into typed request arguments
//! - [`dispatch`]: one connection, one call, guaranteed release
//! - [`rpc`]: declarative endpoint table and the axum server
//! - [`node`]: configuration, CLI and process wiring

pub mod directory;
pub mod dispatch;
pub mod node;
pub mod params;
pub mod rpc;
pub mod utils;

pub use directory::{NodeDirectory, NodeEntry};
pub use dispatch::{Dispatcher, Envelope, JsonRpcConnector};
pub use node::{Gateway, GatewayConfig};
pub use utils::{GatewayError, Result};
