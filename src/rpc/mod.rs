//! HTTP surface
//!
//! - `GET /api/<group>/<endpoint>?name=<node>&...` for every row of the
//!   endpoint table, forwarded to the named node
//! - local routes: `/api/ping`, `/api/getconnectionslist`
//!
//! Bodies are always the `{"result"}` / `{"error"}` envelope.

pub mod endpoints;
pub mod handlers;
pub mod server;

pub use endpoints::{EndpointSpec, Shape, ENDPOINTS};
pub use handlers::GatewayHandler;
pub use server::{reply, router, GatewayServer};
