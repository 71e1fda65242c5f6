//! Request dispatch: one connection, one remote call, guaranteed release.
//!
//! - `connection`: the `Connector`/`Connection` seam and the closing guard
//! - `dispatcher`: the single-attempt dispatch routine
//! - `jsonrpc`: production connector over jsonrpsee WS/HTTP clients
//! - `envelope`: the uniform `{"result"}` / `{"error"}` body

pub mod connection;
pub mod dispatcher;
pub mod envelope;
pub mod jsonrpc;

pub use connection::{Connection, ConnectionGuard, Connector};
pub use dispatcher::{DispatchError, Dispatcher, RemoteCall};
pub use envelope::Envelope;
pub use jsonrpc::JsonRpcConnector;
