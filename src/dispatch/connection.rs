use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Opens connections to node addresses taken from the directory.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Conn: Connection;

    /// Acquire a connection. No retry is attempted by callers.
    async fn connect(&self, address: &str) -> Result<Self::Conn>;
}

/// A live connection to one node.
#[async_trait]
pub trait Connection: Send + Sync + 'static {
    /// Invoke one remote method with a named-params object (`Null` for none).
    async fn call(&self, method: &str, params: Value) -> Result<Value>;

    /// Release the connection. Called exactly once through [`ConnectionGuard`].
    fn close(&mut self);
}

/// Owns an open connection and closes it exactly once: on [`release`] or on
/// drop, whichever comes first. Drop also covers a request future that is
/// cancelled while the call is in flight.
///
/// [`release`]: ConnectionGuard::release
pub struct ConnectionGuard<C: Connection> {
    conn: Option<C>,
}

impl<C: Connection> ConnectionGuard<C> {
    pub fn new(conn: C) -> Self {
        Self { conn: Some(conn) }
    }

    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        match &self.conn {
            Some(conn) => conn.call(method, params).await,
            None => Err(anyhow::anyhow!("connection already released")),
        }
    }

    pub fn release(mut self) {
        self.close_once();
    }

    fn close_once(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            conn.close();
        }
    }
}

impl<C: Connection> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        self.close_once();
    }
}
