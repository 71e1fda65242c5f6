use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dispatch::{Connector, Envelope};
use crate::params::QueryParams;
use crate::rpc::endpoints::ENDPOINTS;
use crate::rpc::handlers::GatewayHandler;
use crate::utils::Result;

/// GatewayServer ties the HTTP router to a handler and a bound socket.
pub struct GatewayServer<C: Connector> {
    listener: TcpListener,
    handler: Arc<GatewayHandler<C>>,
}

impl<C: Connector> GatewayServer<C> {
    pub async fn bind(addr: SocketAddr, handler: Arc<GatewayHandler<C>>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, handler })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` flips to `true`.
    pub async fn start(self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        info!("Starting gateway on {}", self.listener.local_addr()?);
        axum::serve(self.listener, router(self.handler))
            .with_graceful_shutdown(async move {
                let _ = shutdown.wait_for(|stop| *stop).await;
                info!("gateway observed shutdown");
            })
            .await?;
        Ok(())
    }
}

/// One GET route per table endpoint plus the local routes.
pub fn router<C: Connector>(handler: Arc<GatewayHandler<C>>) -> Router {
    let mut app = Router::new()
        .route("/api/ping", get(ping).fallback(method_not_allowed))
        .route(
            "/api/getconnectionslist",
            get(connections_list::<C>).fallback(method_not_allowed),
        );

    for ep in ENDPOINTS {
        app = app.route(
            ep.path,
            get(move |State(h): State<Arc<GatewayHandler<C>>>, Query(q): Query<Vec<(String, String)>>| async move {
                let query: QueryParams = q.into_iter().collect();
                reply(h.handle(ep, &query).await)
            })
            .fallback(method_not_allowed),
        );
    }

    app.fallback(not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(handler)
}

/// Map a handler outcome onto the envelope and its status code.
pub fn reply(outcome: Result<Value>) -> Response {
    match outcome {
        Ok(result) => (StatusCode::OK, Json(Envelope::result(result))).into_response(),
        Err(e) => (e.status(), Json(Envelope::error(e.to_string()))).into_response(),
    }
}

async fn ping() -> Response {
    reply(Ok(Value::String("pong".into())))
}

async fn connections_list<C: Connector>(State(h): State<Arc<GatewayHandler<C>>>) -> Response {
    reply(Ok(h.connections()))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(Envelope::error("Endpoint not found"))).into_response()
}

async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, Json(Envelope::error("Method not allowed"))).into_response()
}
