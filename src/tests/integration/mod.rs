//! Integration tests: a jsonrpsee fake node behind the real connector, driven
//! through the axum router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::RpcModule;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::directory::{NodeDirectory, NodeEntry};
use crate::dispatch::JsonRpcConnector;
use crate::node::{Gateway, GatewayConfig};
use crate::rpc::{router, GatewayHandler};

const NS: &str = "gAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";
const NS_HEX: &str = "8000000000000000000000000000000000000000000000000000000000000000";
const NS_PLUS: &str = "++8AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAE=";

fn block(height: i64) -> Value {
    json!({
        "height": height,
        "hash": "1b6b3f4c",
        "meta": {"header": {"chain_id": "testnet", "height": height}, "last_commit": {"round": 1}}
    })
}

fn remote_error(msg: &str) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(-32000, msg.to_string(), None::<()>)
}

/// Node that answers a handful of methods and echoes what it received.
async fn spawn_fake_node() -> (SocketAddr, ServerHandle) {
    let server = Server::builder().build("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();

    let mut module = RpcModule::new(());
    module
        .register_method("Consensus.GetBlock", |params, _, _| -> Result<Value, ErrorObjectOwned> {
            let p: Value = params.parse()?;
            match p["height"].as_i64() {
                Some(0) => Ok(block(4242)),
                Some(h) if h > 0 && h <= 4242 => Ok(block(h)),
                _ => Err(remote_error("height out of range")),
            }
        })
        .unwrap();
    module
        .register_method("Governance.Proposal", |params, _, _| -> Result<Value, ErrorObjectOwned> {
            let p: Value = params.parse()?;
            match p["proposal_id"].as_u64() {
                Some(1) => Ok(json!({"id": 1, "state": "active", "queried_at": p["height"]})),
                _ => Err(remote_error("governance: proposal not found")),
            }
        })
        .unwrap();
    for method in ["RuntimeClient.Query", "RuntimeClient.GetBlock", "RootHash.GetRuntimeState"] {
        module
            .register_method(method, |params, _, _| -> Result<Value, ErrorObjectOwned> {
                let p: Value = params.parse()?;
                Ok(json!({"echo": p}))
            })
            .unwrap();
    }

    let handle = server.start(module);
    (addr, handle)
}

async fn app() -> (Router, ServerHandle) {
    let (addr, handle) = spawn_fake_node().await;
    let dir = NodeDirectory::new(vec![
        NodeEntry::new("nodeA", format!("ws://{}", addr)),
        NodeEntry::new("nodeHttp", format!("http://{}", addr)),
        NodeEntry::new("dead", "ws://127.0.0.1:1"),
    ]);
    let handler = Arc::new(GatewayHandler::new(Arc::new(dir), JsonRpcConnector::new()));
    (router(handler), handle)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_block_at_height_over_ws() {
    let (app, node) = app().await;
    let (status, body) = get(&app, "/api/consensus/block?name=nodeA&height=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": block(100)}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_block_over_http_transport() {
    let (app, node) = app().await;
    let (status, body) = get(&app, "/api/consensus/block?name=nodeHttp&height=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["height"], json!(7));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_empty_height_is_latest() {
    let (app, node) = app().await;
    let (_, body) = get(&app, "/api/consensus/block?name=nodeA&height=").await;
    assert_eq!(body["result"]["height"], json!(4242));
    let (_, body) = get(&app, "/api/consensus/block?name=nodeA").await;
    assert_eq!(body["result"]["height"], json!(4242));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_unknown_node() {
    let (app, node) = app().await;
    let (status, body) = get(&app, "/api/consensus/block?name=unknown&height=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Node name requested doesn't exist"}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_bad_height() {
    let (app, node) = app().await;
    let (status, body) = get(&app, "/api/consensus/block?name=nodeA&height=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("height needs to be string of int"));
    assert!(body.get("result").is_none());
    node.stop().unwrap();
}

#[tokio::test]
async fn test_remote_error_uses_fixed_message() {
    let (app, node) = app().await;
    let (status, body) = get(&app, "/api/consensus/block?name=nodeA&height=999999").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "Failed to retrieve Block!"}));

    let (status, body) = get(&app, "/api/governance/proposal?name=nodeA&id=2").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "Failed to get Proposal!"}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_unreachable_node() {
    let (app, node) = app().await;
    let (status, body) = get(&app, "/api/consensus/epoch?name=dead").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "Failed to establish connection using socket: ws://127.0.0.1:1"}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_block_header_and_ping() {
    let (app, node) = app().await;
    let (_, body) = get(&app, "/api/consensus/blockheader?name=nodeA&height=12").await;
    assert_eq!(body, json!({"result": {"chain_id": "testnet", "height": 12}}));
    let (_, body) = get(&app, "/api/consensus/blocklastcommit?name=nodeA&height=12").await;
    assert_eq!(body, json!({"result": {"round": 1}}));
    let (status, body) = get(&app, "/api/pingnode?name=nodeA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "pong"}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_proposal_params_reach_node() {
    let (app, node) = app().await;
    let (_, body) = get(&app, "/api/governance/proposal?name=nodeA&height=30&id=1").await;
    assert_eq!(body, json!({"result": {"id": 1, "state": "active", "queried_at": 30}}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_runtime_query_args_are_hex() {
    let (app, node) = app().await;
    let uri = format!("/api/runtime/query?name=nodeA&round=5&namespace={}&method=accounts.Nonce&args=ab", NS);
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["result"]["echo"],
        json!({"runtime_id": NS, "round": 5, "method": "accounts.Nonce", "args": "6162"})
    );

    let uri = format!("/api/runtime/query?name=nodeA&round=5&namespace={}", NS);
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Failed to retrieve method, not specified!"}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_namespace_errors() {
    let (app, node) = app().await;
    let (_, body) = get(&app, "/api/roothash/latestblock?name=nodeA").await;
    assert_eq!(body, json!({"error": "namespace can't be empty!"}));
    let (_, body) = get(&app, "/api/roothash/latestblock?name=nodeA&namespace=xyz").await;
    assert_eq!(body, json!({"error": "Failed to UnmarshalText into Namespace."}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_local_routes() {
    let (app, node) = app().await;
    let (status, body) = get(&app, "/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "pong"}));
    let (_, body) = get(&app, "/api/getconnectionslist").await;
    assert_eq!(body, json!({"result": ["nodeA", "nodeHttp", "dead"]}));
    let (status, body) = get(&app, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
    node.stop().unwrap();
}

#[tokio::test]
async fn test_wrong_method_gets_json_405() {
    let (app, node) = app().await;
    for uri in ["/api/ping", "/api/getconnectionslist", "/api/consensus/block?name=nodeA"] {
        let (status, body) = send(&app, Method::POST, uri).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(body, json!({"error": "Method not allowed"}), "{uri}");
    }
    node.stop().unwrap();
}

#[tokio::test]
async fn test_repeated_name_uses_first() {
    let (app, node) = app().await;
    let (status, body) = get(&app, "/api/pingnode?name=nodeA&name=dead").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "pong"}));
    let (status, _) = get(&app, "/api/pingnode?name=dead&name=nodeA").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    node.stop().unwrap();
}

#[tokio::test]
async fn test_runtime_state_sends_height_and_namespace() {
    let (app, node) = app().await;
    let uri = format!("/api/roothash/runtimestate?name=nodeA&height=12&namespace={}", NS);
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["echo"], json!({"height": 12, "runtime_id": NS}));

    let (_, body) = get(&app, &format!("/api/roothash/runtimestate?name=nodeA&namespace={}", NS_HEX)).await;
    assert_eq!(body["result"]["echo"], json!({"height": 0, "runtime_id": NS}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_runtime_block_sends_round_and_namespace() {
    let (app, node) = app().await;
    let uri = format!("/api/runtime/block?name=nodeA&round=3&namespace={}", NS);
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["echo"], json!({"runtime_id": NS, "round": 3}));
    node.stop().unwrap();
}

#[tokio::test]
async fn test_base64_namespace_with_and_without_escaping() {
    let (app, node) = app().await;
    let escaped = NS_PLUS.replace('+', "%2B");
    for ns in [escaped.as_str(), NS_PLUS] {
        let uri = format!("/api/runtime/block?name=nodeA&round=1&namespace={}", ns);
        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::OK, "{ns}");
        assert_eq!(body["result"]["echo"]["runtime_id"], json!(NS_PLUS), "{ns}");
    }
    node.stop().unwrap();
}

#[tokio::test]
async fn test_gateway_start_and_shutdown() {
    let cfg: GatewayConfig = r#"
        [api]
        bind = "127.0.0.1:0"

        [[nodes]]
        node_name = "nodeA"
        ws_url = "ws://127.0.0.1:1"
    "#
    .parse()
    .unwrap();

    let (svc, addr) = Gateway::new(cfg).start().await.unwrap();
    assert_ne!(addr.port(), 0);
    assert_eq!(svc.running(), 1);
    tokio_test::assert_ok!(svc.shutdown().await);
}
