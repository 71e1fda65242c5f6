//! Random query strings through every endpoint: validators must never panic
//! and a rejected request must never reach the connector.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::distributions::{Alphanumeric, DistString};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

use crate::directory::{NodeDirectory, NodeEntry};
use crate::dispatch::{Connection, Connector};
use crate::params::{parse_height, Height, QueryParams};
use crate::rpc::endpoints::ENDPOINTS;
use crate::rpc::GatewayHandler;

const KEYS: &[&str] = &["name", "height", "round", "namespace", "id", "method", "args"];

fn random_value<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..7) {
        0 => String::new(),
        1 => rng.gen::<i64>().to_string(),
        2 => rng.gen::<u64>().to_string(),
        3 => hex::encode((0..rng.gen_range(0..40)).map(|_| rng.gen::<u8>()).collect::<Vec<_>>()),
        4 => STANDARD.encode((0..rng.gen_range(28..36)).map(|_| rng.gen::<u8>()).collect::<Vec<_>>()),
        5 => ["nodeA", "-", "0x10", "1e9", "लेटेस्ट", " 7"].choose(rng).unwrap().to_string(),
        _ => {
            let len = rng.gen_range(1..70);
            Alphanumeric.sample_string(rng, len)
        }
    }
}

struct Tally(Arc<AtomicUsize>);
struct Conn;

#[async_trait]
impl Connector for Tally {
    type Conn = Conn;
    async fn connect(&self, _address: &str) -> anyhow::Result<Conn> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(Conn)
    }
}

#[async_trait]
impl Connection for Conn {
    async fn call(&self, _method: &str, _params: Value) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }
    fn close(&mut self) {}
}

#[test]
fn fuzz_height_parsing() {
    let mut rng = rand::thread_rng();
    for _ in 0..2000 {
        let raw = random_value(&mut rng);
        match parse_height(&raw) {
            Ok(Height::Latest) => assert!(raw.is_empty()),
            Ok(Height::At(h)) => assert_eq!(raw.parse::<i64>().ok(), Some(h)),
            Err(e) => assert_eq!(e.received(), Some(raw.as_str())),
        }
    }
}

#[tokio::test]
async fn fuzz_rejections_never_connect() {
    let mut rng = rand::thread_rng();
    let connects = Arc::new(AtomicUsize::new(0));
    let dir = NodeDirectory::new(vec![NodeEntry::new("nodeA", "A")]);
    let handler = GatewayHandler::new(Arc::new(dir), Tally(connects.clone()));

    for _ in 0..500 {
        let ep = ENDPOINTS.choose(&mut rng).unwrap();
        let q: QueryParams = KEYS.iter().map(|k| (*k, random_value(&mut rng))).collect();
        let before = connects.load(Ordering::SeqCst);
        let outcome = handler.handle(ep, &q).await;
        let after = connects.load(Ordering::SeqCst);
        match outcome {
            Err(e) if e.is_client_error() => assert_eq!(before, after, "{} {:?}", ep.path, q),
            _ => assert_eq!(after, before + 1),
        }
    }
}
