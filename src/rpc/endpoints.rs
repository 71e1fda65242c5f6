//! Declarative endpoint table.
//!
//! Each entry names the remote method, the validator that builds its typed
//! arguments and the fixed message returned when the node call fails. The
//! router and the handler are generic over this table; adding an endpoint
//! is adding a row.

use serde_json::Value;

use crate::params::{
    height_query, proposal_query, round_request, runtime_query, runtime_request,
    ParamError, QueryParams, RequestParameters,
};

/// Builds the typed arguments for an endpoint from the query string.
pub type Validator = fn(&QueryParams) -> Result<RequestParameters, ParamError>;

/// What to do with the node's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Pass the payload through unchanged.
    Raw,
    /// Only success matters; answer `"pong"`.
    Pong,
    /// Project one field out of a block's `meta` object.
    BlockMeta(&'static str),
}

pub const METADATA_FAILURE: &str = "Failed to Unmarshal Block Metadata!";

impl Shape {
    pub fn apply(self, payload: Value) -> Result<Value, &'static str> {
        match self {
            Shape::Raw => Ok(payload),
            Shape::Pong => Ok(Value::String("pong".into())),
            Shape::BlockMeta(field) => payload
                .get("meta")
                .and_then(|meta| meta.get(field))
                .cloned()
                .ok_or(METADATA_FAILURE),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EndpointSpec {
    pub path: &'static str,
    pub method: &'static str,
    pub failure: &'static str,
    pub validate: Validator,
    pub shape: Shape,
}

/// Ping always asks for the newest block, whatever the query says.
fn latest_block(_: &QueryParams) -> Result<RequestParameters, ParamError> {
    height_query(&QueryParams::default())
}

const fn raw(path: &'static str, method: &'static str, failure: &'static str, validate: Validator) -> EndpointSpec {
    EndpointSpec { path, method, failure, validate, shape: Shape::Raw }
}

pub static ENDPOINTS: &[EndpointSpec] = &[
    EndpointSpec {
        path: "/api/pingnode",
        method: "Consensus.GetBlock",
        failure: "Failed to ping a node by retrieving highest block height!",
        validate: latest_block,
        shape: Shape::Pong,
    },
    // consensus
    raw("/api/consensus/genesis", "Consensus.StateToGenesis", "Failed to get Genesis file of Block!", height_query),
    raw("/api/consensus/epoch", "Consensus.GetEpoch", "Failed to retrieve Epoch of Block!", height_query),
    raw("/api/consensus/block", "Consensus.GetBlock", "Failed to retrieve Block!", height_query),
    EndpointSpec {
        path: "/api/consensus/blockheader",
        method: "Consensus.GetBlock",
        failure: "Failed to retrieve Block!",
        validate: height_query,
        shape: Shape::BlockMeta("header"),
    },
    EndpointSpec {
        path: "/api/consensus/blocklastcommit",
        method: "Consensus.GetBlock",
        failure: "Failed to retrieve Block!",
        validate: height_query,
        shape: Shape::BlockMeta("last_commit"),
    },
    raw("/api/consensus/transactions", "Consensus.GetTransactions", "Failed to retrieve Transactions!", height_query),
    // governance
    raw("/api/governance/activeproposals", "Governance.ActiveProposals", "Failed to get ActiveProposals!", height_query),
    raw("/api/governance/proposals", "Governance.Proposals", "Failed to get Proposals!", height_query),
    raw("/api/governance/proposal", "Governance.Proposal", "Failed to get Proposal!", proposal_query),
    raw("/api/governance/votes", "Governance.Votes", "Failed to get Votes!", proposal_query),
    // roothash
    raw("/api/roothash/latestblock", "RootHash.GetLatestBlock", "Failed to get Roothash Latest Block!", runtime_request),
    raw("/api/roothash/runtimestate", "RootHash.GetRuntimeState", "Failed to get Roothash Runtime State!", runtime_request),
    raw("/api/roothash/events", "RootHash.GetEvents", "Failed to get Roothash Events!", height_query),
    // runtime
    raw("/api/runtime/block", "RuntimeClient.GetBlock", "Failed to get Runtime Block!", round_request),
    raw("/api/runtime/transactions", "RuntimeClient.GetTransactions", "Failed to get Runtime Transactions!", round_request),
    raw("/api/runtime/events", "RuntimeClient.GetEvents", "Failed to get Runtime Events!", round_request),
    raw("/api/runtime/query", "RuntimeClient.Query", "Failed to get Runtime Query!", runtime_query),
];

/// Table lookup by route path.
pub fn find(path: &str) -> Option<&'static EndpointSpec> {
    ENDPOINTS.iter().find(|ep| ep.path == path)
}
