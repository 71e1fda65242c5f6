//! Typed request arguments, one struct per request shape.
//!
//! Field names are the named parameters the node expects.

use serde::{Deserialize, Serialize};

use super::{
    parse_height, parse_namespace, parse_proposal_id, parse_round, require, Height, Namespace,
    ParamError, QueryParams,
};
use crate::utils::serde_helpers::hex_bytes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightQuery {
    pub height: Height,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalQuery {
    pub height: Height,
    pub proposal_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeRequest {
    pub height: Height,
    pub runtime_id: Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRequest {
    pub runtime_id: Namespace,
    pub round: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub runtime_id: Namespace,
    pub round: u64,
    pub method: String,
    #[serde(with = "hex_bytes")]
    pub args: Vec<u8>,
}

/// Validated arguments of one request, built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestParameters {
    Height(HeightQuery),
    Proposal(ProposalQuery),
    Runtime(RuntimeRequest),
    Round(RoundRequest),
    Query(QueryRequest),
}

impl RequestParameters {
    /// Named-params object sent to the node.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

pub fn height_query(q: &QueryParams) -> Result<RequestParameters, ParamError> {
    let height = parse_height(q.get("height"))?;
    Ok(RequestParameters::Height(HeightQuery { height }))
}

pub fn proposal_query(q: &QueryParams) -> Result<RequestParameters, ParamError> {
    let height = parse_height(q.get("height"))?;
    let proposal_id = parse_proposal_id(q.get("id"))?;
    Ok(RequestParameters::Proposal(ProposalQuery { height, proposal_id }))
}

pub fn runtime_request(q: &QueryParams) -> Result<RequestParameters, ParamError> {
    let height = parse_height(q.get("height"))?;
    let runtime_id = parse_namespace(q.get("namespace"))?;
    Ok(RequestParameters::Runtime(RuntimeRequest { height, runtime_id }))
}

pub fn round_request(q: &QueryParams) -> Result<RequestParameters, ParamError> {
    let round = parse_round(q.get("round"))?;
    let runtime_id = parse_namespace(q.get("namespace"))?;
    Ok(RequestParameters::Round(RoundRequest { runtime_id, round }))
}

pub fn runtime_query(q: &QueryParams) -> Result<RequestParameters, ParamError> {
    let round = parse_round(q.get("round"))?;
    let runtime_id = parse_namespace(q.get("namespace"))?;
    let method = require(q.get("method"), ParamError::MissingMethod)?.to_string();
    let args = require(q.get("args"), ParamError::MissingArgs)?.as_bytes().to_vec();
    Ok(RequestParameters::Query(QueryRequest { runtime_id, round, method, args }))
}
