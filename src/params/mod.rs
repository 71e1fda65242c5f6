//! Parameter validation.
//!
//! Turns the untyped query string into typed, range-checked request
//! arguments. Everything in here runs before a connection to the node is
//! opened.
//!
//! Every validator returns `Result`; there are no in-band "invalid" values.
//! The one documented default is an empty `height`, which is a valid
//! [`Height::Latest`].

pub mod error;
pub mod height;
pub mod namespace;
pub mod query;
pub mod request;

pub use error::ParamError;
pub use height::{parse_height, Height, HEIGHT_LATEST};
pub use namespace::{parse_namespace, Namespace, NamespaceError, NAMESPACE_SIZE};
pub use query::QueryParams;
pub use request::{
    height_query, proposal_query, round_request, runtime_query, runtime_request,
    HeightQuery, ProposalQuery, QueryRequest, RequestParameters, RoundRequest, RuntimeRequest,
};

/// Parse a required round number.
pub fn parse_round(raw: &str) -> Result<u64, ParamError> {
    if raw.is_empty() {
        return Err(ParamError::MissingRound);
    }
    raw.parse::<u64>().map_err(|_| ParamError::InvalidRound(raw.to_string()))
}

/// Parse a required governance proposal id.
pub fn parse_proposal_id(raw: &str) -> Result<u64, ParamError> {
    raw.parse::<u64>().map_err(|_| ParamError::InvalidProposalId(raw.to_string()))
}

/// Presence-only check for free-form `method`/`args`; the node owns semantics.
pub fn require<'a>(raw: &'a str, missing: ParamError) -> Result<&'a str, ParamError> {
    if raw.is_empty() {
        Err(missing)
    } else {
        Ok(raw)
    }
}
