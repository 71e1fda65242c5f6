use thiserror::Error;

/// Rejected query parameter. The message is returned to the client verbatim;
/// the offending raw value is kept for the log line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("Unexpected value found, height needs to be string of int!")]
    InvalidHeight(String),

    #[error("Failed to retrieve round, not specified!")]
    MissingRound,

    #[error("Unexpected value found, round needs to be string of unsigned int!")]
    InvalidRound(String),

    #[error("Unexpected value found, id needs to be a string representing an int!")]
    InvalidProposalId(String),

    #[error("namespace can't be empty!")]
    MissingNamespace,

    #[error("Failed to UnmarshalText into Namespace.")]
    InvalidNamespace(String),

    #[error("Failed to retrieve method, not specified!")]
    MissingMethod,

    #[error("Failed to retrieve args, not specified!")]
    MissingArgs,
}

impl ParamError {
    /// Name of the query parameter that failed.
    pub fn param(&self) -> &'static str {
        match self {
            ParamError::InvalidHeight(_) => "height",
            ParamError::MissingRound | ParamError::InvalidRound(_) => "round",
            ParamError::InvalidProposalId(_) => "id",
            ParamError::MissingNamespace | ParamError::InvalidNamespace(_) => "namespace",
            ParamError::MissingMethod => "method",
            ParamError::MissingArgs => "args",
        }
    }

    /// The raw value the client sent, when there was one.
    pub fn received(&self) -> Option<&str> {
        match self {
            ParamError::InvalidHeight(v)
            | ParamError::InvalidRound(v)
            | ParamError::InvalidProposalId(v)
            | ParamError::InvalidNamespace(v) => Some(v),
            _ => None,
        }
    }
}
