use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform JSON body: exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Result { result: Value },
    Error { error: String },
}

impl Envelope {
    pub fn result(result: Value) -> Self {
        Envelope::Result { result }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Error { error: message.into() }
    }
}
