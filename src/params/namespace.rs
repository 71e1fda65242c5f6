use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::ParamError;

/// Size of a runtime namespace in bytes.
pub const NAMESPACE_SIZE: usize = 32;

/// Identifier of one runtime hosted by a node.
///
/// The text form is standard base64, which is what the node marshals and what
/// clients send. 64 hex digits are accepted as well.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace([u8; NAMESPACE_SIZE]);

#[derive(Debug, Error)]
pub enum NamespaceError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("expected {NAMESPACE_SIZE} bytes, got {0}")]
    Length(usize),
}

impl Namespace {
    pub fn from_bytes(bytes: [u8; NAMESPACE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NAMESPACE_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&STANDARD.encode(self.0))
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({})", self.to_hex())
    }
}

impl FromStr for Namespace {
    type Err = NamespaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; NAMESPACE_SIZE];
        if s.len() == NAMESPACE_SIZE * 2 {
            hex::decode_to_slice(s, &mut out)?;
            return Ok(Self(out));
        }

        // An unescaped '+' reaches us as a space after query-string decoding.
        let text = s.replace(' ', "+");
        let bytes = STANDARD.decode(text.as_bytes())?;
        if bytes.len() != NAMESPACE_SIZE {
            return Err(NamespaceError::Length(bytes.len()));
        }
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Namespace {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Empty and malformed are reported as different errors.
pub fn parse_namespace(raw: &str) -> Result<Namespace, ParamError> {
    if raw.is_empty() {
        tracing::warn!("namespace can't be empty");
        return Err(ParamError::MissingNamespace);
    }
    raw.parse::<Namespace>().map_err(|e| {
        tracing::warn!(received = raw, error = %e, "failed to decode namespace");
        ParamError::InvalidNamespace(raw.to_string())
    })
}
