//! Serde adapters for byte payloads that travel as hex text.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serializer};

/// `#[serde(with = "hex_bytes")]` for opaque `Vec<u8>` fields.
pub mod hex_bytes {
    use super::*;

    pub fn serialize<S>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        hex::decode(&s).map_err(D::Error::custom)
    }
}
