use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ParamError;

/// Wire value the node interprets as "most recent committed height".
pub const HEIGHT_LATEST: i64 = 0;

/// A consensus height, or the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Height {
    /// Resolved by the node, not by the gateway.
    #[default]
    Latest,
    At(i64),
}

impl Height {
    /// Value sent to the node.
    pub fn as_wire(self) -> i64 {
        match self {
            Height::Latest => HEIGHT_LATEST,
            Height::At(h) => h,
        }
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Height::Latest => f.write_str("latest"),
            Height::At(h) => write!(f, "{}", h),
        }
    }
}

impl Serialize for Height {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Height {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(d)?;
        Ok(if raw == HEIGHT_LATEST { Height::Latest } else { Height::At(raw) })
    }
}

/// Empty means latest. Anything else must be a signed 64-bit decimal.
///
/// Negative values pass: range checks belong to the node, which knows its
/// genesis height.
pub fn parse_height(raw: &str) -> Result<Height, ParamError> {
    if raw.is_empty() {
        tracing::debug!("no height specified, using latest");
        return Ok(Height::Latest);
    }
    match raw.parse::<i64>() {
        Ok(h) => Ok(Height::At(h)),
        Err(_) => {
            tracing::warn!(received = raw, "unexpected height, required string of int");
            Err(ParamError::InvalidHeight(raw.to_string()))
        }
    }
}
