use std::collections::HashMap;

/// Raw query-string parameters of one request.
///
/// An absent key reads as the empty string, so "missing" and "empty" are the
/// same thing to every validator. A repeated key keeps its first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Builder-style insert, mostly for tests and local callers.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = HashMap::new();
        for (k, v) in iter {
            params.entry(k.into()).or_insert_with(|| v.into());
        }
        Self(params)
    }
}
