use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// One configured node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub node_name: String,
    pub ws_url: String,
}

impl NodeEntry {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { node_name: name.into(), ws_url: address.into() }
    }

    pub fn name(&self) -> &str {
        &self.node_name
    }

    pub fn address(&self) -> &str {
        &self.ws_url
    }
}

/// Immutable name -> address table.
#[derive(Debug, Clone, Default)]
pub struct NodeDirectory {
    entries: Vec<NodeEntry>,
}

impl NodeDirectory {
    pub fn new(entries: Vec<NodeEntry>) -> Self {
        Self { entries }
    }

    /// Exact, case-sensitive lookup; the first matching entry wins.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        match self.entries.iter().find(|e| e.node_name == name) {
            Some(entry) => {
                info!(node = name, "requested node was found");
                Some(entry.address())
            }
            None => {
                error!(node = name, "requested node was not found, check if configured");
                None
            }
        }
    }

    /// Configured names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(NodeEntry::name).collect()
    }

    pub fn entries(&self) -> &[NodeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<NodeEntry>> for NodeDirectory {
    fn from(entries: Vec<NodeEntry>) -> Self {
        Self::new(entries)
    }
}
