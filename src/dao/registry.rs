//! In-memory node registry.
//!
//! Used by the operator CLI (persisted next to the DAO state) and by tests.

use super::address::NodeAddress;
use super::traits::NodeRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of registered node addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryNodeRegistry {
    nodes: BTreeSet<NodeAddress>,
}

impl InMemoryNodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node. Returns false if it was already registered.
    pub fn register(&mut self, address: NodeAddress) -> bool {
        self.nodes.insert(address)
    }

    /// Builder-style registration for test setup.
    pub fn with_node(mut self, address: NodeAddress) -> Self {
        self.nodes.insert(address);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeAddress> {
        self.nodes.iter()
    }
}

impl NodeRegistry for InMemoryNodeRegistry {
    fn is_registered_node(&self, address: &NodeAddress) -> bool {
        self.nodes.contains(address)
    }
}

impl FromIterator<NodeAddress> for InMemoryNodeRegistry {
    fn from_iter<I: IntoIterator<Item = NodeAddress>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}
