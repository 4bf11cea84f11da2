//! Trait abstractions for the DAO's external collaborators.
//!
//! Node registration lives outside the governance core; the core only asks
//! whether an address has registered. Keeping the question behind a trait
//! lets tests swap in an in-memory registry.

use super::address::NodeAddress;

/// Node-registration oracle.
pub trait NodeRegistry {
    /// Whether `address` is a registered node.
    fn is_registered_node(&self, address: &NodeAddress) -> bool;
}

impl<R: NodeRegistry + ?Sized> NodeRegistry for &R {
    fn is_registered_node(&self, address: &NodeAddress) -> bool {
        (**self).is_registered_node(address)
    }
}

impl<R: NodeRegistry + ?Sized> NodeRegistry for Box<R> {
    fn is_registered_node(&self, address: &NodeAddress) -> bool {
        (**self).is_registered_node(address)
    }
}
