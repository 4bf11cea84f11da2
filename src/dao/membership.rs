//! Membership registry for the trusted node set.
//!
//! Members are only ever added. Admission requires the address to be a
//! registered node and not already a member.

use super::address::NodeAddress;
use super::error::{DaoError, DaoResult};
use super::traits::NodeRegistry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A trusted member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub address: NodeAddress,
    /// Display name, e.g. the operator's organisation.
    pub id: String,
    /// Contact email.
    pub email: String,
    /// Bond recorded at admission.
    pub bond_amount: Decimal,
    /// Ledger height at which the member joined.
    pub joined_at: u64,
}

/// Details supplied when admitting a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetails {
    pub id: String,
    pub email: String,
    pub address: NodeAddress,
}

impl MemberDetails {
    pub fn new(id: impl Into<String>, email: impl Into<String>, address: NodeAddress) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            address,
        }
    }
}

/// Authoritative set of trusted members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRegistry {
    members: BTreeMap<NodeAddress, Member>,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, address: &NodeAddress) -> bool {
        self.members.contains_key(address)
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn get(&self, address: &NodeAddress) -> DaoResult<&Member> {
        self.members
            .get(address)
            .ok_or(DaoError::UnknownMember(*address))
    }

    /// Members ordered by address.
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Run every admission check without mutating.
    pub fn check_admission(
        &self,
        details: &MemberDetails,
        registry: &impl NodeRegistry,
    ) -> DaoResult<()> {
        if details.id.trim().is_empty() {
            return Err(DaoError::InvalidMemberDetails(
                "member id cannot be empty".to_string(),
            ));
        }
        if details.email.trim().is_empty() {
            return Err(DaoError::InvalidMemberDetails(
                "member email cannot be empty".to_string(),
            ));
        }
        if self.contains(&details.address) {
            return Err(DaoError::DuplicateMember(details.address));
        }
        if !registry.is_registered_node(&details.address) {
            return Err(DaoError::NotARegisteredNode(details.address));
        }
        Ok(())
    }

    /// Admit a member.
    pub fn add(
        &mut self,
        details: MemberDetails,
        bond_amount: Decimal,
        joined_at: u64,
        registry: &impl NodeRegistry,
    ) -> DaoResult<&Member> {
        self.check_admission(&details, registry)?;

        let address = details.address;
        let member = Member {
            address,
            id: details.id.trim().to_string(),
            email: details.email.trim().to_string(),
            bond_amount,
            joined_at,
        };
        Ok(self.members.entry(address).or_insert(member))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::registry::InMemoryNodeRegistry;

    fn addr(id: u8) -> NodeAddress {
        NodeAddress::new([id; 20])
    }

    fn details(id: u8) -> MemberDetails {
        MemberDetails::new("rocketpool", "node@home.com", addr(id))
    }

    #[test]
    fn test_add_registered_node() {
        let nodes = InMemoryNodeRegistry::new().with_node(addr(1));
        let mut members = MembershipRegistry::new();

        let member = members
            .add(details(1), Decimal::new(15_000, 0), 4, &nodes)
            .unwrap();
        assert_eq!(member.id, "rocketpool");
        assert_eq!(member.joined_at, 4);
        assert!(members.contains(&addr(1)));
        assert_eq!(members.count(), 1);
    }

    #[test]
    fn test_add_unregistered_node_fails() {
        let nodes = InMemoryNodeRegistry::new();
        let mut members = MembershipRegistry::new();

        let result = members.add(details(1), Decimal::ZERO, 0, &nodes);
        assert_eq!(result.unwrap_err(), DaoError::NotARegisteredNode(addr(1)));
        assert_eq!(members.count(), 0);
    }

    #[test]
    fn test_add_duplicate_fails() {
        let nodes = InMemoryNodeRegistry::new().with_node(addr(1));
        let mut members = MembershipRegistry::new();
        members.add(details(1), Decimal::ZERO, 0, &nodes).unwrap();

        let result = members.add(details(1), Decimal::ZERO, 1, &nodes);
        assert_eq!(result.unwrap_err(), DaoError::DuplicateMember(addr(1)));
        assert_eq!(members.get(&addr(1)).unwrap().joined_at, 0);
    }

    #[test]
    fn test_empty_details_rejected() {
        let nodes = InMemoryNodeRegistry::new().with_node(addr(1));
        let mut members = MembershipRegistry::new();

        let blank_id = MemberDetails::new("  ", "node@home.com", addr(1));
        assert!(matches!(
            members.add(blank_id, Decimal::ZERO, 0, &nodes),
            Err(DaoError::InvalidMemberDetails(_))
        ));

        let blank_email = MemberDetails::new("rocketpool", "", addr(1));
        assert!(matches!(
            members.add(blank_email, Decimal::ZERO, 0, &nodes),
            Err(DaoError::InvalidMemberDetails(_))
        ));
    }

    #[test]
    fn test_get_unknown_member() {
        let members = MembershipRegistry::new();
        assert_eq!(
            members.get(&addr(9)).unwrap_err(),
            DaoError::UnknownMember(addr(9))
        );
    }
}
