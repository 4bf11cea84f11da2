//! DAO state.
//!
//! The single state object every governance operation receives. Fields are
//! only reachable inside `dao`; callers outside go through the operations
//! and read accessors.

use super::address::NodeAddress;
use super::audit::{AuditAction, AuditEntry};
use super::membership::MembershipRegistry;
use super::proposals::{Proposal, ProposalId, ProposalState};
use super::quorum::votes_required;
use super::settings::SettingsStore;
use crate::serialization::{from_cbor, to_cbor, SerializationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Members needed before bootstrap closes for good.
pub const MIN_BOOTSTRAP_MEMBERS: usize = 3;

/// Current schema version of persisted state.
pub const SCHEMA_VERSION: u64 = 1;

/// Trusted node DAO state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaoState {
    /// Administrator allowed to drive bootstrap.
    pub(super) owner: NodeAddress,
    pub(super) members: MembershipRegistry,
    pub(super) settings: SettingsStore,
    pub(super) proposals: BTreeMap<ProposalId, Proposal>,
    pub(super) next_proposal_id: u64,
    /// Height of each member's most recent proposal (cooldown tracking).
    #[serde(default)]
    pub(super) last_proposal_at: BTreeMap<NodeAddress, u64>,
    #[serde(default)]
    pub(super) audit_log: Vec<AuditEntry>,
    /// Number of committed mutating operations.
    pub(super) height: u64,
    pub(super) schema_version: u64,
}

impl DaoState {
    /// Genesis state: no members, default settings.
    pub fn new(owner: NodeAddress) -> Self {
        Self {
            owner,
            members: MembershipRegistry::new(),
            settings: SettingsStore::genesis(),
            proposals: BTreeMap::new(),
            next_proposal_id: 1,
            last_proposal_at: BTreeMap::new(),
            audit_log: Vec::new(),
            height: 0,
            schema_version: SCHEMA_VERSION,
        }
    }

    pub fn owner(&self) -> NodeAddress {
        self.owner
    }

    pub fn members(&self) -> &MembershipRegistry {
        &self.members
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn member_count(&self) -> usize {
        self.members.count()
    }

    /// Bootstrap is live only while membership is below the minimum. There
    /// is no flag to flip back: once the count is reached it stays closed.
    pub fn is_bootstrap_active(&self) -> bool {
        self.members.count() < MIN_BOOTSTRAP_MEMBERS
    }

    /// Votes needed to pass a proposal right now.
    pub fn quorum_votes_required(&self) -> u64 {
        votes_required(self.members.count(), self.settings.quorum())
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    /// Effective state of a proposal at the current height.
    pub fn proposal_state(&self, id: ProposalId) -> Option<ProposalState> {
        self.proposals.get(&id).map(|p| p.state_at(self.height))
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    pub fn audit_log(&self) -> &[AuditEntry] {
        &self.audit_log
    }

    pub(super) fn record(&mut self, actor: NodeAddress, action: AuditAction, details: String) {
        self.audit_log.push(AuditEntry {
            height: self.height,
            actor,
            action,
            details,
        });
    }

    /// Close out a committed operation.
    pub(super) fn advance(&mut self) {
        self.height += 1;
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        to_cbor(self)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        from_cbor(bytes)
    }
}
