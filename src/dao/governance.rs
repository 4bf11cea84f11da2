//! Trusted node DAO facade.
//!
//! Binds the explicit [`DaoState`] to a node-registration oracle and exposes
//! the governance operations and read accessors callers use. Every mutating
//! method takes the caller's identity explicitly.

use super::address::{Caller, NodeAddress};
use super::audit::AuditEntry;
use super::bootstrap;
use super::error::DaoResult;
use super::membership::{Member, MemberDetails};
use super::proposals::{self, Proposal, ProposalAction, ProposalId, ProposalState};
use super::state::DaoState;
use super::traits::NodeRegistry;
use rust_decimal::Decimal;

/// Trusted node DAO.
#[derive(Debug, Clone)]
pub struct TrustedNodeDao<R: NodeRegistry> {
    state: DaoState,
    registry: R,
}

impl<R: NodeRegistry> TrustedNodeDao<R> {
    /// Genesis DAO administered by `owner`.
    pub fn new(owner: NodeAddress, registry: R) -> Self {
        Self {
            state: DaoState::new(owner),
            registry,
        }
    }

    /// Resume from previously persisted state.
    pub fn from_state(state: DaoState, registry: R) -> Self {
        Self { state, registry }
    }

    pub fn state(&self) -> &DaoState {
        &self.state
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn into_parts(self) -> (DaoState, R) {
        (self.state, self.registry)
    }

    // Bootstrap

    pub fn add_bootstrap_member(
        &mut self,
        id: &str,
        email: &str,
        address: NodeAddress,
        caller: &Caller,
    ) -> DaoResult<()> {
        bootstrap::add_bootstrap_member(
            &mut self.state,
            &self.registry,
            MemberDetails::new(id, email, address),
            caller,
        )
    }

    pub fn set_bootstrap_setting(
        &mut self,
        key: &str,
        value: Decimal,
        caller: &Caller,
    ) -> DaoResult<()> {
        bootstrap::set_bootstrap_setting(&mut self.state, key, value, caller)
    }

    // Proposals

    pub fn propose(
        &mut self,
        message: &str,
        action: ProposalAction,
        caller: &Caller,
    ) -> DaoResult<ProposalId> {
        proposals::propose(&mut self.state, message, action, caller)
    }

    pub fn vote(
        &mut self,
        proposal_id: ProposalId,
        in_favor: bool,
        caller: &Caller,
    ) -> DaoResult<ProposalState> {
        proposals::vote(&mut self.state, &self.registry, proposal_id, in_favor, caller)
    }

    pub fn execute(&mut self, proposal_id: ProposalId, caller: &Caller) -> DaoResult<()> {
        proposals::execute_proposal(&mut self.state, &self.registry, proposal_id, caller)
    }

    // Accessors

    pub fn member_count(&self) -> usize {
        self.state.member_count()
    }

    pub fn setting(&self, key: &str) -> DaoResult<Decimal> {
        self.state.settings().get(key)
    }

    pub fn proposal_quorum_votes_required(&self) -> u64 {
        self.state.quorum_votes_required()
    }

    pub fn is_bootstrap_active(&self) -> bool {
        self.state.is_bootstrap_active()
    }

    pub fn is_member(&self, address: &NodeAddress) -> bool {
        self.state.members().contains(address)
    }

    pub fn member(&self, address: &NodeAddress) -> DaoResult<&Member> {
        self.state.members().get(address)
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.state.proposal(id)
    }

    pub fn proposal_state(&self, id: ProposalId) -> Option<ProposalState> {
        self.state.proposal_state(id)
    }

    pub fn audit_log(&self) -> &[AuditEntry] {
        self.state.audit_log()
    }

    pub fn height(&self) -> u64 {
        self.state.height()
    }
}
