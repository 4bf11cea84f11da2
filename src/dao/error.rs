//! DAO error taxonomy.
//!
//! Every failure is returned to the caller before any state is touched.

use super::address::NodeAddress;
use super::proposals::{ProposalId, ProposalState};

/// Governance operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DaoError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid node: {0} is not a registered node")]
    NotARegisteredNode(NodeAddress),

    #[error("This node is already part of the trusted node DAO: {0}")]
    DuplicateMember(NodeAddress),

    #[error("Bootstrap mode not engaged, min DAO member count has been met")]
    BootstrapClosed,

    #[error("Bootstrap mode engaged, min DAO member count has not been met")]
    BootstrapActive,

    #[error("Invalid value for setting '{key}': {reason}")]
    InvalidSettingValue { key: String, reason: String },

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Unknown member: {0}")]
    UnknownMember(NodeAddress),

    #[error("Unknown proposal: {0}")]
    UnknownProposal(ProposalId),

    #[error("Proposal {id} is not pending (state: {state})")]
    ProposalNotPending { id: ProposalId, state: ProposalState },

    #[error("Member {voter} has already voted on proposal {id}")]
    AlreadyVoted { id: ProposalId, voter: NodeAddress },

    #[error("Proposal {id} execution failed: {reason}")]
    ExecutionFailed { id: ProposalId, reason: String },

    #[error("Member {proposer} cannot propose again until height {available_at}")]
    ProposalCooldown {
        proposer: NodeAddress,
        available_at: u64,
    },

    #[error("Invalid proposal: {0}")]
    InvalidProposal(String),

    #[error("Invalid member details: {0}")]
    InvalidMemberDetails(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// DAO result type.
pub type DaoResult<T> = Result<T, DaoError>;
