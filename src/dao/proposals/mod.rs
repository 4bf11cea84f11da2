//! Proposal system for post-bootstrap governance.
//!
//! - Only members propose and vote, and only once bootstrap has closed
//! - One vote per member per proposal
//! - Resolution is re-checked on every vote against the live threshold
//! - Expiry is evaluated lazily from the ledger height

pub mod executor;
pub mod lifecycle;

use super::address::NodeAddress;
use super::membership::MemberDetails;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub use executor::execute_action;
pub use lifecycle::{execute_proposal, propose, vote};

/// Proposal identifier, assigned monotonically from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProposalId(pub u64);

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Proposal lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalState {
    /// Open for voting.
    Pending,
    /// Threshold reached; the action has not been applied (yet).
    Passed,
    /// Enough members voted against that the threshold is blocked.
    Rejected,
    /// Threshold reached and the action applied.
    Executed,
    /// Voting window elapsed while still pending.
    Expired,
}

impl ProposalState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Passed => "Passed",
            Self::Rejected => "Rejected",
            Self::Executed => "Executed",
            Self::Expired => "Expired",
        };
        f.write_str(name)
    }
}

/// Action a proposal applies once it passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalAction {
    /// Admit a registered node as a trusted member.
    Invite(MemberDetails),
    /// Change a DAO setting.
    SetSetting { key: String, value: Decimal },
}

impl fmt::Display for ProposalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invite(details) => write!(
                f,
                "invite {} ({}, {})",
                details.address, details.id, details.email
            ),
            Self::SetSetting { key, value } => write!(f, "set {} = {}", key, value),
        }
    }
}

/// A governance proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: NodeAddress,
    pub message: String,
    pub action: ProposalAction,
    pub votes_for: BTreeSet<NodeAddress>,
    pub votes_against: BTreeSet<NodeAddress>,
    /// Stored state. Use [`Proposal::state_at`] for the effective state.
    pub state: ProposalState,
    /// Ledger height at creation.
    pub created_at: u64,
    /// Last ledger height at which votes are accepted.
    pub expires_at: u64,
    /// Why the last execution attempt failed, if it did.
    #[serde(default)]
    pub execution_error: Option<String>,
}

impl Proposal {
    /// Effective state at `height`. A pending proposal past its window reads
    /// as expired without being rewritten.
    pub fn state_at(&self, height: u64) -> ProposalState {
        if self.state == ProposalState::Pending && height > self.expires_at {
            ProposalState::Expired
        } else {
            self.state
        }
    }

    pub fn has_voted(&self, voter: &NodeAddress) -> bool {
        self.votes_for.contains(voter) || self.votes_against.contains(voter)
    }
}
