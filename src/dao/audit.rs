//! Audit trail of committed governance operations.
//!
//! Append-only. Entries are ordered by ledger height; several entries can
//! share a height when one operation has more than one effect (a vote that
//! passes and executes a proposal, for example).

use super::address::NodeAddress;
use serde::{Deserialize, Serialize};

/// Kind of governance action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    /// Owner added a member during bootstrap.
    BootstrapMember,
    /// Owner changed a setting during bootstrap.
    BootstrapSetting,
    /// Bootstrap closed because the minimum member count was reached.
    BootstrapClosed,
    ProposalCreated,
    VoteCast,
    ProposalPassed,
    ProposalRejected,
    ProposalExecuted,
    /// A passed proposal's action could not be applied.
    ExecutionFailed,
}

impl AuditAction {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BootstrapMember => "Bootstrap Member",
            Self::BootstrapSetting => "Bootstrap Setting",
            Self::BootstrapClosed => "Bootstrap Closed",
            Self::ProposalCreated => "Proposal Created",
            Self::VoteCast => "Vote Cast",
            Self::ProposalPassed => "Proposal Passed",
            Self::ProposalRejected => "Proposal Rejected",
            Self::ProposalExecuted => "Proposal Executed",
            Self::ExecutionFailed => "Execution Failed",
        }
    }
}

/// Single audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Ledger height the operation was committed at.
    pub height: u64,
    /// Who invoked the operation.
    pub actor: NodeAddress,
    pub action: AuditAction,
    /// Human-readable details.
    pub details: String,
}

/// Query options for the audit log.
#[derive(Debug, Clone)]
pub struct AuditQuery {
    pub action: Option<AuditAction>,
    pub actor: Option<NodeAddress>,
    /// Limit number of results (most recent first).
    pub limit: Option<usize>,
    /// Only entries strictly after this height.
    pub after_height: Option<u64>,
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            action: None,
            actor: None,
            limit: Some(50),
            after_height: None,
        }
    }
}

/// Filter the audit log. Returns entries most recent first.
pub fn query_audit_log(entries: &[AuditEntry], query: &AuditQuery) -> Vec<AuditEntry> {
    let mut filtered: Vec<AuditEntry> = entries
        .iter()
        .rev()
        .filter(|entry| {
            if let Some(ref action) = query.action {
                if &entry.action != action {
                    return false;
                }
            }
            if let Some(ref actor) = query.actor {
                if &entry.actor != actor {
                    return false;
                }
            }
            if let Some(after) = query.after_height {
                if entry.height <= after {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    if let Some(limit) = query.limit {
        filtered.truncate(limit);
    }

    filtered
}

/// Format entries for terminal output.
pub fn format_audit_log(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries found.".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "#{:<6} {:<18} {}  {}\n",
            entry.height,
            entry.action.display_name(),
            entry.actor.short(),
            entry.details
        ));
    }
    output
}
