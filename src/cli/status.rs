use super::store::{self, LocalDao};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use trustdao::dao::audit::{format_audit_log, query_audit_log, AuditQuery};
use trustdao::dao::{BootstrapPhase, ProposalState};

/// Snapshot of the DAO for operators
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub owner: String,
    pub height: u64,
    pub bootstrap_active: bool,
    pub members_needed: usize,
    pub member_count: usize,
    pub votes_required: u64,
    pub registered_nodes: usize,
    pub settings: Vec<SettingEntry>,
    pub members: Vec<MemberEntry>,
    pub proposals: Vec<ProposalEntry>,
}

#[derive(Debug, Serialize)]
pub struct SettingEntry {
    pub key: String,
    pub value: Decimal,
}

#[derive(Debug, Serialize)]
pub struct MemberEntry {
    pub address: String,
    pub id: String,
    pub email: String,
    pub bond_amount: Decimal,
    pub joined_at: u64,
}

#[derive(Debug, Serialize)]
pub struct ProposalEntry {
    pub id: u64,
    pub state: ProposalState,
    pub action: String,
    pub message: String,
    pub votes_for: usize,
    pub votes_against: usize,
    pub expires_at: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_error: Option<String>,
}

impl StatusReport {
    pub fn build(dao: &LocalDao) -> Self {
        let state = dao.state();
        let height = state.height();
        let members_needed = match BootstrapPhase::of(state) {
            BootstrapPhase::Active { members_needed } => members_needed,
            BootstrapPhase::Closed => 0,
        };

        Self {
            owner: state.owner().to_string(),
            height,
            bootstrap_active: dao.is_bootstrap_active(),
            members_needed,
            member_count: dao.member_count(),
            votes_required: dao.proposal_quorum_votes_required(),
            registered_nodes: dao.registry().len(),
            settings: state
                .settings()
                .iter()
                .map(|(key, value)| SettingEntry {
                    key: key.to_string(),
                    value,
                })
                .collect(),
            members: state
                .members()
                .iter()
                .map(|m| MemberEntry {
                    address: m.address.to_string(),
                    id: m.id.clone(),
                    email: m.email.clone(),
                    bond_amount: m.bond_amount,
                    joined_at: m.joined_at,
                })
                .collect(),
            proposals: state
                .proposals()
                .map(|p| ProposalEntry {
                    id: p.id.0,
                    state: p.state_at(height),
                    action: p.action.to_string(),
                    message: p.message.clone(),
                    votes_for: p.votes_for.len(),
                    votes_against: p.votes_against.len(),
                    expires_at: p.expires_at,
                    execution_error: p.execution_error.clone(),
                })
                .collect(),
        }
    }
}

/// Show DAO status
pub fn execute(state_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dao = store::load(state_path)?;
    let report = StatusReport::build(&dao);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("📊 Trusted Node DAO Status");
    println!();
    println!("  Owner: {}", report.owner);
    println!("  Height: {}", report.height);
    if report.bootstrap_active {
        println!(
            "  Phase: bootstrap ({} more member(s) needed)",
            report.members_needed
        );
    } else {
        println!("  Phase: governance");
    }
    println!(
        "  Members: {} ({} vote(s) required to pass)",
        report.member_count, report.votes_required
    );
    println!("  Registered nodes: {}", report.registered_nodes);

    println!();
    println!("  Settings:");
    for s in &report.settings {
        println!("    {:<22} {}", s.key, s.value);
    }

    if !report.members.is_empty() {
        println!();
        println!("  Members:");
        for m in &report.members {
            println!(
                "    {} {} <{}> bond {} joined @{}",
                m.address, m.id, m.email, m.bond_amount, m.joined_at
            );
        }
    }

    if !report.proposals.is_empty() {
        println!();
        println!("  Proposals:");
        for p in &report.proposals {
            println!(
                "    #{} [{}] {} ({} for / {} against, closes @{})",
                p.id, p.state, p.action, p.votes_for, p.votes_against, p.expires_at
            );
            if let Some(err) = &p.execution_error {
                println!("        execution failed: {}", err);
            }
        }
    }

    Ok(())
}

/// Show recent audit log entries
pub fn audit(state_path: &Path, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let dao = store::load(state_path)?;
    let query = AuditQuery {
        limit: Some(limit),
        ..Default::default()
    };
    let entries = query_audit_log(dao.audit_log(), &query);
    println!("{}", format_audit_log(&entries));
    Ok(())
}
