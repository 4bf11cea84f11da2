//! Proposal lifecycle management.
//!
//! Handles creation, voting, resolution and execution of proposals.
//! Resolution runs on every vote against the threshold computed from the
//! membership at that moment, so members joining mid-vote raise the bar.

use super::executor::{execute_action, validate_action};
use super::{Proposal, ProposalAction, ProposalId, ProposalState};
use crate::dao::address::{Caller, NodeAddress};
use crate::dao::audit::AuditAction;
use crate::dao::error::{DaoError, DaoResult};
use crate::dao::state::DaoState;
use crate::dao::traits::NodeRegistry;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

fn ensure_member(state: &DaoState, caller: &Caller) -> DaoResult<NodeAddress> {
    let address = caller.address();
    if !state.members.contains(&address) {
        return Err(DaoError::Unauthorized(format!(
            "{} is not a trusted node DAO member",
            address
        )));
    }
    Ok(address)
}

fn ensure_governance_open(state: &DaoState) -> DaoResult<()> {
    if state.is_bootstrap_active() {
        return Err(DaoError::BootstrapActive);
    }
    Ok(())
}

/// Create a proposal.
///
/// Steps:
/// 1. Caller must be a member and bootstrap must be closed
/// 2. Enforce the per-member cooldown
/// 3. Validate the message and action
/// 4. Store a pending proposal open for `proposal.vote.blocks` heights
pub fn propose(
    state: &mut DaoState,
    message: &str,
    action: ProposalAction,
    caller: &Caller,
) -> DaoResult<ProposalId> {
    let proposer = ensure_member(state, caller)?;
    ensure_governance_open(state)?;

    let cooldown = state.settings.proposal_cooldown();
    if let Some(last) = state.last_proposal_at.get(&proposer) {
        let available_at = last.saturating_add(cooldown);
        if state.height < available_at {
            return Err(DaoError::ProposalCooldown {
                proposer,
                available_at,
            });
        }
    }

    let message = message.trim();
    if message.is_empty() {
        return Err(DaoError::InvalidProposal(
            "proposal message cannot be empty".to_string(),
        ));
    }
    validate_action(state, &action)?;

    let id = ProposalId(state.next_proposal_id);
    let created_at = state.height;
    let expires_at = created_at.saturating_add(state.settings.proposal_vote_blocks());
    let summary = format!("#{}: {} ({})", id, action, message);

    state.proposals.insert(
        id,
        Proposal {
            id,
            proposer,
            message: message.to_string(),
            action,
            votes_for: BTreeSet::new(),
            votes_against: BTreeSet::new(),
            state: ProposalState::Pending,
            created_at,
            expires_at,
            execution_error: None,
        },
    );
    state.next_proposal_id += 1;
    state.last_proposal_at.insert(proposer, created_at);

    info!(proposal = %id, proposer = %proposer, expires_at, "proposal created");
    state.record(proposer, AuditAction::ProposalCreated, summary);
    state.advance();
    Ok(id)
}

/// Cast a vote and resolve the proposal if it crosses a threshold.
///
/// Returns the proposal's state after the vote. A proposal whose action
/// fails to apply stays `Passed` with the reason in `execution_error`; the
/// vote itself is kept.
pub fn vote(
    state: &mut DaoState,
    registry: &impl NodeRegistry,
    id: ProposalId,
    in_favor: bool,
    caller: &Caller,
) -> DaoResult<ProposalState> {
    let voter = ensure_member(state, caller)?;
    ensure_governance_open(state)?;

    let height = state.height;
    let proposal = state.proposals.get(&id).ok_or(DaoError::UnknownProposal(id))?;
    let current = proposal.state_at(height);
    if current != ProposalState::Pending {
        return Err(DaoError::ProposalNotPending { id, state: current });
    }
    if proposal.has_voted(&voter) {
        return Err(DaoError::AlreadyVoted { id, voter });
    }

    let required = state.quorum_votes_required();
    let (votes_for, votes_against) = {
        let f = proposal.votes_for.len() as u64;
        let a = proposal.votes_against.len() as u64;
        if in_favor {
            (f + 1, a)
        } else {
            (f, a + 1)
        }
    };
    let action = proposal.action.clone();

    let outcome = if votes_for >= required {
        ProposalState::Passed
    } else if votes_against >= required {
        ProposalState::Rejected
    } else {
        ProposalState::Pending
    };

    // All checks done; commit.
    let execution = match outcome {
        ProposalState::Passed => Some(execute_action(state, registry, id, &action)),
        _ => None,
    };

    let final_state = match &execution {
        Some(Ok(())) => ProposalState::Executed,
        _ => outcome,
    };

    if let Some(proposal) = state.proposals.get_mut(&id) {
        if in_favor {
            proposal.votes_for.insert(voter);
        } else {
            proposal.votes_against.insert(voter);
        }
        proposal.state = final_state;
        if let Some(Err(e)) = &execution {
            proposal.execution_error = Some(e.to_string());
        }
    }

    debug!(
        proposal = %id,
        voter = %voter,
        in_favor,
        votes_for,
        votes_against,
        required,
        "vote cast"
    );
    state.record(
        voter,
        AuditAction::VoteCast,
        format!(
            "#{} {} ({}/{} for, {} against)",
            id,
            if in_favor { "for" } else { "against" },
            votes_for,
            required,
            votes_against
        ),
    );

    match (outcome, &execution) {
        (ProposalState::Passed, Some(Ok(()))) => {
            info!(proposal = %id, "proposal passed and executed");
            state.record(voter, AuditAction::ProposalPassed, format!("#{}", id));
            state.record(voter, AuditAction::ProposalExecuted, format!("#{}: {}", id, action));
        }
        (ProposalState::Passed, Some(Err(e))) => {
            warn!(proposal = %id, error = %e, "proposal passed but execution failed");
            state.record(voter, AuditAction::ProposalPassed, format!("#{}", id));
            state.record(voter, AuditAction::ExecutionFailed, e.to_string());
        }
        (ProposalState::Rejected, _) => {
            info!(proposal = %id, votes_against, required, "proposal rejected");
            state.record(voter, AuditAction::ProposalRejected, format!("#{}", id));
        }
        _ => {}
    }

    state.advance();
    Ok(final_state)
}

/// Retry execution of a passed proposal whose action previously failed.
///
/// On failure nothing changes and `ExecutionFailed` is returned.
pub fn execute_proposal(
    state: &mut DaoState,
    registry: &impl NodeRegistry,
    id: ProposalId,
    caller: &Caller,
) -> DaoResult<()> {
    let executor = ensure_member(state, caller)?;

    let height = state.height;
    let proposal = state.proposals.get(&id).ok_or(DaoError::UnknownProposal(id))?;
    let current = proposal.state_at(height);
    if current != ProposalState::Passed {
        return Err(DaoError::InvalidProposal(format!(
            "proposal {} is {}, only passed proposals can be executed",
            id, current
        )));
    }
    let action = proposal.action.clone();

    execute_action(state, registry, id, &action)?;

    if let Some(proposal) = state.proposals.get_mut(&id) {
        proposal.state = ProposalState::Executed;
        proposal.execution_error = None;
    }

    info!(proposal = %id, executor = %executor, "passed proposal executed");
    state.record(
        executor,
        AuditAction::ProposalExecuted,
        format!("#{}: {}", id, action),
    );
    state.advance();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::bootstrap::{add_bootstrap_member, set_bootstrap_setting};
    use crate::dao::membership::MemberDetails;
    use crate::dao::registry::InMemoryNodeRegistry;
    use rust_decimal::Decimal;

    const OWNER: NodeAddress = NodeAddress::new([0xaa; 20]);

    fn node(i: u8) -> NodeAddress {
        NodeAddress::new([i; 20])
    }

    fn caller(i: u8) -> Caller {
        Caller::new(node(i))
    }

    fn invite(i: u8) -> ProposalAction {
        ProposalAction::Invite(MemberDetails::new("SaaS_Provider", "test@sass.com", node(i)))
    }

    /// Three trusted members (1, 2, 3); nodes 4..=8 registered but not members.
    fn seeded() -> (DaoState, InMemoryNodeRegistry) {
        let registry: InMemoryNodeRegistry = (1..=8u8).map(node).collect();
        let mut state = DaoState::new(OWNER);
        for i in 1..=3 {
            add_bootstrap_member(
                &mut state,
                &registry,
                MemberDetails::new("rocketpool", "node@home.com", node(i)),
                &Caller::new(OWNER),
            )
            .unwrap();
        }
        (state, registry)
    }

    #[test]
    fn test_propose_requires_member() {
        let (mut state, _) = seeded();
        assert!(matches!(
            propose(&mut state, "hi", invite(4), &caller(4)),
            Err(DaoError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_propose_during_bootstrap() {
        let registry: InMemoryNodeRegistry = (1..=3u8).map(node).collect();
        let mut state = DaoState::new(OWNER);
        add_bootstrap_member(
            &mut state,
            &registry,
            MemberDetails::new("rocketpool", "node@home.com", node(1)),
            &Caller::new(OWNER),
        )
        .unwrap();

        assert_eq!(
            propose(&mut state, "too early", invite(2), &caller(1)),
            Err(DaoError::BootstrapActive)
        );
    }

    #[test]
    fn test_invite_passes_with_two_of_three() {
        let (mut state, registry) = seeded();
        let id = propose(&mut state, "add SaaS", invite(4), &caller(1)).unwrap();
        assert_eq!(id, ProposalId(1));

        assert_eq!(
            vote(&mut state, &registry, id, true, &caller(1)).unwrap(),
            ProposalState::Pending
        );
        assert!(!state.members().contains(&node(4)));

        assert_eq!(
            vote(&mut state, &registry, id, true, &caller(2)).unwrap(),
            ProposalState::Executed
        );
        assert!(state.members().contains(&node(4)));
        assert_eq!(state.member_count(), 4);
    }

    #[test]
    fn test_double_vote_rejected() {
        let (mut state, registry) = seeded();
        let id = propose(&mut state, "add", invite(4), &caller(1)).unwrap();
        vote(&mut state, &registry, id, false, &caller(2)).unwrap();

        assert_eq!(
            vote(&mut state, &registry, id, true, &caller(2)),
            Err(DaoError::AlreadyVoted { id, voter: node(2) })
        );
    }

    #[test]
    fn test_votes_against_reject() {
        let (mut state, registry) = seeded();
        let id = propose(&mut state, "add", invite(4), &caller(1)).unwrap();
        vote(&mut state, &registry, id, false, &caller(2)).unwrap();
        assert_eq!(
            vote(&mut state, &registry, id, false, &caller(3)).unwrap(),
            ProposalState::Rejected
        );
        assert!(matches!(
            vote(&mut state, &registry, id, true, &caller(1)),
            Err(DaoError::ProposalNotPending {
                state: ProposalState::Rejected,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_proposal() {
        let (mut state, registry) = seeded();
        assert_eq!(
            vote(&mut state, &registry, ProposalId(42), true, &caller(1)),
            Err(DaoError::UnknownProposal(ProposalId(42)))
        );
    }

    #[test]
    fn test_threshold_rises_with_membership() {
        let (mut state, registry) = seeded();
        // 0.51 of 3 = 2 votes; of 4 = 3 votes.
        let slow = propose(&mut state, "slow invite", invite(5), &caller(1)).unwrap();
        vote(&mut state, &registry, slow, true, &caller(1)).unwrap();

        let fast = propose(&mut state, "fast invite", invite(4), &caller(2)).unwrap();
        vote(&mut state, &registry, fast, true, &caller(2)).unwrap();
        vote(&mut state, &registry, fast, true, &caller(3)).unwrap();
        assert_eq!(state.member_count(), 4);
        assert_eq!(state.quorum_votes_required(), 3);

        assert_eq!(
            vote(&mut state, &registry, slow, true, &caller(2)).unwrap(),
            ProposalState::Pending
        );
        assert_eq!(
            vote(&mut state, &registry, slow, true, &caller(4)).unwrap(),
            ProposalState::Executed
        );
    }

    #[test]
    fn test_failed_execution_stays_passed_then_retries() {
        let (mut state, mut registry) = seeded();
        let outsider = NodeAddress::new([0x77; 20]);
        let action = ProposalAction::Invite(MemberDetails::new("late", "late@node.io", outsider));
        let id = propose(&mut state, "invite unregistered", action, &caller(1)).unwrap();

        vote(&mut state, &registry, id, true, &caller(1)).unwrap();
        assert_eq!(
            vote(&mut state, &registry, id, true, &caller(2)).unwrap(),
            ProposalState::Passed
        );
        let proposal = state.proposal(id).unwrap();
        assert!(proposal.execution_error.is_some());
        assert_eq!(proposal.votes_for.len(), 2);
        assert!(!state.members().contains(&outsider));

        // Retry fails without touching state.
        let before = state.clone();
        assert!(matches!(
            execute_proposal(&mut state, &registry, id, &caller(3)),
            Err(DaoError::ExecutionFailed { .. })
        ));
        assert_eq!(state, before);

        registry.register(outsider);
        execute_proposal(&mut state, &registry, id, &caller(3)).unwrap();
        assert_eq!(state.proposal_state(id), Some(ProposalState::Executed));
        assert!(state.members().contains(&outsider));
    }

    #[test]
    fn test_execute_requires_passed() {
        let (mut state, registry) = seeded();
        let id = propose(&mut state, "add", invite(4), &caller(1)).unwrap();
        assert!(matches!(
            execute_proposal(&mut state, &registry, id, &caller(1)),
            Err(DaoError::InvalidProposal(_))
        ));
    }

    #[test]
    fn test_proposal_expires_lazily() {
        let registry: InMemoryNodeRegistry = (1..=8u8).map(node).collect();
        let mut state = DaoState::new(OWNER);
        set_bootstrap_setting(&mut state, "proposal.vote.blocks", Decimal::ONE, &Caller::new(OWNER))
            .unwrap();
        for i in 1..=3 {
            add_bootstrap_member(
                &mut state,
                &registry,
                MemberDetails::new("rocketpool", "node@home.com", node(i)),
                &Caller::new(OWNER),
            )
            .unwrap();
        }

        let first = propose(&mut state, "first", invite(4), &caller(1)).unwrap();
        vote(&mut state, &registry, first, true, &caller(1)).unwrap();
        let _second = propose(&mut state, "second", invite(5), &caller(2)).unwrap();

        assert_eq!(state.proposal_state(first), Some(ProposalState::Expired));
        assert_eq!(state.proposal(first).unwrap().state, ProposalState::Pending);
        let before = state.clone();
        assert!(matches!(
            vote(&mut state, &registry, first, true, &caller(2)),
            Err(DaoError::ProposalNotPending {
                state: ProposalState::Expired,
                ..
            })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_cooldown_between_proposals() {
        let registry: InMemoryNodeRegistry = (1..=8u8).map(node).collect();
        let mut state = DaoState::new(OWNER);
        set_bootstrap_setting(
            &mut state,
            "proposal.cooldown",
            Decimal::new(2, 0),
            &Caller::new(OWNER),
        )
        .unwrap();
        for i in 1..=3 {
            add_bootstrap_member(
                &mut state,
                &registry,
                MemberDetails::new("rocketpool", "node@home.com", node(i)),
                &Caller::new(OWNER),
            )
            .unwrap();
        }

        let h = state.height();
        propose(&mut state, "one", invite(4), &caller(1)).unwrap();
        assert_eq!(
            propose(&mut state, "two", invite(5), &caller(1)),
            Err(DaoError::ProposalCooldown {
                proposer: node(1),
                available_at: h + 2,
            })
        );
        // Another member is unaffected, and advances the ledger.
        propose(&mut state, "three", invite(6), &caller(2)).unwrap();
        propose(&mut state, "two again", invite(5), &caller(1)).unwrap();
    }

    #[test]
    fn test_empty_message_rejected() {
        let (mut state, _) = seeded();
        assert!(matches!(
            propose(&mut state, "   ", invite(4), &caller(1)),
            Err(DaoError::InvalidProposal(_))
        ));
        assert_eq!(state.proposals().count(), 0);
    }

    #[test]
    fn test_setting_proposal_changes_quorum() {
        let (mut state, registry) = seeded();
        let action = ProposalAction::SetSetting {
            key: "quorum".to_string(),
            value: Decimal::new(90, 2),
        };
        let id = propose(&mut state, "raise quorum", action, &caller(3)).unwrap();
        vote(&mut state, &registry, id, true, &caller(1)).unwrap();
        vote(&mut state, &registry, id, true, &caller(3)).unwrap();
        assert_eq!(state.settings().quorum(), Decimal::new(90, 2));
        assert_eq!(state.quorum_votes_required(), 3);
    }
}
