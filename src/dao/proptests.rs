//! Property-based tests for the governance core
//!
//! Tests for:
//! - Quorum: ceiling semantics, monotonicity, bounds
//! - Settings: quorum domain enforcement
//! - Atomicity: rejected operations leave state and height untouched
//! - Voting: vote sets stay disjoint, one vote per member

use super::address::{Caller, NodeAddress};
use super::governance::TrustedNodeDao;
use super::membership::MemberDetails;
use super::proposals::{ProposalAction, ProposalId};
use super::quorum::votes_required;
use super::registry::InMemoryNodeRegistry;
use super::settings::{SettingsStore, QUORUM_MAX, QUORUM_MIN};
use proptest::prelude::*;
use rust_decimal::Decimal;

const OWNER: NodeAddress = NodeAddress::new([0xee; 20]);

fn node(i: u8) -> NodeAddress {
    NodeAddress::new([i; 20])
}

/// Quorum in [0.51, 0.90] with two decimal places.
fn quorum_strategy() -> impl Strategy<Value = Decimal> {
    (51i64..=90).prop_map(|n| Decimal::new(n, 2))
}

/// Nodes 1..=20 registered; nodes 1..=3 seeded as members.
fn seeded_dao() -> TrustedNodeDao<InMemoryNodeRegistry> {
    let registry: InMemoryNodeRegistry = (1..=20u8).map(node).collect();
    let mut dao = TrustedNodeDao::new(OWNER, registry);
    for i in 1..=3 {
        dao.add_bootstrap_member("seed", "seed@node.io", node(i), &Caller::new(OWNER))
            .unwrap();
    }
    dao
}

#[derive(Debug, Clone)]
enum Op {
    Bootstrap { caller: u8, target: u8 },
    Setting { caller: u8, hundredths: i64 },
    Propose { caller: u8, target: u8 },
    Vote { caller: u8, proposal: u64, in_favor: bool },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..25, 0u8..25).prop_map(|(caller, target)| Op::Bootstrap { caller, target }),
        (0u8..25, 0i64..120).prop_map(|(caller, hundredths)| Op::Setting { caller, hundredths }),
        (0u8..25, 0u8..25).prop_map(|(caller, target)| Op::Propose { caller, target }),
        (0u8..25, 0u64..6, any::<bool>())
            .prop_map(|(caller, proposal, in_favor)| Op::Vote { caller, proposal, in_favor }),
    ]
}

// ============================================================================
// QUORUM PROPERTY TESTS
// ============================================================================

proptest! {
    /// Property: threshold is the smallest integer not below quorum * count
    #[test]
    fn votes_required_is_ceiling(count in 0usize..10_000, quorum in quorum_strategy()) {
        let required = votes_required(count, quorum);
        let product = quorum * Decimal::from(count as u64);

        prop_assert!(Decimal::from(required) >= product);
        if required > 0 {
            prop_assert!(Decimal::from(required - 1) < product);
        }
    }

    /// Property: more members never lowers the threshold
    #[test]
    fn votes_required_monotonic_in_members(count in 0usize..10_000, quorum in quorum_strategy()) {
        prop_assert!(votes_required(count + 1, quorum) >= votes_required(count, quorum));
    }

    /// Property: a majority is always required and never more than everyone
    #[test]
    fn votes_required_is_majority(count in 1usize..10_000, quorum in quorum_strategy()) {
        let required = votes_required(count, quorum);
        prop_assert!(required as usize <= count);
        prop_assert!(required * 2 > count as u64);
    }
}

// ============================================================================
// SETTINGS PROPERTY TESTS
// ============================================================================

proptest! {
    /// Property: quorum writes succeed exactly inside [0.51, 0.90]
    #[test]
    fn quorum_domain_enforced(ten_thousandths in -20_000i64..20_000) {
        let value = Decimal::new(ten_thousandths, 4);
        let mut store = SettingsStore::genesis();
        let before = store.clone();

        let result = store.set("quorum", value);
        if value >= QUORUM_MIN && value <= QUORUM_MAX {
            prop_assert!(result.is_ok());
            prop_assert_eq!(store.quorum(), value);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(store, before);
        }
    }
}

// ============================================================================
// STATE MACHINE PROPERTY TESTS
// ============================================================================

proptest! {
    /// Property: a rejected operation changes nothing, a committed one
    /// advances the height by exactly one
    #[test]
    fn operations_are_all_or_nothing(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let registry: InMemoryNodeRegistry = (1..=20u8).map(node).collect();
        let mut dao = TrustedNodeDao::new(OWNER, registry);

        for op in ops {
            let before = dao.state().clone();
            let result = match op {
                Op::Bootstrap { caller, target } => {
                    let caller = if caller == 0 { OWNER } else { node(caller) };
                    dao.add_bootstrap_member("n", "n@node.io", node(target), &Caller::new(caller))
                }
                Op::Setting { caller, hundredths } => {
                    let caller = if caller == 0 { OWNER } else { node(caller) };
                    dao.set_bootstrap_setting("quorum", Decimal::new(hundredths, 2), &Caller::new(caller))
                }
                Op::Propose { caller, target } => dao
                    .propose(
                        "invite",
                        ProposalAction::Invite(MemberDetails::new("n", "n@node.io", node(target))),
                        &Caller::new(node(caller)),
                    )
                    .map(|_| ()),
                Op::Vote { caller, proposal, in_favor } => dao
                    .vote(ProposalId(proposal), in_favor, &Caller::new(node(caller)))
                    .map(|_| ()),
            };

            match result {
                Ok(()) => prop_assert_eq!(dao.height(), before.height() + 1),
                Err(_) => prop_assert_eq!(dao.state(), &before),
            }

            // Bootstrap can never reopen
            if before.member_count() >= 3 {
                prop_assert!(!dao.is_bootstrap_active());
            }
        }
    }

    /// Property: vote sets stay disjoint and each member votes at most once
    #[test]
    fn vote_sets_disjoint(votes in prop::collection::vec((1u8..=3, any::<bool>()), 1..20)) {
        let mut dao = seeded_dao();
        let id = dao
            .propose(
                "invite ten",
                ProposalAction::Invite(MemberDetails::new("ten", "ten@node.io", node(10))),
                &Caller::new(node(1)),
            )
            .unwrap();

        for (voter, in_favor) in votes {
            let _ = dao.vote(id, in_favor, &Caller::new(node(voter)));
            let proposal = dao.proposal(id).unwrap();
            prop_assert!(proposal.votes_for.is_disjoint(&proposal.votes_against));
            prop_assert!(proposal.votes_for.len() + proposal.votes_against.len() <= 3);
        }
    }
}
