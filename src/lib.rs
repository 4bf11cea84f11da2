//! Trusted Node DAO - governance core for a decentralized node network
//!
//! Manages admission to a privileged set of trusted nodes, the settings that
//! govern it, and the move from owner-driven bootstrap to member proposals
//! and quorum votes.
//!
//! Key principles:
//! - Explicit state object, explicit caller identity on every operation
//! - Check-then-commit: failed operations leave state untouched
//! - Bootstrap phase derived from member count, never stored
//! - Exact decimal quorum arithmetic

pub mod dao;
pub mod serialization;
