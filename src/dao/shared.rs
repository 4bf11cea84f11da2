//! Serialized access for concurrent callers.
//!
//! Nearly every operation reads and may write membership and settings, so
//! the whole DAO sits behind one mutex; operations never interleave.

use super::address::{Caller, NodeAddress};
use super::error::DaoResult;
use super::governance::TrustedNodeDao;
use super::proposals::{ProposalAction, ProposalId, ProposalState};
use super::traits::NodeRegistry;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloneable handle to a DAO shared between tasks.
pub struct SharedDao<R: NodeRegistry> {
    inner: Arc<Mutex<TrustedNodeDao<R>>>,
}

impl<R: NodeRegistry> Clone for SharedDao<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: NodeRegistry> SharedDao<R> {
    pub fn new(dao: TrustedNodeDao<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dao)),
        }
    }

    /// Run `f` with exclusive access to the DAO.
    pub async fn with<T>(&self, f: impl FnOnce(&mut TrustedNodeDao<R>) -> T) -> T {
        let mut dao = self.inner.lock().await;
        f(&mut *dao)
    }

    pub async fn add_bootstrap_member(
        &self,
        id: &str,
        email: &str,
        address: NodeAddress,
        caller: &Caller,
    ) -> DaoResult<()> {
        self.with(|dao| dao.add_bootstrap_member(id, email, address, caller))
            .await
    }

    pub async fn set_bootstrap_setting(
        &self,
        key: &str,
        value: Decimal,
        caller: &Caller,
    ) -> DaoResult<()> {
        self.with(|dao| dao.set_bootstrap_setting(key, value, caller))
            .await
    }

    pub async fn propose(
        &self,
        message: &str,
        action: ProposalAction,
        caller: &Caller,
    ) -> DaoResult<ProposalId> {
        self.with(|dao| dao.propose(message, action, caller)).await
    }

    pub async fn vote(
        &self,
        proposal_id: ProposalId,
        in_favor: bool,
        caller: &Caller,
    ) -> DaoResult<ProposalState> {
        self.with(|dao| dao.vote(proposal_id, in_favor, caller))
            .await
    }

    pub async fn member_count(&self) -> usize {
        self.with(|dao| dao.member_count()).await
    }

    pub async fn proposal_quorum_votes_required(&self) -> u64 {
        self.with(|dao| dao.proposal_quorum_votes_required()).await
    }
}
