//! Proposal execution.
//!
//! Applies a passed proposal's action through the registry and settings
//! contracts. Each action is checked in full before anything is written, so
//! a failed execution leaves the DAO untouched.

use super::{ProposalAction, ProposalId};
use crate::dao::error::{DaoError, DaoResult};
use crate::dao::state::DaoState;
use crate::dao::traits::NodeRegistry;
use tracing::info;

/// Check that `action` is well-formed, independent of current membership.
///
/// Run at proposal time. Admission checks that depend on live state
/// (duplicate member, registration) are deferred to execution.
pub fn validate_action(state: &DaoState, action: &ProposalAction) -> DaoResult<()> {
    match action {
        ProposalAction::Invite(details) => {
            if details.id.trim().is_empty() || details.email.trim().is_empty() {
                return Err(DaoError::InvalidMemberDetails(
                    "invite requires a member id and email".to_string(),
                ));
            }
            Ok(())
        }
        ProposalAction::SetSetting { key, value } => {
            state.settings.check(key, *value).map(|_| ())
        }
    }
}

/// Apply an action to the DAO.
///
/// Returns `ExecutionFailed` carrying the underlying reason.
pub fn execute_action(
    state: &mut DaoState,
    registry: &impl NodeRegistry,
    id: ProposalId,
    action: &ProposalAction,
) -> DaoResult<()> {
    let failed = |e: DaoError| DaoError::ExecutionFailed {
        id,
        reason: e.to_string(),
    };

    match action {
        ProposalAction::Invite(details) => {
            let bond = state.settings.rpl_bond();
            let height = state.height;
            let member = state
                .members
                .add(details.clone(), bond, height, registry)
                .map_err(failed)?;
            info!(proposal = %id, member = %member.address, "member admitted by proposal");
        }
        ProposalAction::SetSetting { key, value } => {
            state.settings.set(key, *value).map_err(failed)?;
            info!(proposal = %id, key = %key, value = %value, "setting changed by proposal");
        }
    }
    Ok(())
}
