//! Bootstrap mode.
//!
//! Until the DAO has `MIN_BOOTSTRAP_MEMBERS` members the owner seeds it
//! directly: adding members and changing settings without a vote. The phase
//! is derived from the member count, so the add that reaches the minimum
//! closes bootstrap permanently.
//!
//! Check order for both operations: owner, then phase, then the delegated
//! registry or settings checks.

use super::address::Caller;
use super::audit::AuditAction;
use super::error::{DaoError, DaoResult};
use super::membership::MemberDetails;
use super::state::{DaoState, MIN_BOOTSTRAP_MEMBERS};
use super::traits::NodeRegistry;
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Bootstrap phase, derived from the member count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    /// Fewer than the minimum members; the owner may seed the DAO.
    Active { members_needed: usize },
    /// Minimum reached; only proposals change the DAO from here on.
    Closed,
}

impl BootstrapPhase {
    pub fn of(state: &DaoState) -> Self {
        let count = state.member_count();
        if count < MIN_BOOTSTRAP_MEMBERS {
            Self::Active {
                members_needed: MIN_BOOTSTRAP_MEMBERS - count,
            }
        } else {
            Self::Closed
        }
    }
}

fn ensure_bootstrap_owner(state: &DaoState, caller: &Caller) -> DaoResult<()> {
    if caller.address() != state.owner {
        return Err(DaoError::Unauthorized(format!(
            "{} is not the DAO owner",
            caller.address()
        )));
    }
    if !state.is_bootstrap_active() {
        return Err(DaoError::BootstrapClosed);
    }
    Ok(())
}

/// Add a member directly while bootstrap is active.
pub fn add_bootstrap_member(
    state: &mut DaoState,
    registry: &impl NodeRegistry,
    details: MemberDetails,
    caller: &Caller,
) -> DaoResult<()> {
    ensure_bootstrap_owner(state, caller)?;

    let bond = state.settings.rpl_bond();
    let height = state.height;
    let member = state.members.add(details, bond, height, registry)?;
    let summary = format!("{} joined as '{}' ({})", member.address, member.id, member.email);

    info!(member = %member.address, id = %member.id, "bootstrap member added");
    state.record(caller.address(), AuditAction::BootstrapMember, summary);

    if let BootstrapPhase::Closed = BootstrapPhase::of(state) {
        info!(
            members = state.member_count(),
            "minimum member count reached, bootstrap mode closed"
        );
        state.record(
            caller.address(),
            AuditAction::BootstrapClosed,
            format!("{} members, proposals now required", state.member_count()),
        );
    }

    state.advance();
    Ok(())
}

/// Change a setting directly while bootstrap is active.
pub fn set_bootstrap_setting(
    state: &mut DaoState,
    key: &str,
    value: Decimal,
    caller: &Caller,
) -> DaoResult<()> {
    ensure_bootstrap_owner(state, caller)?;

    state.settings.set(key, value)?;

    debug!(key, %value, "bootstrap setting updated");
    state.record(
        caller.address(),
        AuditAction::BootstrapSetting,
        format!("{} = {}", key, value),
    );
    state.advance();
    Ok(())
}
