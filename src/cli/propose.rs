use super::store;
use rust_decimal::Decimal;
use std::path::Path;
use trustdao::dao::{Caller, MemberDetails, NodeAddress, ProposalAction};

/// Propose inviting a registered node into the DAO
pub fn invite(
    state_path: &Path,
    id: &str,
    email: &str,
    address: &str,
    message: Option<String>,
    from: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let address: NodeAddress = address.parse()?;
    let message = message.unwrap_or_else(|| format!("invite {}", id.trim()));
    let action = ProposalAction::Invite(MemberDetails::new(id, email, address));
    submit(state_path, &message, action, from)
}

/// Propose changing a DAO setting
pub fn setting(
    state_path: &Path,
    key: &str,
    value: &str,
    message: Option<String>,
    from: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let value: Decimal = value
        .parse()
        .map_err(|e| format!("Invalid setting value '{}': {}", value, e))?;
    let message = message.unwrap_or_else(|| format!("set {} to {}", key, value));
    let action = ProposalAction::SetSetting {
        key: key.to_string(),
        value,
    };
    submit(state_path, &message, action, from)
}

fn submit(
    state_path: &Path,
    message: &str,
    action: ProposalAction,
    from: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let caller = Caller::new(from.parse()?);

    let mut dao = store::load(state_path)?;
    let id = dao.propose(message, action, &caller)?;
    store::save(state_path, &dao)?;

    let required = dao.proposal_quorum_votes_required();
    println!("📝 Proposal #{} created", id);
    if let Some(proposal) = dao.proposal(id) {
        println!("   Action: {}", proposal.action);
        println!("   Voting closes after height {}", proposal.expires_at);
    }
    println!("   Votes required: {}", required);
    Ok(())
}
