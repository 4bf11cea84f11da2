use super::store;
use std::path::Path;
use trustdao::dao::{Caller, ProposalId, ProposalState};

/// Cast a vote on a pending proposal
pub fn execute(
    state_path: &Path,
    proposal: u64,
    against: bool,
    from: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let caller = Caller::new(from.parse()?);
    let id = ProposalId(proposal);

    let mut dao = store::load(state_path)?;
    let outcome = dao.vote(id, !against, &caller)?;
    store::save(state_path, &dao)?;

    println!(
        "🗳️  Vote recorded on proposal #{}: {}",
        id,
        if against { "against" } else { "for" }
    );
    match outcome {
        ProposalState::Pending => {
            if let Some(p) = dao.proposal(id) {
                println!(
                    "   {} for / {} against, {} required",
                    p.votes_for.len(),
                    p.votes_against.len(),
                    dao.proposal_quorum_votes_required()
                );
            }
        }
        ProposalState::Executed => println!("✅ Proposal passed and executed"),
        ProposalState::Passed => {
            let reason = dao
                .proposal(id)
                .and_then(|p| p.execution_error.clone())
                .unwrap_or_default();
            println!("⚠️  Proposal passed but execution failed: {}", reason);
            println!("   Retry with: trustdao execute --proposal {} --from <member>", id);
        }
        ProposalState::Rejected => println!("❌ Proposal rejected"),
        ProposalState::Expired => println!("⌛ Proposal expired"),
    }
    Ok(())
}

/// Retry execution of a passed proposal
pub fn retry(state_path: &Path, proposal: u64, from: &str) -> Result<(), Box<dyn std::error::Error>> {
    let caller = Caller::new(from.parse()?);
    let id = ProposalId(proposal);

    let mut dao = store::load(state_path)?;
    dao.execute(id, &caller)?;
    store::save(state_path, &dao)?;

    println!("✅ Proposal #{} executed", id);
    Ok(())
}
