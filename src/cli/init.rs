use super::store::{self, LocalDao};
use std::path::Path;
use trustdao::dao::{InMemoryNodeRegistry, NodeAddress, MIN_BOOTSTRAP_MEMBERS};

/// Action to take based on state file validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateAction {
    /// No state file yet, create one
    CreateNew,
    /// State file exists and --force was specified, replace it
    ForceReplace,
}

/// Decide whether `init` may write a fresh state file at `state_path`
pub fn validate_state_file(state_path: &Path, force: bool) -> Result<StateAction, String> {
    match (state_path.exists(), force) {
        (false, _) => Ok(StateAction::CreateNew),
        (true, true) => Ok(StateAction::ForceReplace),
        (true, false) => Err(format!(
            "DAO state already exists at: {}",
            state_path.display()
        )),
    }
}

/// Create a new DAO owned by `owner`
///
/// The new DAO has no members and genesis settings, and starts in bootstrap
/// mode. The node registry starts empty.
pub fn execute(state_path: &Path, owner: &str, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let owner: NodeAddress = owner.parse()?;

    if let Err(msg) = validate_state_file(state_path, force) {
        return Err(format!(
            "{}\n\
            To start over, use the --force flag:\n\
            trustdao init --owner {} --force",
            msg, owner
        )
        .into());
    }

    let dao = LocalDao::new(owner, InMemoryNodeRegistry::new());
    store::save(state_path, &dao)?;

    tracing::info!(owner = %owner, path = %state_path.display(), "initialized DAO");

    println!("✅ Trusted node DAO initialized");
    println!("   Owner: {}", owner);
    println!("   State: {}", state_path.display());
    println!();
    println!(
        "Bootstrap mode is active until {} members have been added.",
        MIN_BOOTSTRAP_MEMBERS
    );
    Ok(())
}
