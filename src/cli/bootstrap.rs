use super::store;
use rust_decimal::Decimal;
use std::path::Path;
use trustdao::dao::{BootstrapPhase, Caller, NodeAddress};

/// Add a member directly while the DAO is in bootstrap mode (owner only)
pub fn add_member(
    state_path: &Path,
    id: &str,
    email: &str,
    address: &str,
    from: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let address: NodeAddress = address.parse()?;
    let caller = Caller::new(from.parse()?);

    let mut dao = store::load(state_path)?;
    dao.add_bootstrap_member(id, email, address, &caller)?;
    store::save(state_path, &dao)?;

    println!("✅ Bootstrap member added: {} ({})", id.trim(), address);
    match BootstrapPhase::of(dao.state()) {
        BootstrapPhase::Active { members_needed } => {
            println!("   {} more member(s) needed to close bootstrap", members_needed)
        }
        BootstrapPhase::Closed => {
            println!("🔒 Bootstrap closed. Further changes require proposals.")
        }
    }
    Ok(())
}

/// Change a setting directly while the DAO is in bootstrap mode (owner only)
pub fn set_setting(
    state_path: &Path,
    key: &str,
    value: &str,
    from: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let value: Decimal = value
        .parse()
        .map_err(|e| format!("Invalid setting value '{}': {}", value, e))?;
    let caller = Caller::new(from.parse()?);

    let mut dao = store::load(state_path)?;
    dao.set_bootstrap_setting(key, value, &caller)?;
    store::save(state_path, &dao)?;

    println!("✅ Setting updated: {} = {}", key, value);
    Ok(())
}
