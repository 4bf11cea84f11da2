use super::store::{self, LocalDao};
use std::path::Path;
use trustdao::dao::NodeAddress;

/// Register a node address with the local node registry
///
/// Only registered nodes can become DAO members. Registering an address
/// that is already known is a no-op.
pub fn execute(state_path: &Path, address: &str) -> Result<(), Box<dyn std::error::Error>> {
    let address: NodeAddress = address.parse()?;

    let dao = store::load(state_path)?;
    let (state, mut nodes) = dao.into_parts();
    let added = nodes.register(address);
    let dao = LocalDao::from_state(state, nodes);

    if added {
        store::save(state_path, &dao)?;
        tracing::info!(node = %address, "registered node");
        println!("✅ Node registered: {}", address);
    } else {
        println!("ℹ️  Node already registered: {}", address);
    }
    Ok(())
}
