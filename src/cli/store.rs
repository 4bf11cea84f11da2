//! DAO state file
//!
//! One CBOR document holding the DAO state and the local node registry.
//! Writes go to a sibling temp file first and are renamed into place, so an
//! interrupted save never leaves a truncated state file behind.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use trustdao::dao::{DaoState, InMemoryNodeRegistry, TrustedNodeDao};
use trustdao::serialization::{from_cbor, to_cbor};

/// DAO handle backed by the local node registry
pub type LocalDao = TrustedNodeDao<InMemoryNodeRegistry>;

#[derive(Deserialize)]
struct StateFile {
    dao: DaoState,
    nodes: InMemoryNodeRegistry,
}

#[derive(Serialize)]
struct StateFileRef<'a> {
    dao: &'a DaoState,
    nodes: &'a InMemoryNodeRegistry,
}

/// Load the DAO from `path`
pub fn load(path: &Path) -> Result<LocalDao, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!(
            "No DAO state at '{}'. Run 'trustdao init --owner <address>' first.",
            path.display()
        )
        .into());
    }

    let bytes = fs::read(path)
        .map_err(|e| format!("Failed to read state file '{}': {}", path.display(), e))?;
    let file: StateFile = from_cbor(&bytes)
        .map_err(|e| format!("Corrupt state file '{}': {}", path.display(), e))?;

    tracing::debug!(
        path = %path.display(),
        height = file.dao.height(),
        members = file.dao.member_count(),
        "loaded DAO state"
    );

    Ok(TrustedNodeDao::from_state(file.dao, file.nodes))
}

/// Persist the DAO to `path`
pub fn save(path: &Path, dao: &LocalDao) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = to_cbor(&StateFileRef {
        dao: dao.state(),
        nodes: dao.registry(),
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create state directory: {}", e))?;
        }
    }

    let tmp = path.with_extension("cbor.tmp");
    fs::write(&tmp, &bytes)
        .map_err(|e| format!("Failed to write state file '{}': {}", tmp.display(), e))?;
    fs::rename(&tmp, path)
        .map_err(|e| format!("Failed to replace state file '{}': {}", path.display(), e))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved DAO state");
    Ok(())
}
