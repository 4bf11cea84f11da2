//! Trusted node DAO governance core.
//!
//! Two phases:
//! - Bootstrap: the owner seeds members and settings directly until the DAO
//!   has `MIN_BOOTSTRAP_MEMBERS` members
//! - Governance: members propose and vote; passed proposals admit members or
//!   change settings
//!
//! All state lives in [`DaoState`]; every operation receives it explicitly
//! along with the caller's identity and either fully applies or returns an
//! error without touching it.

pub mod address;
pub mod audit;
pub mod bootstrap;
pub mod error;
pub mod governance;
pub mod membership;
pub mod proposals;
pub mod quorum;
pub mod registry;
pub mod settings;
pub mod shared;
pub mod state;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use address::{Caller, NodeAddress};
pub use bootstrap::BootstrapPhase;
pub use error::{DaoError, DaoResult};
pub use governance::TrustedNodeDao;
pub use membership::{Member, MemberDetails};
pub use proposals::{Proposal, ProposalAction, ProposalId, ProposalState};
pub use quorum::votes_required;
pub use registry::InMemoryNodeRegistry;
pub use settings::{SettingKey, SettingsStore};
pub use shared::SharedDao;
pub use state::{DaoState, MIN_BOOTSTRAP_MEMBERS};
pub use traits::NodeRegistry;
