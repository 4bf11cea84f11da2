use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod bootstrap;
pub mod config;
pub mod init;
pub mod propose;
pub mod register;
pub mod status;
pub mod store;
pub mod version;
pub mod vote;

use config::{default_config_path, DaoConfig, LoggingConfig};

#[derive(Parser)]
#[command(name = "trustdao")]
#[command(author = "Trusted Node DAO Project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Operator CLI for the trusted node DAO", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.local/share/trustdao/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Path to DAO state file (overrides [state] path from config)
    #[arg(long, global = true)]
    pub state: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new DAO in bootstrap mode
    Init {
        /// Owner address (0x-prefixed, 20 bytes hex)
        #[arg(long)]
        owner: String,

        /// Replace an existing state file
        #[arg(long)]
        force: bool,
    },

    /// Register a node address with the local node registry
    RegisterNode {
        #[arg(long)]
        address: String,
    },

    /// Add a member directly during bootstrap (owner only)
    BootstrapMember {
        #[arg(long)]
        id: String,

        #[arg(long)]
        email: String,

        /// Node address of the new member
        #[arg(long)]
        address: String,

        /// Caller address
        #[arg(long)]
        from: String,
    },

    /// Change a setting directly during bootstrap (owner only)
    BootstrapSetting {
        /// Setting key (e.g. quorum, rplbond)
        #[arg(long)]
        key: String,

        #[arg(long)]
        value: String,

        /// Caller address
        #[arg(long)]
        from: String,
    },

    /// Propose inviting a registered node
    ProposeInvite {
        #[arg(long)]
        id: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        address: String,

        /// Proposal message (default: "invite <id>")
        #[arg(long)]
        message: Option<String>,

        /// Proposing member's address
        #[arg(long)]
        from: String,
    },

    /// Propose changing a setting
    ProposeSetting {
        #[arg(long)]
        key: String,

        #[arg(long)]
        value: String,

        #[arg(long)]
        message: Option<String>,

        #[arg(long)]
        from: String,
    },

    /// Vote on a pending proposal (in favor unless --against)
    Vote {
        #[arg(long)]
        proposal: u64,

        /// Vote against instead of in favor
        #[arg(long)]
        against: bool,

        #[arg(long)]
        from: String,
    },

    /// Retry execution of a passed proposal
    Execute {
        #[arg(long)]
        proposal: u64,

        #[arg(long)]
        from: String,
    },

    /// Show DAO status
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recent audit log entries
    Audit {
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Display version information
    Version,
}

/// Initialize tracing from RUST_LOG, falling back to the configured level
pub fn init_logging(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| format!("Invalid log level '{}': {}", logging.level, e))?;

    let result = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("Failed to open log file '{}': {}", path.display(), e))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    // A subscriber may already be installed (tests); keep it.
    let _ = result;
    Ok(())
}

pub async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Version = cli.command {
        version::execute();
        return Ok(());
    }

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let config = DaoConfig::load_or_create(&config_path)?;
    init_logging(&config.logging)?;

    let state_path = cli.state.map(PathBuf::from).unwrap_or(config.state.path);
    tracing::debug!(config = %config_path.display(), state = %state_path.display(), "resolved paths");

    match cli.command {
        Commands::Init { owner, force } => init::execute(&state_path, &owner, force),
        Commands::RegisterNode { address } => register::execute(&state_path, &address),
        Commands::BootstrapMember {
            id,
            email,
            address,
            from,
        } => bootstrap::add_member(&state_path, &id, &email, &address, &from),
        Commands::BootstrapSetting { key, value, from } => {
            bootstrap::set_setting(&state_path, &key, &value, &from)
        }
        Commands::ProposeInvite {
            id,
            email,
            address,
            message,
            from,
        } => propose::invite(&state_path, &id, &email, &address, message, &from),
        Commands::ProposeSetting {
            key,
            value,
            message,
            from,
        } => propose::setting(&state_path, &key, &value, message, &from),
        Commands::Vote {
            proposal,
            against,
            from,
        } => vote::execute(&state_path, proposal, against, &from),
        Commands::Execute { proposal, from } => vote::retry(&state_path, proposal, &from),
        Commands::Status { json } => status::execute(&state_path, json),
        Commands::Audit { limit } => status::audit(&state_path, limit),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
