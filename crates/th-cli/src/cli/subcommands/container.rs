use clap::Subcommand;

/// Housing container commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ContainerCommands {
    /// Create a box or cabinet.
    Create {
        #[arg(long)]
        name: String,
        /// box or cabinet
        #[arg(long, default_value = "box")]
        kind: String,
    },
    /// Update a container.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        kind: Option<String>,
    },
    /// Get a container by ID.
    Get { id: String },
    /// List containers.
    List {
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Delete containers together with their slots.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
