use clap::Subcommand;

/// Species commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SpeciesCommands {
    /// Create a species.
    Create {
        #[arg(long)]
        name: String,
    },
    /// Rename a species.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Get a species by ID.
    Get { id: String },
    /// List species.
    List {
        #[arg(long)]
        name: Option<String>,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Delete species. Refused while animals still reference one.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
