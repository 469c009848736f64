use clap::{Args, Subcommand};

/// Equality filters shared by `animal list` and `animal delete`.
///
/// Each flag accepts `all` to leave the column unfiltered.
#[derive(Clone, Debug, Default, Args)]
pub struct AnimalFilterArgs {
    /// Species ID
    #[arg(long)]
    pub species: Option<String>,
    /// male, female, probable_male, probable_female, unknown
    #[arg(long)]
    pub sex: Option<String>,
    /// Container ID
    #[arg(long)]
    pub container: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    /// Genotype signature, traits joined by "、"
    #[arg(long)]
    pub signature: Option<String>,
}

/// Arguments for `th animal create`.
#[derive(Clone, Debug, Args)]
pub struct AnimalCreateArgs {
    #[arg(long)]
    pub name: String,
    /// Species ID
    #[arg(long)]
    pub species: String,
    #[arg(long)]
    pub nickname: Option<String>,
    #[arg(long)]
    pub sex: Option<String>,
    /// Genotype trait; repeat or separate with commas
    #[arg(long = "trait", value_delimiter = ',')]
    pub traits: Vec<String>,
    /// Container ID; taken from the slot when only --slot is given
    #[arg(long)]
    pub container: Option<String>,
    #[arg(long)]
    pub slot: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<String>,
    /// Grams
    #[arg(long)]
    pub weight: Option<f64>,
}

/// Arguments for `th animal update`. Nullable fields accept `none` to clear.
#[derive(Clone, Debug, Args)]
pub struct AnimalUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub species: Option<String>,
    #[arg(long)]
    pub nickname: Option<String>,
    #[arg(long)]
    pub sex: Option<String>,
    /// Replace all traits; repeat or separate with commas
    #[arg(long = "trait", value_delimiter = ',')]
    pub traits: Vec<String>,
    #[arg(long, conflicts_with = "traits")]
    pub clear_traits: bool,
    #[arg(long)]
    pub container: Option<String>,
    #[arg(long)]
    pub slot: Option<String>,
    #[arg(long)]
    pub birth_date: Option<String>,
    #[arg(long)]
    pub weight: Option<String>,
}

/// Animal commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AnimalCommands {
    /// Create an animal.
    Create(AnimalCreateArgs),
    /// Update an animal.
    Update(AnimalUpdateArgs),
    /// Get an animal by ID.
    Get { id: String },
    /// List animals.
    List {
        #[command(flatten)]
        filters: AnimalFilterArgs,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Delete the given animals plus every animal matching the filters.
    Delete {
        ids: Vec<String>,
        #[command(flatten)]
        filters: AnimalFilterArgs,
    },
}
