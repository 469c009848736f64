use clap::{Args, Subcommand};

/// Fields of a feeding log.
#[derive(Clone, Debug, Args)]
pub struct FeedingArgs {
    #[arg(long)]
    pub animal: String,
    /// RFC 3339 timestamp, `YYYY-MM-DD HH:MM`, or `YYYY-MM-DD`; defaults to now
    #[arg(long)]
    pub at: Option<String>,
    #[arg(long)]
    pub food: String,
    /// Grams offered
    #[arg(long)]
    pub amount: Option<f64>,
    #[arg(long)]
    pub note: Option<String>,
}

/// Fields of a weight log.
#[derive(Clone, Debug, Args)]
pub struct WeightArgs {
    #[arg(long)]
    pub animal: String,
    #[arg(long)]
    pub at: Option<String>,
    /// Grams
    #[arg(long)]
    pub weight: f64,
    #[arg(long)]
    pub note: Option<String>,
}

/// Fields of a climate log.
#[derive(Clone, Debug, Args)]
pub struct ClimateArgs {
    #[arg(long)]
    pub animal: String,
    #[arg(long)]
    pub at: Option<String>,
    /// Degrees Celsius
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,
    /// Relative humidity, 0-100
    #[arg(long)]
    pub humidity: f64,
    #[arg(long)]
    pub note: Option<String>,
}

/// Feeding log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FeedingCommands {
    /// Record a feeding.
    Add(FeedingArgs),
    /// Overwrite every field of a feeding log.
    Replace {
        id: String,
        #[command(flatten)]
        entry: FeedingArgs,
    },
    /// List feeding logs, newest first.
    List {
        #[arg(long)]
        animal: Option<String>,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Delete feeding logs.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Weight log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum WeightCommands {
    /// Record a weigh-in.
    Add(WeightArgs),
    /// Overwrite every field of a weight log.
    Replace {
        id: String,
        #[command(flatten)]
        entry: WeightArgs,
    },
    /// List weight logs, newest first.
    List {
        #[arg(long)]
        animal: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Delete weight logs.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Climate log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClimateCommands {
    /// Record a temperature and humidity reading.
    Add(ClimateArgs),
    /// Overwrite every field of a climate log.
    Replace {
        id: String,
        #[command(flatten)]
        entry: ClimateArgs,
    },
    /// List climate logs, newest first.
    List {
        #[arg(long)]
        animal: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Delete climate logs.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
