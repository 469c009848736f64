use clap::Subcommand;
use clap::builder::RangedI64ValueParser;
use th_core::entities::HousingSlot;

/// Column and row flags accept `0..=HousingSlot::MAX_INDEX`.
fn slot_index() -> RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(0..=i64::from(HousingSlot::MAX_INDEX))
}

/// Cabinet slot commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SlotCommands {
    /// Create a slot in a cabinet.
    Create {
        #[arg(long)]
        container: String,
        #[arg(long, value_parser = slot_index())]
        column: u32,
        #[arg(long, value_parser = slot_index())]
        row: u32,
    },
    /// Move a slot within or between cabinets.
    Update {
        id: String,
        #[arg(long)]
        container: Option<String>,
        #[arg(long, value_parser = slot_index())]
        column: Option<u32>,
        #[arg(long, value_parser = slot_index())]
        row: Option<u32>,
    },
    /// List slots.
    List {
        #[arg(long)]
        container: Option<String>,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Delete slots.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
