use clap::{Subcommand, ValueEnum};

/// Chart projections over the current collections.
#[derive(Clone, Debug, Subcommand)]
pub enum ChartCommands {
    /// Species → name → genotype → sex counting tree.
    Groups,
    /// Treemap nodes built from the counting tree.
    Treemap,
    /// Genotype pie slices per animal name.
    Pie,
    /// Sex counts per genotype, grouped by animal name.
    Bar,
    /// Weight over time for one animal.
    Weight {
        #[arg(long)]
        animal: String,
    },
    /// Temperature and humidity over time for one animal.
    Climate {
        #[arg(long)]
        animal: String,
    },
}

/// Filter dropdowns that can be listed with `th options`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OptionKind {
    Species,
    Name,
    Sex,
    Container,
}
