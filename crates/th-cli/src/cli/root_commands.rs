use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AnimalCommands, ChartCommands, ClimateCommands, ContainerCommands, FeedingCommands,
    OptionKind, SlotCommands, SpeciesCommands, WeightCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize tailhouse for a project.
    Init(InitArgs),
    /// Species.
    Species {
        #[command(subcommand)]
        action: SpeciesCommands,
    },
    /// Animals.
    Animal {
        #[command(subcommand)]
        action: AnimalCommands,
    },
    /// Housing containers (boxes and cabinets).
    Container {
        #[command(subcommand)]
        action: ContainerCommands,
    },
    /// Cabinet slots.
    Slot {
        #[command(subcommand)]
        action: SlotCommands,
    },
    /// Feeding logs.
    Feeding {
        #[command(subcommand)]
        action: FeedingCommands,
    },
    /// Weight logs.
    Weight {
        #[command(subcommand)]
        action: WeightCommands,
    },
    /// Temperature and humidity logs.
    Climate {
        #[command(subcommand)]
        action: ClimateCommands,
    },
    /// Chart projections.
    Chart {
        #[command(subcommand)]
        action: ChartCommands,
    },
    /// Slot grid of a cabinet.
    Cabinet(CabinetArgs),
    /// Deduplicated filter options.
    Options {
        #[arg(value_enum)]
        kind: OptionKind,
    },
    /// Pull and push changes with the remote replica.
    Sync,
    /// Dump JSON schema for an entity type.
    Schema(SchemaArgs),
}

/// Arguments for `th init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory)
    #[arg(default_value = ".")]
    pub path: String,
}

/// Arguments for `th cabinet`.
#[derive(Clone, Debug, Args)]
pub struct CabinetArgs {
    pub container_id: String,
}

/// Arguments for `th schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub type_name: String,
}
