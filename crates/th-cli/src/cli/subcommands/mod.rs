mod animal;
mod chart;
mod container;
mod logs;
mod slot;
mod species;

pub use animal::{AnimalCommands, AnimalCreateArgs, AnimalFilterArgs, AnimalUpdateArgs};
pub use chart::{ChartCommands, OptionKind};
pub use container::ContainerCommands;
pub use logs::{
    ClimateArgs, ClimateCommands, FeedingArgs, FeedingCommands, WeightArgs, WeightCommands,
};
pub use slot::SlotCommands;
pub use species::SpeciesCommands;
