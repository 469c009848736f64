use schemars::schema_for;
use th_core::entities::{
    Animal, ClimateLog, FeedingLog, HousingContainer, HousingSlot, SpeciesType, WeightLog,
};
use th_core::enums::{ContainerKind, Sex};
use th_core::palette::LabelColor;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Type names accepted by `th schema`.
pub const SCHEMA_TYPES: &[&str] = &[
    "species",
    "animal",
    "container",
    "slot",
    "feeding_log",
    "weight_log",
    "climate_log",
    "sex",
    "container_kind",
    "label_color",
];

fn schema_json(type_name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name.trim().replace('-', "_").as_str() {
        "species" | "species_type" => schema_for!(SpeciesType),
        "animal" => schema_for!(Animal),
        "container" | "housing_container" => schema_for!(HousingContainer),
        "slot" | "housing_slot" => schema_for!(HousingSlot),
        "feeding_log" | "feeding" => schema_for!(FeedingLog),
        "weight_log" | "weight" => schema_for!(WeightLog),
        "climate_log" | "climate" => schema_for!(ClimateLog),
        "sex" => schema_for!(Sex),
        "container_kind" => schema_for!(ContainerKind),
        "label_color" => schema_for!(LabelColor),
        _ => anyhow::bail!(
            "unknown schema type '{type_name}'; expected one of: {}",
            SCHEMA_TYPES.join(", ")
        ),
    };
    Ok(serde_json::to_value(schema)?)
}

/// Handle `th schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_json(&args.type_name)?, flags.format)
}
