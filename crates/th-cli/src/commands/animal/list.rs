use serde::Serialize;
use th_core::entities::Animal;
use th_db::repos::collections::Collections;
use th_view::grouping::genotype_signature;
use th_view::table::Page;

use crate::cli::subcommands::AnimalFilterArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output_page;

use super::animal_query;

/// Compact animal row for terminal tables, with ids resolved to names.
#[derive(Debug, Clone, Serialize)]
struct AnimalTableRow {
    id: String,
    name: String,
    species: String,
    sex: String,
    traits: String,
    container: String,
    weight: Option<f64>,
}

impl AnimalTableRow {
    fn from_animal(animal: &Animal, collections: &Collections) -> Self {
        Self {
            id: animal.id.clone(),
            name: animal.name.clone(),
            species: collections.species_name(&animal.species_id).to_string(),
            sex: animal.sex.map_or("-", |sex| sex.label()).to_string(),
            traits: genotype_signature(&animal.traits),
            container: animal
                .container_id
                .as_deref()
                .map_or_else(|| String::from("-"), |id| collections.container_name(id).to_string()),
            weight: animal.weight,
        }
    }
}

pub async fn run(filters: &AnimalFilterArgs, page: usize, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = animal_query(filters, page, ctx.page_size)?;

    if flags.format != OutputFormat::Table {
        let rows = ctx.service.list_animals().await?;
        return output_page(&query.run(&rows), flags.format);
    }

    let collections = ctx.service.load_collections().await?;
    let page = query.run(&collections.animals);
    let table = Page {
        rows: page
            .rows
            .iter()
            .map(|animal| AnimalTableRow::from_animal(animal, &collections))
            .collect(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        page_count: page.page_count,
    };
    output_page(&table, flags.format)
}
