mod create;
mod delete;
mod list;
mod update;

use th_core::entities::Animal;
use th_core::enums::Sex;
use th_view::table::{Filter, FilterValue, TableQuery};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AnimalCommands, AnimalFilterArgs};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `th animal`.
pub async fn handle(action: &AnimalCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AnimalCommands::Create(args) => create::run(args, ctx, flags).await,
        AnimalCommands::Update(args) => update::run(args, ctx, flags).await,
        AnimalCommands::Get { id } => output(&ctx.service.get_animal(id).await?, flags.format),
        AnimalCommands::List { filters, page } => list::run(filters, *page, ctx, flags).await,
        AnimalCommands::Delete { ids, filters } => delete::run(ids, filters, ctx, flags).await,
    }
}

/// Build the animal table query. The sex filter is checked against the closed set.
fn animal_query(filters: &AnimalFilterArgs, page: usize, page_size: usize) -> anyhow::Result<TableQuery<'static, Animal>> {
    let sex = match FilterValue::from_option(filters.sex.as_deref()) {
        FilterValue::Exact(raw) => FilterValue::Exact(parse_enum::<Sex>(&raw, "sex")?.as_str().to_string()),
        FilterValue::All => FilterValue::All,
    };

    Ok(TableQuery::new(page, page_size)
        .with_filter(Filter::field(
            "species_id",
            FilterValue::from_option(filters.species.as_deref()),
        ))
        .with_filter(Filter::field("sex", sex))
        .with_filter(Filter::field(
            "container_id",
            FilterValue::from_option(filters.container.as_deref()),
        ))
        .with_filter(Filter::field("name", FilterValue::from_option(filters.name.as_deref())))
        .with_filter(Filter::field(
            "signature",
            FilterValue::from_option(filters.signature.as_deref()),
        )))
}
