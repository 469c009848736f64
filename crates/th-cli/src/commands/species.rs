use th_db::updates::species::SpeciesUpdateBuilder;
use th_view::table::{Filter, FilterValue, TableQuery};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SpeciesCommands;
use crate::commands::shared::delete::{DeleteResponse, unique_ids};
use crate::context::AppContext;
use crate::output::{output, output_page};

/// Handle `th species`.
pub async fn handle(action: &SpeciesCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SpeciesCommands::Create { name } => {
            let species = ctx.service.create_species(name).await?;
            output(&species, flags.format)
        }
        SpeciesCommands::Update { id, name } => {
            let Some(name) = name else {
                anyhow::bail!("--name must be provided");
            };
            let update = SpeciesUpdateBuilder::new().name(name.as_str()).build();
            let species = ctx.service.update_species(id, update).await?;
            output(&species, flags.format)
        }
        SpeciesCommands::Get { id } => output(&ctx.service.get_species(id).await?, flags.format),
        SpeciesCommands::List { name, page } => {
            let rows = ctx.service.list_species().await?;
            let page = TableQuery::new(*page, ctx.page_size)
                .with_filter(Filter::field("name", FilterValue::from_option(name.as_deref())))
                .run(&rows);
            output_page(&page, flags.format)
        }
        SpeciesCommands::Delete { ids } => {
            let ids = unique_ids(ids);
            let deleted = ctx.service.delete_many_species(&ids).await?;
            output(&DeleteResponse { deleted, ids }, flags.format)
        }
    }
}
