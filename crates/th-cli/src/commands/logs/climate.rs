use th_db::repos::climate::ClimateInput;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ClimateArgs, ClimateCommands};
use crate::commands::shared::delete::{DeleteResponse, unique_ids};
use crate::commands::shared::parse::parse_timestamp;
use crate::context::AppContext;
use crate::output::{output, output_page};

use super::log_query;

fn to_input(args: &ClimateArgs) -> anyhow::Result<ClimateInput> {
    Ok(ClimateInput {
        animal_id: args.animal.clone(),
        recorded_at: parse_timestamp(args.at.as_deref())?,
        temperature: args.temperature,
        humidity: args.humidity,
        note: args.note.clone(),
    })
}

/// Handle `th climate`.
pub async fn handle(action: &ClimateCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ClimateCommands::Add(args) => {
            let log = ctx.service.add_climate_log(to_input(args)?).await?;
            output(&log, flags.format)
        }
        ClimateCommands::Replace { id, entry } => {
            let log = ctx.service.replace_climate_log(id, to_input(entry)?).await?;
            output(&log, flags.format)
        }
        ClimateCommands::List { animal, page } => {
            let rows = ctx.service.list_climate_logs(None).await?;
            let page = log_query(animal.as_deref(), *page, ctx.page_size).run(&rows);
            output_page(&page, flags.format)
        }
        ClimateCommands::Delete { ids } => {
            let ids = unique_ids(ids);
            let deleted = ctx.service.delete_many_climate_logs(&ids).await?;
            output(&DeleteResponse { deleted, ids }, flags.format)
        }
    }
}
