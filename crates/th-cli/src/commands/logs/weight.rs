use th_db::repos::weight::WeightInput;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{WeightArgs, WeightCommands};
use crate::commands::shared::delete::{DeleteResponse, unique_ids};
use crate::commands::shared::parse::parse_timestamp;
use crate::context::AppContext;
use crate::output::{output, output_page};

use super::log_query;

fn to_input(args: &WeightArgs) -> anyhow::Result<WeightInput> {
    Ok(WeightInput {
        animal_id: args.animal.clone(),
        measured_at: parse_timestamp(args.at.as_deref())?,
        weight: args.weight,
        note: args.note.clone(),
    })
}

/// Handle `th weight`.
pub async fn handle(action: &WeightCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        WeightCommands::Add(args) => {
            let log = ctx.service.add_weight_log(to_input(args)?).await?;
            output(&log, flags.format)
        }
        WeightCommands::Replace { id, entry } => {
            let log = ctx.service.replace_weight_log(id, to_input(entry)?).await?;
            output(&log, flags.format)
        }
        WeightCommands::List { animal, page } => {
            let rows = ctx.service.list_weight_logs(None).await?;
            let page = log_query(animal.as_deref(), *page, ctx.page_size).run(&rows);
            output_page(&page, flags.format)
        }
        WeightCommands::Delete { ids } => {
            let ids = unique_ids(ids);
            let deleted = ctx.service.delete_many_weight_logs(&ids).await?;
            output(&DeleteResponse { deleted, ids }, flags.format)
        }
    }
}
