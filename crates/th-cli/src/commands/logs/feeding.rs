use th_db::repos::feeding::FeedingInput;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{FeedingArgs, FeedingCommands};
use crate::commands::shared::delete::{DeleteResponse, unique_ids};
use crate::commands::shared::parse::parse_timestamp;
use crate::context::AppContext;
use crate::output::{output, output_page};

use super::log_query;

fn to_input(args: &FeedingArgs) -> anyhow::Result<FeedingInput> {
    Ok(FeedingInput {
        animal_id: args.animal.clone(),
        fed_at: parse_timestamp(args.at.as_deref())?,
        food: args.food.clone(),
        amount: args.amount,
        note: args.note.clone(),
    })
}

/// Handle `th feeding`.
pub async fn handle(action: &FeedingCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FeedingCommands::Add(args) => {
            let log = ctx.service.add_feeding_log(to_input(args)?).await?;
            output(&log, flags.format)
        }
        FeedingCommands::Replace { id, entry } => {
            let log = ctx.service.replace_feeding_log(id, to_input(entry)?).await?;
            output(&log, flags.format)
        }
        FeedingCommands::List { animal, page } => {
            let rows = ctx.service.list_feeding_logs(None).await?;
            let page = log_query(animal.as_deref(), *page, ctx.page_size).run(&rows);
            output_page(&page, flags.format)
        }
        FeedingCommands::Delete { ids } => {
            let ids = unique_ids(ids);
            let deleted = ctx.service.delete_many_feeding_logs(&ids).await?;
            output(&DeleteResponse { deleted, ids }, flags.format)
        }
    }
}
