use th_db::updates::slot::SlotUpdateBuilder;
use th_view::table::{Filter, FilterValue, TableQuery};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SlotCommands;
use crate::commands::shared::delete::{DeleteResponse, unique_ids};
use crate::context::AppContext;
use crate::output::{output, output_page};

/// Handle `th slot`.
pub async fn handle(action: &SlotCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SlotCommands::Create {
            container,
            column,
            row,
        } => {
            let slot = ctx.service.create_slot(container, *column, *row).await?;
            output(&slot, flags.format)
        }
        SlotCommands::Update {
            id,
            container,
            column,
            row,
        } => {
            if container.is_none() && column.is_none() && row.is_none() {
                anyhow::bail!("At least one of --container, --column, or --row must be provided");
            }
            let mut builder = SlotUpdateBuilder::new();
            if let Some(container) = container {
                builder = builder.container_id(container.as_str());
            }
            if let Some(column) = column {
                builder = builder.column(*column);
            }
            if let Some(row) = row {
                builder = builder.row(*row);
            }
            let slot = ctx.service.update_slot(id, builder.build()).await?;
            output(&slot, flags.format)
        }
        SlotCommands::List { container, page } => {
            let rows = ctx.service.list_slots(None).await?;
            let page = TableQuery::new(*page, ctx.page_size)
                .with_filter(Filter::field(
                    "container_id",
                    FilterValue::from_option(container.as_deref()),
                ))
                .run(&rows);
            output_page(&page, flags.format)
        }
        SlotCommands::Delete { ids } => {
            let ids = unique_ids(ids);
            let deleted = ctx.service.delete_many_slots(&ids).await?;
            output(&DeleteResponse { deleted, ids }, flags.format)
        }
    }
}
