use th_core::enums::ContainerKind;
use th_db::updates::container::ContainerUpdateBuilder;
use th_view::table::{Filter, FilterValue, TableQuery};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ContainerCommands;
use crate::commands::shared::delete::{DeleteResponse, unique_ids};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::{output, output_page};

/// Handle `th container`.
pub async fn handle(action: &ContainerCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ContainerCommands::Create { name, kind } => {
            let kind = parse_enum::<ContainerKind>(kind, "kind")?;
            let container = ctx.service.create_container(name, kind).await?;
            output(&container, flags.format)
        }
        ContainerCommands::Update { id, name, kind } => {
            if name.is_none() && kind.is_none() {
                anyhow::bail!("At least one of --name or --kind must be provided");
            }
            let mut builder = ContainerUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name.as_str());
            }
            if let Some(kind) = kind {
                builder = builder.kind(parse_enum::<ContainerKind>(kind, "kind")?);
            }
            let container = ctx.service.update_container(id, builder.build()).await?;
            output(&container, flags.format)
        }
        ContainerCommands::Get { id } => output(&ctx.service.get_container(id).await?, flags.format),
        ContainerCommands::List { kind, name, page } => {
            // An unknown kind is an error, not an empty page.
            let kind = match kind.as_deref().map(FilterValue::parse) {
                Some(FilterValue::Exact(raw)) => {
                    FilterValue::Exact(parse_enum::<ContainerKind>(&raw, "kind")?.as_str().to_string())
                }
                _ => FilterValue::All,
            };
            let rows = ctx.service.list_containers().await?;
            let page = TableQuery::new(*page, ctx.page_size)
                .with_filter(Filter::field("kind", kind))
                .with_filter(Filter::field("name", FilterValue::from_option(name.as_deref())))
                .run(&rows);
            output_page(&page, flags.format)
        }
        ContainerCommands::Delete { ids } => {
            let ids = unique_ids(ids);
            let deleted = ctx.service.delete_many_containers(&ids).await?;
            output(&DeleteResponse { deleted, ids }, flags.format)
        }
    }
}
