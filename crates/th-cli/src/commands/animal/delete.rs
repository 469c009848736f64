use th_core::entities::Animal;
use th_view::table::{FilterValue, Selection};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnimalFilterArgs;
use crate::commands::shared::delete::{DeleteResponse, unique_ids};
use crate::context::AppContext;
use crate::output::output;

use super::animal_query;

/// Delete explicit ids plus every animal the filters match, in one call.
///
/// Filters only select rows when at least one of them names a value; a
/// command whose filters are all `all` deletes nothing but its explicit ids.
pub async fn run(
    ids: &[String],
    filters: &AnimalFilterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if ids.is_empty() && !narrows(filters) {
        anyhow::bail!("nothing to delete: pass animal ids or at least one filter with a value other than 'all'");
    }

    let animals = if narrows(filters) {
        ctx.service.list_animals().await?
    } else {
        Vec::new()
    };
    let selection = select_targets(ids, filters, &animals)?;

    if selection.is_empty() {
        return output(
            &DeleteResponse {
                deleted: 0,
                ids: Vec::new(),
            },
            flags.format,
        );
    }

    let ids: Vec<String> = selection.ids().map(str::to_string).collect();
    tracing::debug!(count = ids.len(), "bulk deleting animals");
    let deleted = ctx.service.delete_many_animals(&ids).await?;
    output(&DeleteResponse { deleted, ids }, flags.format)
}

/// True when some filter restricts a column to an exact value.
fn narrows(filters: &AnimalFilterArgs) -> bool {
    [
        &filters.species,
        &filters.sex,
        &filters.container,
        &filters.name,
        &filters.signature,
    ]
    .into_iter()
    .any(|raw| !FilterValue::from_option(raw.as_deref()).is_all())
}

/// Union of the explicit ids and the rows matched by narrowing filters.
fn select_targets(ids: &[String], filters: &AnimalFilterArgs, animals: &[Animal]) -> anyhow::Result<Selection> {
    let mut selection = Selection::new();
    if narrows(filters) {
        let query = animal_query(filters, 0, animals.len())?;
        selection.select_all(query.filtered(animals));
    }
    for id in unique_ids(ids) {
        selection.select(id);
    }
    Ok(selection)
}
