use th_view::cabinet::{CabinetCell, CabinetGrid, cabinet_grid};

use crate::cli::root_commands::CabinetArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{output, render_rows};

/// Handle `th cabinet`.
pub async fn handle(args: &CabinetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let container = ctx.service.get_container(&args.container_id).await?;
    if !container.kind.has_slots() {
        tracing::warn!(container = %container.id, "container is a box; it has no slot grid");
    }

    let slots = ctx.service.list_slots(Some(&container.id)).await?;
    let animals = ctx.service.list_animals().await?;
    let grid = cabinet_grid(&container, &slots, &animals);

    if flags.format == OutputFormat::Table {
        let (headers, rows) = grid_table(&grid);
        let headers = headers.iter().map(String::as_str).collect::<Vec<_>>();
        println!("{}", render_rows(&headers, &rows));
        return Ok(());
    }
    output(&grid, flags.format)
}

fn cell_text(cell: &CabinetCell) -> String {
    match &cell.slot_id {
        None => String::from("-"),
        Some(_) if cell.occupants.is_empty() => String::from("(empty)"),
        Some(_) => cell.occupants.join(", "),
    }
}

/// One table row per grid row; the first column is the row index.
fn grid_table(grid: &CabinetGrid) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = std::iter::once(String::from("row"))
        .chain((0..grid.columns).map(|column| format!("col {column}")))
        .collect();
    let rows = grid
        .rows_iter()
        .enumerate()
        .map(|(index, cells)| {
            std::iter::once(index.to_string())
                .chain(cells.iter().map(cell_text))
                .collect()
        })
        .collect();
    (headers, rows)
}
