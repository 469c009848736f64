use th_core::enums::Sex;
use th_view::charts::{self, BarMatrix, PieGroup, TreemapNode};
use th_view::grouping::{GroupTree, group_animals};
use th_view::line::{self, ClimateSeries, LinePoint};

use crate::cli::subcommands::ChartCommands;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{output, render_rows};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Handle `th chart`.
pub async fn handle(action: &ChartCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let collections = ctx.service.load_collections().await?;
    let table = flags.format == OutputFormat::Table;

    match action {
        ChartCommands::Groups => {
            let tree = group_animals(&collections.animals, &collections.species);
            if table {
                print_table(&["path", "count"], &group_rows(&tree));
                return Ok(());
            }
            output(&tree, flags.format)
        }
        ChartCommands::Treemap => {
            let tree = group_animals(&collections.animals, &collections.species);
            let nodes = charts::treemap(&tree);
            if table {
                print_table(&["name", "value"], &treemap_rows(&nodes));
                return Ok(());
            }
            output(&nodes, flags.format)
        }
        ChartCommands::Pie => {
            let groups = charts::pie_groups(&collections.animals);
            if table {
                print_table(&["name", "signature", "count"], &pie_rows(&groups));
                return Ok(());
            }
            output(&groups, flags.format)
        }
        ChartCommands::Bar => {
            let matrix = charts::bar_matrix(&collections.animals);
            if table {
                let headers = bar_headers(&matrix);
                let headers = headers.iter().map(String::as_str).collect::<Vec<_>>();
                print_table(&headers, &bar_rows(&matrix));
                return Ok(());
            }
            output(&matrix, flags.format)
        }
        ChartCommands::Weight { animal } => {
            let points = line::weight_series(&collections.weight_logs, animal);
            if table {
                print_table(&["at", "weight"], &weight_rows(&points));
                return Ok(());
            }
            output(&points, flags.format)
        }
        ChartCommands::Climate { animal } => {
            let series = line::climate_series(&collections.climate_logs, animal);
            if table {
                print_table(&["at", "temperature", "humidity"], &climate_rows(&series));
                return Ok(());
            }
            output(&series, flags.format)
        }
    }
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", render_rows(headers, rows));
}

fn group_rows(tree: &GroupTree) -> Vec<Vec<String>> {
    tree.leaves()
        .into_iter()
        .map(|(path, count)| vec![path.join(charts::PATH_SEPARATOR), count.to_string()])
        .collect()
}

/// Every node that carries a value, depth-first.
fn treemap_rows(nodes: &[TreemapNode]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut stack: Vec<&TreemapNode> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if let Some(value) = node.value {
            rows.push(vec![node.name.clone(), value.to_string()]);
        }
        if let Some(children) = &node.children {
            stack.extend(children.iter().rev());
        }
    }
    rows
}

fn pie_rows(groups: &[PieGroup]) -> Vec<Vec<String>> {
    groups
        .iter()
        .flat_map(|group| {
            group
                .slices
                .iter()
                .map(|slice| vec![group.name.clone(), slice.name.clone(), slice.value.to_string()])
        })
        .collect()
}

fn bar_headers(matrix: &BarMatrix) -> Vec<String> {
    std::iter::once(String::from("name"))
        .chain(matrix.header.iter().cloned())
        .collect()
}

fn bar_rows(matrix: &BarMatrix) -> Vec<Vec<String>> {
    matrix
        .groups
        .iter()
        .flat_map(|group| {
            group.rows.iter().map(|row| {
                let mut cells = Vec::with_capacity(2 + Sex::COUNT);
                cells.push(group.name.clone());
                cells.push(row.signature.clone());
                cells.extend(row.counts.iter().map(ToString::to_string));
                cells
            })
        })
        .collect()
}

fn weight_rows(points: &[LinePoint]) -> Vec<Vec<String>> {
    points
        .iter()
        .map(|point| vec![point.at.format(TIME_FORMAT).to_string(), point.value.to_string()])
        .collect()
}

fn climate_rows(series: &ClimateSeries) -> Vec<Vec<String>> {
    series
        .temperature
        .iter()
        .zip(&series.humidity)
        .map(|(temperature, humidity)| {
            vec![
                temperature.at.format(TIME_FORMAT).to_string(),
                temperature.value.to_string(),
                humidity.value.to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use th_core::entities::{Animal, SpeciesType};
    use th_core::enums::Sex;
    use th_view::charts;
    use th_view::grouping::group_animals;

    use super::{bar_headers, bar_rows, group_rows, pie_rows, treemap_rows};

    fn species(id: &str, name: &str) -> SpeciesType {
        SpeciesType {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn animal(id: &str, name: &str, sex: Option<Sex>, traits: &[&str]) -> Animal {
        Animal {
            id: id.to_string(),
            name: name.to_string(),
            nickname: None,
            sex,
            traits: traits.iter().map(ToString::to_string).collect(),
            species_id: String::from("spc-1"),
            container_id: None,
            slot_id: None,
            birth_date: None,
            weight: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn herd() -> Vec<Animal> {
        vec![
            animal("ani-1", "雪蛇", Some(Sex::Male), &["白化"]),
            animal("ani-2", "雪蛇", Some(Sex::Female), &["白化"]),
            animal("ani-3", "雪蛇", Some(Sex::Female), &["白化"]),
        ]
    }

    #[test]
    fn group_rows_join_paths() {
        let tree = group_animals(&herd(), &[species("spc-1", "玉米蛇")]);
        let rows = group_rows(&tree);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], "2");
        assert!(rows[0][0].starts_with("玉米蛇 - 雪蛇"));
    }

    #[test]
    fn treemap_rows_include_subtotals() {
        let tree = group_animals(&herd(), &[species("spc-1", "玉米蛇")]);
        let rows = treemap_rows(&charts::treemap(&tree));
        assert!(rows.iter().any(|row| row[0] == "玉米蛇" && row[1] == "3"));
    }

    #[test]
    fn pie_rows_flatten_groups() {
        let rows = pie_rows(&charts::pie_groups(&herd()));
        assert_eq!(rows, vec![vec!["雪蛇".to_string(), "白化".to_string(), "3".to_string()]]);
    }

    #[test]
    fn bar_rows_prefix_group_name() {
        let matrix = charts::bar_matrix(&herd());
        assert_eq!(bar_headers(&matrix)[0], "name");
        assert_eq!(bar_headers(&matrix).len(), 2 + Sex::COUNT);
        assert_eq!(bar_rows(&matrix)[0], vec!["雪蛇", "白化", "1", "2", "0", "0", "0"]);
    }

    #[test]
    fn empty_herd_yields_no_rows() {
        let tree = group_animals(&[], &[]);
        assert!(group_rows(&tree).is_empty());
        assert!(treemap_rows(&charts::treemap(&tree)).is_empty());
        assert!(bar_rows(&charts::bar_matrix(&[])).is_empty());
    }
}
