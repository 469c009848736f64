//! Chart series projections.
//!
//! Three independent shapes are produced:
//! - a treemap forest from the [`GroupTree`],
//! - pie groups (one per animal name, one slice per genotype signature),
//! - a grouped-bar matrix (one row per genotype signature, one column per sex).

use serde::Serialize;
use th_core::entities::Animal;
use th_core::enums::Sex;

use crate::grouping::{Branch, GroupNode, GroupTree, animal_key, genotype_signature, group_in_order};

/// Separator between path segments in treemap node names.
pub const PATH_SEPARATOR: &str = " - ";

/// Label of the first column in the bar matrix.
pub const TRAIT_COLUMN_LABEL: &str = "性状";

// ---------------------------------------------------------------------------
// Treemap
// ---------------------------------------------------------------------------

/// Node of a hierarchical-area chart: either `children` or a terminal `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreemapNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreemapNode>>,
}

impl TreemapNode {
    fn leaf(name: String, value: u32) -> Self {
        Self {
            name,
            value: Some(value),
            children: None,
        }
    }
}

/// Convert the counting tree into treemap nodes.
///
/// Names accumulate as `parent - key`. Every branch lists its converted
/// children followed by one extra child carrying the branch's own name and
/// subtotal.
#[must_use]
pub fn treemap(tree: &GroupTree) -> Vec<TreemapNode> {
    convert_branch(tree.root(), None)
}

fn convert_branch(branch: &Branch, parent: Option<&str>) -> Vec<TreemapNode> {
    branch
        .iter()
        .map(|(key, node)| {
            let name = parent.map_or_else(|| key.to_string(), |p| format!("{p}{PATH_SEPARATOR}{key}"));
            match node {
                GroupNode::Leaf(count) => TreemapNode::leaf(name, *count),
                GroupNode::Branch(child) => {
                    let mut children = convert_branch(child, Some(&name));
                    children.push(TreemapNode::leaf(name.clone(), child.total()));
                    TreemapNode {
                        name,
                        value: None,
                        children: Some(children),
                    }
                }
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: u32,
}

/// Slices for one animal name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieGroup {
    pub name: String,
    pub slices: Vec<PieSlice>,
}

/// One group per animal name; one slice per genotype signature within it.
///
/// Every animal is counted, whatever its sex.
#[must_use]
pub fn pie_groups(animals: &[Animal]) -> Vec<PieGroup> {
    group_in_order(animals, animal_key)
        .into_iter()
        .map(|(name, members)| {
            let signatures: Vec<String> = members
                .iter()
                .map(|animal| genotype_signature(&animal.traits))
                .collect();
            let slices = group_in_order(&signatures, String::as_str)
                .into_iter()
                .map(|(signature, same)| PieSlice {
                    name: signature.to_string(),
                    value: count_u32(same.len()),
                })
                .collect();
            PieGroup {
                name: name.to_string(),
                slices,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Grouped bar
// ---------------------------------------------------------------------------

/// A cell of a bar-chart dataset: a row label or a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BarCell {
    Label(String),
    Count(u32),
}

/// Counts for one genotype signature, one per [`Sex::ALL`] member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarRow {
    pub signature: String,
    pub counts: [u32; Sex::COUNT],
}

impl BarRow {
    /// The row as dataset cells: signature first, then the counts.
    #[must_use]
    pub fn cells(&self) -> Vec<BarCell> {
        std::iter::once(BarCell::Label(self.signature.clone()))
            .chain(self.counts.iter().copied().map(BarCell::Count))
            .collect()
    }
}

/// Rows for one animal name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarGroup {
    pub name: String,
    pub rows: Vec<BarRow>,
}

impl BarGroup {
    /// Dataset source for a chart: the header row followed by every data row.
    #[must_use]
    pub fn source(&self, header: &[String]) -> Vec<Vec<BarCell>> {
        std::iter::once(header.iter().cloned().map(BarCell::Label).collect())
            .chain(self.rows.iter().map(BarRow::cells))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarMatrix {
    pub header: Vec<String>,
    pub groups: Vec<BarGroup>,
}

/// Fixed header: trait column label followed by every sex label in canonical order.
#[must_use]
pub fn bar_header() -> Vec<String> {
    std::iter::once(TRAIT_COLUMN_LABEL.to_string())
        .chain(Sex::ALL.iter().map(|sex| sex.label().to_string()))
        .collect()
}

/// One group per animal name, one row per genotype signature, one count per sex.
///
/// Absent sexes count 0. Animals without a recognized sex still make their
/// signature's row appear but add to no column.
#[must_use]
pub fn bar_matrix(animals: &[Animal]) -> BarMatrix {
    let groups = group_in_order(animals, animal_key)
        .into_iter()
        .map(|(name, members)| {
            let mut rows: Vec<BarRow> = Vec::new();
            for animal in members {
                let signature = genotype_signature(&animal.traits);
                let position = if let Some(position) =
                    rows.iter().position(|row| row.signature == signature)
                {
                    position
                } else {
                    rows.push(BarRow {
                        signature,
                        counts: [0; Sex::COUNT],
                    });
                    rows.len() - 1
                };
                if let Some(sex) = animal.sex {
                    rows[position].counts[sex.index()] += 1;
                }
            }
            BarGroup {
                name: name.to_string(),
                rows,
            }
        })
        .collect();

    BarMatrix {
        header: bar_header(),
        groups,
    }
}

fn count_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_animals;
    use crate::grouping::test_fixtures::{animal, species};
    use pretty_assertions::assert_eq;

    fn corn_snakes() -> Vec<Animal> {
        vec![
            animal("a1", "spc-1", "雪蛇", &["白化", "条纹"], Some(Sex::Male)),
            animal("a2", "spc-1", "雪蛇", &["条纹", "白化"], Some(Sex::Female)),
            animal("a3", "spc-1", "雪蛇", &[], Some(Sex::Male)),
            animal("a4", "spc-1", "焦糖", &["焦糖"], None),
        ]
    }

    #[test]
    fn treemap_accumulates_path_names_and_subtotals() {
        let species = vec![species("spc-1", "玉米蛇")];
        let animals = vec![
            animal("a1", "spc-1", "雪蛇", &["白化"], Some(Sex::Male)),
            animal("a2", "spc-1", "雪蛇", &["白化"], Some(Sex::Female)),
        ];
        let nodes = treemap(&group_animals(&animals, &species));

        let expected = vec![TreemapNode {
            name: "玉米蛇".into(),
            value: None,
            children: Some(vec![
                TreemapNode {
                    name: "玉米蛇 - 雪蛇".into(),
                    value: None,
                    children: Some(vec![
                        TreemapNode {
                            name: "玉米蛇 - 雪蛇 - 白化".into(),
                            value: None,
                            children: Some(vec![
                                TreemapNode::leaf("玉米蛇 - 雪蛇 - 白化 - 公".into(), 1),
                                TreemapNode::leaf("玉米蛇 - 雪蛇 - 白化 - 母".into(), 1),
                                TreemapNode::leaf("玉米蛇 - 雪蛇 - 白化".into(), 2),
                            ]),
                        },
                        TreemapNode::leaf("玉米蛇 - 雪蛇".into(), 2),
                    ]),
                },
                TreemapNode::leaf("玉米蛇".into(), 2),
            ]),
        }];
        assert_eq!(nodes, expected);
    }

    #[test]
    fn treemap_leaf_serializes_without_children() {
        let node = TreemapNode::leaf("x".into(), 3);
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({"name": "x", "value": 3})
        );
    }

    #[test]
    fn pie_groups_by_name_then_signature() {
        let groups = pie_groups(&corn_snakes());
        let signature = genotype_signature(&["白化".into(), "条纹".into()]);

        assert_eq!(
            groups,
            vec![
                PieGroup {
                    name: "雪蛇".into(),
                    slices: vec![
                        PieSlice { name: signature, value: 2 },
                        PieSlice { name: String::new(), value: 1 },
                    ],
                },
                PieGroup {
                    name: "焦糖".into(),
                    slices: vec![PieSlice { name: "焦糖".into(), value: 1 }],
                },
            ]
        );
    }

    #[test]
    fn bar_rows_have_one_column_per_sex() {
        let matrix = bar_matrix(&corn_snakes());
        assert_eq!(matrix.header, vec!["性状", "公", "母", "疑似公", "疑似母", "未知"]);

        for group in &matrix.groups {
            for row in &group.rows {
                assert_eq!(row.cells().len(), 1 + Sex::ALL.len());
            }
        }

        let snow = &matrix.groups[0];
        assert_eq!(snow.name, "雪蛇");
        assert_eq!(snow.rows[0].counts, [1, 1, 0, 0, 0]);
        assert_eq!(snow.rows[1].counts, [1, 0, 0, 0, 0]);

        let caramel = &matrix.groups[1];
        assert_eq!(caramel.rows[0].counts, [0; 5], "unrecognized sex adds to no column");
    }

    #[test]
    fn bar_source_prepends_header() {
        let matrix = bar_matrix(&corn_snakes());
        let source = matrix.groups[1].source(&matrix.header);
        assert_eq!(source.len(), 2);
        assert_eq!(
            serde_json::to_value(&source).unwrap(),
            serde_json::json!([
                ["性状", "公", "母", "疑似公", "疑似母", "未知"],
                ["焦糖", 0, 0, 0, 0, 0]
            ])
        );
    }

    #[test]
    fn empty_input_gives_degenerate_shapes() {
        assert!(treemap(&group_animals(&[], &[])).is_empty());
        assert!(pie_groups(&[]).is_empty());

        let matrix = bar_matrix(&[]);
        assert!(matrix.groups.is_empty());
        assert_eq!(matrix.header.len(), 1 + Sex::ALL.len());
    }
}
