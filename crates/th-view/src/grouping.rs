//! Nested counting tree over animals.
//!
//! The tree is keyed, from the root down, by species display name, animal
//! name, genotype signature, and sex label. Leaves hold the number of animals
//! on that exact path. Depth is always four below the root and no leaf ever
//! holds zero.
//!
//! Sibling order follows the order in which keys are first met in the input,
//! except at the sex level, where leaves follow [`Sex::ALL`].

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use th_core::entities::{Animal, SpeciesType};
use th_core::enums::Sex;
use th_core::palette::label_hash;

/// Separator between traits in a genotype signature.
pub const TRAIT_SEPARATOR: &str = "、";

/// Order-independent key for a trait set.
///
/// Traits are sorted by [`label_hash`], ties broken by the text itself, then
/// joined with [`TRAIT_SEPARATOR`]. An empty trait list yields `""`.
#[must_use]
pub fn genotype_signature(traits: &[String]) -> String {
    let mut sorted: Vec<&str> = traits.iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| label_hash(a).cmp(&label_hash(b)).then_with(|| a.cmp(b)));
    sorted.join(TRAIT_SEPARATOR)
}

/// Name used to group an animal; blank names fall back to the animal ID.
#[must_use]
pub fn animal_key(animal: &Animal) -> &str {
    if animal.name.trim().is_empty() {
        &animal.id
    } else {
        &animal.name
    }
}

/// A node of the counting tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupNode {
    Leaf(u32),
    Branch(Branch),
}

impl GroupNode {
    /// Sum of all leaf counts at or below this node.
    #[must_use]
    pub fn total(&self) -> u32 {
        match self {
            Self::Leaf(count) => *count,
            Self::Branch(branch) => branch.total(),
        }
    }
}

/// Ordered mapping from key to child node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branch {
    entries: Vec<(String, GroupNode)>,
}

impl Branch {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&GroupNode> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() == key)
            .map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, node)| node.total()).sum()
    }

    fn child_branch(&mut self, key: &str) -> &mut Self {
        let position = if let Some(position) = self
            .entries
            .iter()
            .position(|(existing, _)| existing.as_str() == key)
        {
            position
        } else {
            self.entries
                .push((key.to_string(), GroupNode::Branch(Self::default())));
            self.entries.len() - 1
        };

        let node = &mut self.entries[position].1;
        if matches!(node, GroupNode::Leaf(_)) {
            *node = GroupNode::Branch(Self::default());
        }
        let GroupNode::Branch(branch) = node else {
            unreachable!("leaf replaced by branch above")
        };
        branch
    }

    fn increment_sex(&mut self, sex: Sex) {
        let label = sex.label();
        if let Some((_, GroupNode::Leaf(count))) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.as_str() == label)
        {
            *count += 1;
            return;
        }

        let position = self
            .entries
            .iter()
            .position(|(existing, _)| {
                Sex::ALL
                    .iter()
                    .find(|candidate| candidate.label() == existing.as_str())
                    .is_some_and(|candidate| candidate.index() > sex.index())
            })
            .unwrap_or(self.entries.len());
        self.entries
            .insert(position, (label.to_string(), GroupNode::Leaf(1)));
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl Serialize for GroupNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(count) => serializer.serialize_u32(*count),
            Self::Branch(branch) => branch.serialize(serializer),
        }
    }
}

/// Root of the species → name → genotype → sex counting tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTree {
    root: Branch,
}

impl GroupTree {
    #[must_use]
    pub const fn root(&self) -> &Branch {
        &self.root
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Sum of every leaf count in the tree.
    #[must_use]
    pub fn leaf_total(&self) -> u32 {
        self.root.total()
    }

    /// Follow `path` from the root.
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&GroupNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(first)?;
        for key in rest {
            let GroupNode::Branch(branch) = node else {
                return None;
            };
            node = branch.get(key)?;
        }
        Some(node)
    }

    /// Every `(path, count)` pair, depth-first in sibling order.
    #[must_use]
    pub fn leaves(&self) -> Vec<(Vec<&str>, u32)> {
        let mut out = Vec::new();
        collect_leaves(&self.root, &mut Vec::new(), &mut out);
        out
    }
}

fn collect_leaves<'a>(branch: &'a Branch, path: &mut Vec<&'a str>, out: &mut Vec<(Vec<&'a str>, u32)>) {
    for (key, node) in branch.iter() {
        path.push(key);
        match node {
            GroupNode::Leaf(count) => out.push((path.clone(), *count)),
            GroupNode::Branch(child) => collect_leaves(child, path, out),
        }
        path.pop();
    }
}

impl Serialize for GroupTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

/// Build the counting tree.
///
/// The species key is the species display name, or the animal's `species_id`
/// when that species is not in `species`. Animals whose sex is not a member
/// of the closed set (`None`) are left out entirely.
#[must_use]
pub fn group_animals(animals: &[Animal], species: &[SpeciesType]) -> GroupTree {
    let names: HashMap<&str, &str> = species
        .iter()
        .map(|entry| (entry.id.as_str(), entry.display_name()))
        .collect();

    let mut root = Branch::default();
    for animal in animals {
        let Some(sex) = animal.sex else {
            continue;
        };
        let species_key = names
            .get(animal.species_id.as_str())
            .copied()
            .unwrap_or(animal.species_id.as_str());
        let signature = genotype_signature(&animal.traits);

        root.child_branch(species_key)
            .child_branch(animal_key(animal))
            .child_branch(&signature)
            .increment_sex(sex);
    }
    GroupTree { root }
}

/// Group items by a derived key, keeping first-seen order of keys and items.
pub(crate) fn group_in_order<'a, T, K, F>(items: &'a [T], key: F) -> Vec<(K, Vec<&'a T>)>
where
    K: PartialEq,
    F: Fn(&'a T) -> K,
{
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();
    for item in items {
        let item_key = key(item);
        if let Some((_, members)) = groups.iter_mut().find(|(existing, _)| *existing == item_key) {
            members.push(item);
        } else {
            groups.push((item_key, vec![item]));
        }
    }
    groups
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::{animal, species};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn signature_ignores_input_order() {
        let a = genotype_signature(&["白化".into(), "条纹".into()]);
        let b = genotype_signature(&["条纹".into(), "白化".into()]);
        assert_eq!(a, b);
        assert!(a.contains(TRAIT_SEPARATOR));
    }

    #[test]
    fn signature_of_empty_traits_is_empty() {
        assert_eq!(genotype_signature(&[]), "");
    }

    #[test]
    fn signature_orders_by_hash() {
        // "a" hashes below "b".
        assert_eq!(
            genotype_signature(&["b".into(), "a".into()]),
            format!("a{TRAIT_SEPARATOR}b")
        );
    }

    #[test]
    fn corn_snake_scenario() {
        let species = vec![species("spc-1", "玉米蛇")];
        let animals = vec![
            animal("ani-1", "spc-1", "雪蛇", &["白化", "条纹"], Some(Sex::Male)),
            animal("ani-2", "spc-1", "雪蛇", &["白化", "条纹"], Some(Sex::Female)),
            animal("ani-3", "spc-1", "雪蛇", &["条纹", "白化"], Some(Sex::Unknown)),
        ];

        let tree = group_animals(&animals, &species);
        let signature = genotype_signature(&["白化".into(), "条纹".into()]);

        let Some(GroupNode::Branch(by_name)) = tree.get_path(&["玉米蛇", "雪蛇"]) else {
            panic!("expected name branch");
        };
        assert_eq!(by_name.len(), 1, "trait order must not split the group");

        let Some(GroupNode::Branch(by_sex)) = tree.get_path(&["玉米蛇", "雪蛇", signature.as_str()]) else {
            panic!("expected genotype branch");
        };
        let leaves: Vec<_> = by_sex.iter().map(|(k, n)| (k.to_string(), n.total())).collect();
        assert_eq!(
            leaves,
            vec![
                ("公".to_string(), 1),
                ("母".to_string(), 1),
                ("未知".to_string(), 1),
            ]
        );
    }

    #[test]
    fn unrecognized_sex_is_excluded() {
        let species = vec![species("spc-1", "球蟒")];
        let animals = vec![
            animal("ani-1", "spc-1", "香蕉", &[], Some(Sex::Female)),
            animal("ani-2", "spc-1", "香蕉", &[], None),
            animal("ani-3", "spc-1", "派", &[], None),
        ];

        let tree = group_animals(&animals, &species);
        assert_eq!(tree.leaf_total(), 1);
        assert!(tree.get_path(&["球蟒", "派"]).is_none(), "no empty branches");
    }

    #[test]
    fn count_is_conserved_and_leaves_are_positive() {
        let species = vec![species("spc-1", "玉米蛇"), species("spc-2", "球蟒")];
        let animals = vec![
            animal("a1", "spc-1", "雪蛇", &["白化"], Some(Sex::Male)),
            animal("a2", "spc-2", "香蕉", &["香蕉"], Some(Sex::ProbableMale)),
            animal("a3", "spc-1", "雪蛇", &["白化"], Some(Sex::Male)),
            animal("a4", "spc-2", "香蕉", &["香蕉", "派"], Some(Sex::ProbableFemale)),
            animal("a5", "spc-1", "焦糖", &[], None),
            animal("a6", "spc-1", "焦糖", &[], Some(Sex::Unknown)),
        ];

        let tree = group_animals(&animals, &species);
        let recognized = animals.iter().filter(|a| a.sex.is_some()).count();
        assert_eq!(tree.leaf_total() as usize, recognized);

        let leaves = tree.leaves();
        assert!(leaves.iter().all(|(_, count)| *count >= 1));
        assert!(leaves.iter().all(|(path, _)| path.len() == 4));
    }

    #[test]
    fn siblings_follow_first_seen_order() {
        let species = vec![species("spc-1", "玉米蛇"), species("spc-2", "球蟒")];
        let animals = vec![
            animal("a1", "spc-2", "香蕉", &[], Some(Sex::Male)),
            animal("a2", "spc-1", "雪蛇", &[], Some(Sex::Male)),
            animal("a3", "spc-2", "派", &[], Some(Sex::Male)),
        ];
        let tree = group_animals(&animals, &species);
        assert_eq!(tree.root().keys().collect::<Vec<_>>(), vec!["球蟒", "玉米蛇"]);

        let Some(GroupNode::Branch(ball)) = tree.get_path(&["球蟒"]) else {
            panic!("expected branch");
        };
        assert_eq!(ball.keys().collect::<Vec<_>>(), vec!["香蕉", "派"]);
    }

    #[test]
    fn sex_leaves_follow_canonical_order() {
        let species = vec![species("spc-1", "玉米蛇")];
        let animals = vec![
            animal("a1", "spc-1", "雪蛇", &[], Some(Sex::Unknown)),
            animal("a2", "spc-1", "雪蛇", &[], Some(Sex::Female)),
            animal("a3", "spc-1", "雪蛇", &[], Some(Sex::Male)),
            animal("a4", "spc-1", "雪蛇", &[], Some(Sex::ProbableMale)),
        ];
        let tree = group_animals(&animals, &species);
        let Some(GroupNode::Branch(by_sex)) = tree.get_path(&["玉米蛇", "雪蛇", ""]) else {
            panic!("expected branch");
        };
        assert_eq!(
            by_sex.keys().collect::<Vec<_>>(),
            vec!["公", "母", "疑似公", "未知"]
        );
    }

    #[test]
    fn missing_species_falls_back_to_id() {
        let animals = vec![animal("a1", "spc-gone", "雪蛇", &[], Some(Sex::Male))];
        let tree = group_animals(&animals, &[]);
        assert_eq!(tree.root().keys().collect::<Vec<_>>(), vec!["spc-gone"]);

        let unnamed = vec![species("spc-1", "")];
        let animals = vec![animal("a1", "spc-1", "", &[], Some(Sex::Male))];
        let tree = group_animals(&animals, &unnamed);
        assert!(tree.get_path(&["spc-1", "a1", "", "公"]).is_some());
    }

    #[test]
    fn empty_input_gives_empty_tree() {
        let tree = group_animals(&[], &[]);
        assert!(tree.is_empty());
        assert_eq!(serde_json::to_string(&tree).unwrap(), "{}");
    }

    #[test]
    fn serializes_as_nested_mapping() {
        let species = vec![species("spc-1", "玉米蛇")];
        let animals = vec![animal("a1", "spc-1", "雪蛇", &["白化"], Some(Sex::Female))];
        let tree = group_animals(&animals, &species);
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            serde_json::json!({"玉米蛇": {"雪蛇": {"白化": {"母": 1}}}})
        );
    }

    #[test]
    fn group_in_order_keeps_first_seen() {
        let values = [3, 1, 3, 2, 1];
        let groups = group_in_order(&values, |v| *v);
        let keys: Vec<_> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![3, 1, 2]);
        assert_eq!(groups[0].1.len(), 2);
    }
}
