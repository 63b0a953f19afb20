use std::{collections::HashMap, fmt};

use log::*;
use serde::{Deserialize, Serialize};

/// Category identifiers arrive as either integers or strings, depending on the backend
/// configuration. They must only be stable across requests, so both forms are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CategoryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryId::Number(n) => write!(f, "{n}"),
            CategoryId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        CategoryId::Number(id)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        CategoryId::Text(id.to_string())
    }
}

/// A flat category record as returned by `GET categories/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub parent: Option<CategoryId>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Category {
    /// The parent reference, with an absent, null or empty-string parent all meaning "root".
    pub fn parent_id(&self) -> Option<&CategoryId> {
        match &self.parent {
            Some(CategoryId::Text(s)) if s.is_empty() => None,
            other => other.as_ref(),
        }
    }
}

/// A category with its direct children attached. Derived from the flat records; the flat input
/// is never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<CategoryNode>,
}

/// Converts the flat category list into a forest of root categories with nested subcategories.
///
/// Two linear passes: the first indexes the records by id, the second partitions them into
/// roots and per-parent child lists. Roots and siblings preserve the input order.
///
/// Categories referencing an unknown parent are excluded from the forest and logged at warn
/// level, as are categories that end up unreachable from any root (which happens when the
/// parent references form a cycle). Neither aborts the build.
pub fn nest_categories(flat: &[Category]) -> Vec<CategoryNode> {
    let index: HashMap<&CategoryId, usize> = flat.iter().enumerate().map(|(i, cat)| (&cat.id, i)).collect();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];
    let mut roots = Vec::new();
    for (i, cat) in flat.iter().enumerate() {
        match cat.parent_id() {
            None => roots.push(i),
            Some(parent) => match index.get(parent) {
                Some(&p) => children[p].push(i),
                None => {
                    warn!("Category {} ({}) references unknown parent {parent}. Dropping it from the tree", cat.id, cat.name)
                },
            },
        }
    }
    let mut placed = vec![false; flat.len()];
    let forest = roots.into_iter().map(|i| build_node(i, flat, &children, &mut placed)).collect();
    for (i, cat) in flat.iter().enumerate() {
        let is_orphan = cat.parent_id().is_some_and(|p| !index.contains_key(p));
        if !placed[i] && !is_orphan {
            warn!("Category {} ({}) is not reachable from any root category", cat.id, cat.name);
        }
    }
    forest
}

fn build_node(i: usize, flat: &[Category], children: &[Vec<usize>], placed: &mut Vec<bool>) -> CategoryNode {
    placed[i] = true;
    let subcategories = children[i].iter().map(|&c| build_node(c, flat, children, placed)).collect();
    CategoryNode { category: flat[i].clone(), subcategories }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cat(id: i64, parent: Option<i64>) -> Category {
        Category {
            id: CategoryId::Number(id),
            name: format!("category-{id}"),
            parent: parent.map(CategoryId::Number),
            image: None,
        }
    }

    fn ids(nodes: &[CategoryNode]) -> Vec<CategoryId> {
        nodes.iter().map(|n| n.category.id.clone()).collect()
    }

    #[test]
    fn child_is_attached_and_orphan_is_dropped() {
        let flat = [cat(1, None), cat(2, Some(1)), cat(3, Some(99))];
        let forest = nest_categories(&flat);
        assert_eq!(ids(&forest), vec![CategoryId::Number(1)]);
        assert_eq!(ids(&forest[0].subcategories), vec![CategoryId::Number(2)]);
        assert!(forest[0].subcategories[0].subcategories.is_empty());
    }

    #[test]
    fn roots_preserve_input_order() {
        let flat = [cat(1, None), cat(2, None), cat(3, None)];
        let forest = nest_categories(&flat);
        assert_eq!(ids(&forest), vec![CategoryId::Number(1), CategoryId::Number(2), CategoryId::Number(3)]);
    }

    #[test]
    fn siblings_preserve_input_order() {
        let flat = [cat(10, None), cat(3, Some(10)), cat(1, Some(10)), cat(2, Some(10))];
        let forest = nest_categories(&flat);
        assert_eq!(
            ids(&forest[0].subcategories),
            vec![CategoryId::Number(3), CategoryId::Number(1), CategoryId::Number(2)]
        );
    }

    #[test]
    fn nesting_is_recursive() {
        let flat = [cat(1, None), cat(2, Some(1)), cat(3, Some(2)), cat(4, Some(3))];
        let forest = nest_categories(&flat);
        let deepest = &forest[0].subcategories[0].subcategories[0].subcategories[0];
        assert_eq!(deepest.category.id, CategoryId::Number(4));
    }

    #[test]
    fn child_can_appear_before_its_parent() {
        let flat = [cat(2, Some(1)), cat(1, None)];
        let forest = nest_categories(&flat);
        assert_eq!(ids(&forest), vec![CategoryId::Number(1)]);
        assert_eq!(ids(&forest[0].subcategories), vec![CategoryId::Number(2)]);
    }

    #[test]
    fn empty_string_parent_means_root() {
        let flat = [Category {
            id: CategoryId::Text("audio".to_string()),
            name: "Audio".to_string(),
            parent: Some(CategoryId::Text(String::new())),
            image: None,
        }];
        let forest = nest_categories(&flat);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].category.id, CategoryId::Text("audio".to_string()));
    }

    #[test]
    fn cycle_members_never_reach_the_forest() {
        let flat = [cat(1, None), cat(2, Some(3)), cat(3, Some(2))];
        let forest = nest_categories(&flat);
        assert_eq!(ids(&forest), vec![CategoryId::Number(1)]);
        assert!(forest[0].subcategories.is_empty());
    }

    #[test]
    fn descendants_of_an_orphan_are_also_excluded() {
        let flat = [cat(1, None), cat(2, Some(99)), cat(3, Some(2))];
        let forest = nest_categories(&flat);
        assert_eq!(ids(&forest), vec![CategoryId::Number(1)]);
        assert!(forest[0].subcategories.is_empty());
    }

    #[test]
    fn categories_deserialize_with_mixed_id_types() {
        let json = r#"[
            {"id": 1, "name": "TV & Home", "image": "tv.png"},
            {"id": "audio", "name": "Audio", "parent": null},
            {"id": 2, "name": "Soundbars", "parent": "audio"}
        ]"#;
        let flat: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(flat[0].id, CategoryId::Number(1));
        assert_eq!(flat[1].id, CategoryId::Text("audio".to_string()));
        let forest = nest_categories(&flat);
        assert_eq!(forest.len(), 2);
        assert_eq!(ids(&forest[1].subcategories), vec![CategoryId::Number(2)]);
    }

    #[test]
    fn nodes_serialize_with_flattened_category_fields() {
        let forest = nest_categories(&[cat(1, None), cat(2, Some(1))]);
        let json = serde_json::to_value(&forest).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["name"], "category-1");
        assert_eq!(json[0]["subcategories"][0]["id"], 2);
        assert_eq!(json[0]["subcategories"][0]["subcategories"], serde_json::json!([]));
    }
}
