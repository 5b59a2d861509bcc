//! Free-text search over a rendered forest
//!
//! Matching nodes are kept together with the chain of ancestors leading to
//! them, and every ancestor on such a chain is expanded so the match is
//! visible. Descendant counts keep their full-tree values.

use shared::{Department, Level};

use super::renderer::{rebuild_forest, ViewNode};

/// Structured constraints applied on top of the text query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub department: Option<Department>,
    pub level: Option<Level>,
}

impl SearchFilter {
    pub fn department(department: Department) -> Self {
        Self {
            department: Some(department),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.department.is_none() && self.level.is_none()
    }
}

pub fn search_forest(forest: &[ViewNode], query: &str, filter: &SearchFilter) -> Vec<ViewNode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() && filter.is_empty() {
        return forest.to_vec();
    }
    rebuild_forest(forest, |node, children| {
        if children.is_empty() && !node_matches(node, &needle, filter) {
            return None;
        }
        let mut kept = node.with_children(children);
        kept.is_expanded = kept.has_children() || node.is_expanded;
        Some(kept)
    })
}

fn node_matches(node: &ViewNode, needle: &str, filter: &SearchFilter) -> bool {
    let position = &node.position;
    let text_match = needle.is_empty()
        || position.title.to_lowercase().contains(needle)
        || position.department.as_str().to_lowercase().contains(needle);
    let department_match = filter.department.map_or(true, |d| d == position.department);
    let level_match = filter.level.map_or(true, |l| l == position.level);
    text_match && department_match && level_match
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::renderer::{build_forest, ExpandedSet};
    use crate::core::store::PositionStore;
    use shared::{Position, PositionId};

    fn id(s: &str) -> PositionId {
        PositionId::new(s).unwrap()
    }

    fn forest() -> Vec<ViewNode> {
        let p = |pid: &str, title: &str, dept: Department, level: Level, parent: Option<&str>| {
            let mut position = Position::new(id(pid), title, dept, level);
            position.parent_id = parent.map(id);
            position
        };
        let store = PositionStore::from_positions(vec![
            p("ceo", "Chief Executive", Department::Executive, Level::C_LEVEL, None),
            p("cmo", "Chief Marketing Officer", Department::Marketing, Level::C_LEVEL, Some("ceo")),
            p("brand", "Brand Director", Department::Marketing, Level::DIRECTOR, Some("cmo")),
            p("cto", "Chief Technology Officer", Department::Technology, Level::C_LEVEL, Some("ceo")),
            p("eng", "Engineering Manager", Department::Technology, Level::MANAGER, Some("cto")),
        ])
        .unwrap();
        build_forest(&store, &ExpandedSet::new()).unwrap()
    }

    fn ids(nodes: &[ViewNode]) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack: Vec<&ViewNode> = nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node.id().to_string());
            stack.extend(node.children.iter().rev());
        }
        out
    }

    #[test]
    fn test_match_keeps_ancestors_and_expands_them() {
        let result = search_forest(&forest(), "brand", &SearchFilter::default());
        assert_eq!(ids(&result), vec!["ceo", "cmo", "brand"]);
        assert!(result[0].is_expanded);
        assert!(result[0].children[0].is_expanded);
        assert!(!result[0].children[0].children[0].is_expanded);
        assert_eq!(result[0].descendant_count, 4, "counts keep full-tree values");
    }

    #[test]
    fn test_department_filter() {
        let result = search_forest(&forest(), "", &SearchFilter::department(Department::Technology));
        assert_eq!(ids(&result), vec!["ceo", "cto", "eng"]);
    }

    #[test]
    fn test_query_and_filter_combine() {
        let filter = SearchFilter {
            department: Some(Department::Marketing),
            level: Some(Level::C_LEVEL),
        };
        let result = search_forest(&forest(), "chief", &filter);
        assert_eq!(ids(&result), vec!["ceo", "cmo"]);
    }

    #[test]
    fn test_search_through_a_very_deep_chain() {
        let mut positions = vec![Position::new(id("p0"), "Founder", Department::Executive, Level::C_LEVEL)];
        for i in 1..30_000 {
            positions.push(
                Position::new(id(&format!("p{i}")), format!("Step {i}"), Department::Operations, Level::INDIVIDUAL)
                    .with_parent(id(&format!("p{}", i - 1))),
            );
        }
        positions.last_mut().unwrap().title = "Night Auditor".to_string();
        let store = PositionStore::from_positions(positions).unwrap();
        let forest = build_forest(&store, &ExpandedSet::new()).unwrap();

        let result = search_forest(&forest, "auditor", &SearchFilter::default());
        assert_eq!(ids(&result).len(), 30_000);
        assert!(result[0].is_expanded);
        assert_eq!(crate::core::ChartStats::from_forest(&result).max_depth, 29_999);

        assert_eq!(search_forest(&forest, "", &SearchFilter::default()), forest);
        assert!(search_forest(&forest, "nobody", &SearchFilter::default()).is_empty());
    }

    #[test]
    fn test_blank_search_returns_forest_unchanged() {
        let original = forest();
        assert_eq!(search_forest(&original, "  ", &SearchFilter::default()), original);
        assert!(search_forest(&original, "nothing like this", &SearchFilter::default()).is_empty());
    }
}
