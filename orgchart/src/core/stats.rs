//! Summary statistics over a rendered forest

use std::collections::BTreeMap;

use serde::Serialize;
use shared::{Department, Level};

use super::renderer::ViewNode;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartStats {
    pub total_positions: usize,
    pub filled_positions: usize,
    pub vacant_positions: usize,
    pub department_counts: BTreeMap<Department, usize>,
    pub level_counts: BTreeMap<Level, usize>,
    /// Mean direct reports over positions that have any, rounded to one decimal
    pub average_direct_reports: f64,
    /// Depth of the deepest position, roots being depth 0
    pub max_depth: usize,
    pub level_inversions: usize,
}

impl ChartStats {
    pub fn from_forest(forest: &[ViewNode]) -> Self {
        let mut stats = ChartStats::default();
        let mut managers = 0usize;
        let mut direct_reports = 0usize;

        let mut stack: Vec<&ViewNode> = forest.iter().collect();
        while let Some(node) = stack.pop() {
            stats.total_positions += 1;
            if node.position.is_vacant() {
                stats.vacant_positions += 1;
            } else {
                stats.filled_positions += 1;
            }
            *stats.department_counts.entry(node.position.department).or_default() += 1;
            *stats.level_counts.entry(node.position.level).or_default() += 1;
            stats.max_depth = stats.max_depth.max(node.depth);
            if node.level_inversion {
                stats.level_inversions += 1;
            }
            if node.has_children() {
                managers += 1;
                direct_reports += node.direct_reports();
            }
            stack.extend(node.children.iter());
        }

        if managers > 0 {
            stats.average_direct_reports = (direct_reports as f64 / managers as f64 * 10.0).round() / 10.0;
        }
        stats
    }

    pub fn fill_rate(&self) -> f64 {
        if self.total_positions == 0 {
            return 0.0;
        }
        self.filled_positions as f64 / self.total_positions as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::renderer::{build_forest, ExpandedSet};
    use crate::core::store::PositionStore;
    use shared::{ContactId, Position, PositionId};

    fn position(pid: &str, parent: Option<&str>, dept: Department, level: Level) -> Position {
        let mut p = Position::new(PositionId::new(pid).unwrap(), pid, dept, level);
        p.parent_id = parent.map(|s| PositionId::new(s).unwrap());
        p
    }

    #[test]
    fn test_stats_on_known_tree() {
        let store = PositionStore::from_positions(vec![
            position("ceo", None, Department::Executive, Level::C_LEVEL).with_occupant(ContactId::new("1")),
            position("vp", Some("ceo"), Department::Sales, Level::VICE_PRESIDENT).with_occupant(ContactId::new("2")),
            position("rep1", Some("vp"), Department::Sales, Level::INDIVIDUAL),
            position("rep2", Some("vp"), Department::Sales, Level::INDIVIDUAL),
            position("rep3", Some("vp"), Department::Sales, Level::C_LEVEL),
            position("board", None, Department::General, Level::C_LEVEL),
        ])
        .unwrap();
        let forest = build_forest(&store, &ExpandedSet::new()).unwrap();
        let stats = ChartStats::from_forest(&forest);

        assert_eq!(stats.total_positions, 6);
        assert_eq!(stats.filled_positions, 2);
        assert_eq!(stats.vacant_positions, 4);
        assert_eq!(stats.department_counts[&Department::Sales], 4);
        assert_eq!(stats.department_counts.get(&Department::Finance), None);
        assert_eq!(stats.level_counts[&Level::C_LEVEL], 3);
        assert_eq!(stats.average_direct_reports, 2.0);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.level_inversions, 1);
        assert!((stats.fill_rate() - 2.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats_on_empty_forest() {
        let stats = ChartStats::from_forest(&[]);
        assert_eq!(stats, ChartStats::default());
        assert_eq!(stats.fill_rate(), 0.0);
    }
}
