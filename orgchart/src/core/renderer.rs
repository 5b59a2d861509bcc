//! Read-side tree rendering
//!
//! Turns the flat store into a forest of view nodes with display metadata.
//! The renderer never mutates the store, and it always returns the complete
//! structure: a collapsed node still carries its children so counts stay
//! right. Whether collapsed children are drawn is up to the presentation
//! layer (see [`visible_rows`]).

use std::collections::{HashMap, HashSet};

use shared::{Level, Position, PositionId};

use super::store::PositionStore;
use crate::error::{HierarchyError, HierarchyResult};

/// Ids of expanded nodes; UI state only, never persisted or snapshotted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSet {
    ids: HashSet<PositionId>,
}

impl ExpandedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// First-render state: every position at level 1 or 2 is expanded
    pub fn initial(store: &PositionStore) -> Self {
        Self {
            ids: store
                .all()
                .iter()
                .filter(|p| p.level <= Level::VICE_PRESIDENT)
                .map(|p| p.id.clone())
                .collect(),
        }
    }

    pub fn contains(&self, id: &PositionId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn expand(&mut self, id: PositionId) {
        self.ids.insert(id);
    }

    pub fn collapse(&mut self, id: &PositionId) {
        self.ids.remove(id);
    }

    /// Flip one node; descendants keep their own flags
    pub fn toggle(&mut self, id: &PositionId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn expand_all(&mut self, store: &PositionStore) {
        self.ids.extend(store.all().iter().map(|p| p.id.clone()));
    }

    pub fn collapse_all(&mut self) {
        self.ids.clear();
    }

    /// Forget ids that no longer exist in `store`
    pub fn prune(&mut self, store: &PositionStore) {
        self.ids.retain(|id| store.contains(id));
    }
}

/// Symmetric add/remove of a single id, returns the new state
pub fn toggle_expanded(expanded: &mut ExpandedSet, id: &PositionId) -> bool {
    expanded.toggle(id)
}

/// Display metadata derived from a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStyle {
    pub label: &'static str,
    pub color_class: &'static str,
    pub badge_class: &'static str,
}

pub fn level_style(level: Level) -> LevelStyle {
    let (color_class, badge_class) = match level.value() {
        1 => ("from-primary to-secondary", "bg-primary/10 text-primary border-primary/20"),
        2 => ("from-secondary to-accent", "bg-secondary/10 text-secondary border-secondary/20"),
        3 => ("from-accent to-secondary", "bg-accent/10 text-accent border-accent/20"),
        4 => ("from-secondary/80 to-primary/80", "bg-secondary/5 text-secondary/80 border-secondary/10"),
        _ => ("from-neutral-400 to-neutral-600", "bg-neutral-100 text-neutral-700 border-neutral-200"),
    };
    LevelStyle {
        label: level.label(),
        color_class,
        badge_class,
    }
}

/// A position together with its rendered subtree
///
/// Drop, clone and equality walk the subtree with an explicit stack, so a
/// chart of any depth can be held without exhausting the call stack.
#[derive(Debug)]
pub struct ViewNode {
    pub position: Position,
    pub children: Vec<ViewNode>,
    pub is_expanded: bool,
    /// Every position below this one, collapsed or not
    pub descendant_count: usize,
    pub depth: usize,
    pub style: LevelStyle,
    /// Set when this position outranks its parent
    pub level_inversion: bool,
}

impl ViewNode {
    pub fn id(&self) -> &PositionId {
        &self.position.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn direct_reports(&self) -> usize {
        self.children.len()
    }

    /// Same display data over a different set of children
    pub fn with_children(&self, children: Vec<ViewNode>) -> ViewNode {
        ViewNode {
            position: self.position.clone(),
            children,
            is_expanded: self.is_expanded,
            descendant_count: self.descendant_count,
            depth: self.depth,
            style: self.style,
            level_inversion: self.level_inversion,
        }
    }
}

impl Drop for ViewNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl Clone for ViewNode {
    fn clone(&self) -> Self {
        let mut copies = rebuild_forest(std::slice::from_ref(self), |node, children| Some(node.with_children(children)));
        copies.swap_remove(0)
    }
}

impl PartialEq for ViewNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.position != b.position
                || a.is_expanded != b.is_expanded
                || a.descendant_count != b.descendant_count
                || a.depth != b.depth
                || a.style != b.style
                || a.level_inversion != b.level_inversion
                || a.children.len() != b.children.len()
            {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

enum Visit<'a> {
    Enter(&'a ViewNode),
    Exit(&'a ViewNode, usize),
}

/// Rebuild `forest` bottom-up without recursion
///
/// `build` sees each node after all of its children were rebuilt, gets the
/// kept children in order, and returns `None` to drop the node.
pub fn rebuild_forest<F>(forest: &[ViewNode], mut build: F) -> Vec<ViewNode>
where
    F: FnMut(&ViewNode, Vec<ViewNode>) -> Option<ViewNode>,
{
    let mut finished: Vec<ViewNode> = Vec::new();
    let mut stack: Vec<Visit<'_>> = forest.iter().rev().map(Visit::Enter).collect();
    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(node) => {
                stack.push(Visit::Exit(node, finished.len()));
                stack.extend(node.children.iter().rev().map(Visit::Enter));
            }
            Visit::Exit(node, start) => {
                let children = finished.split_off(start);
                if let Some(rebuilt) = build(node, children) {
                    finished.push(rebuilt);
                }
            }
        }
    }
    finished
}

pub fn descendant_count(node: &ViewNode) -> usize {
    node.descendant_count
}

/// Build the forest for `store`
///
/// Runs in O(n) without recursion. Fails with `IntegrityError` when the
/// store has positions but no root, or when some position can not be
/// reached from a root (cyclic or dangling parent chain).
pub fn build_forest(store: &PositionStore, expanded: &ExpandedSet) -> HierarchyResult<Vec<ViewNode>> {
    if store.is_empty() {
        return Ok(Vec::new());
    }

    let adjacency = store.adjacency();
    let roots = adjacency.get(&None).cloned().unwrap_or_default();
    if roots.is_empty() {
        return Err(HierarchyError::integrity(format!(
            "none of the {} positions is a root",
            store.len()
        )));
    }

    // Pre-order walk from the roots
    let mut order: Vec<(&Position, usize)> = Vec::with_capacity(store.len());
    let mut seen: HashSet<&PositionId> = HashSet::with_capacity(store.len());
    let mut stack: Vec<(&Position, usize)> = roots.iter().rev().map(|p| (*p, 0)).collect();
    while let Some((position, depth)) = stack.pop() {
        if !seen.insert(&position.id) {
            continue;
        }
        order.push((position, depth));
        if let Some(children) = adjacency.get(&Some(&position.id)) {
            stack.extend(children.iter().rev().map(|c| (*c, depth + 1)));
        }
    }

    if order.len() != store.len() {
        let unreachable: Vec<&str> = store
            .all()
            .iter()
            .filter(|p| !seen.contains(&p.id))
            .take(5)
            .map(|p| p.id.as_str())
            .collect();
        return Err(HierarchyError::integrity(format!(
            "{} positions are unreachable from any root (e.g. {})",
            store.len() - order.len(),
            unreachable.join(", ")
        )));
    }

    // Children always follow their parent in pre-order, so walking the
    // order backwards finishes every subtree before its parent needs it.
    let mut built: HashMap<&PositionId, ViewNode> = HashMap::with_capacity(store.len());
    for (position, depth) in order.into_iter().rev() {
        let children: Vec<ViewNode> = adjacency
            .get(&Some(&position.id))
            .map(|kids| kids.iter().filter_map(|k| built.remove(&k.id)).collect())
            .unwrap_or_default();
        let descendant_count: usize = children.iter().map(|c| 1 + c.descendant_count).sum();
        let level_inversion = position
            .parent_id
            .as_ref()
            .and_then(|pid| store.get(pid))
            .is_some_and(|parent| position.level < parent.level);

        built.insert(
            &position.id,
            ViewNode {
                position: position.clone(),
                children,
                is_expanded: expanded.contains(&position.id),
                descendant_count,
                depth,
                style: level_style(position.level),
                level_inversion,
            },
        );
    }

    Ok(roots.iter().filter_map(|r| built.remove(&r.id)).collect())
}

/// A node that would be drawn given the current expand/collapse state
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub node: &'a ViewNode,
    pub depth: usize,
}

/// Pre-order rows, skipping the subtrees of collapsed nodes
pub fn visible_rows(forest: &[ViewNode]) -> Vec<VisibleRow<'_>> {
    let mut rows = Vec::new();
    let mut stack: Vec<&ViewNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        rows.push(VisibleRow { node, depth: node.depth });
        if node.is_expanded {
            stack.extend(node.children.iter().rev());
        }
    }
    rows
}

/// One page of rows, pages numbered from 1
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `rows` into a page; a page past the end is empty
pub fn paginate<T>(rows: Vec<T>, page: usize, page_size: usize) -> HierarchyResult<Page<T>> {
    if page == 0 {
        return Err(HierarchyError::validation("page numbers start at 1"));
    }
    if page_size == 0 {
        return Err(HierarchyError::validation("page size must be positive"));
    }

    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);
    let rows = rows.into_iter().skip(start).take(page_size).collect();

    Ok(Page {
        rows,
        page,
        page_size,
        total_rows,
        total_pages,
    })
}
