//! Flat position store with derived adjacency
//!
//! The store is the authoritative org chart representation: an ordered list
//! of positions plus an id index. Parent→children adjacency is never stored;
//! it is derived from the parent pointers on every read so the two can not
//! drift apart.

use std::collections::{HashMap, HashSet};

use shared::{ContactId, Level, Position, PositionId};

use crate::error::{HierarchyError, HierarchyResult};

/// Derived parent → children map, children in insertion order
pub type Adjacency<'a> = HashMap<Option<&'a PositionId>, Vec<&'a Position>>;

/// A child whose level is more senior than its parent's
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelViolation {
    pub child: PositionId,
    pub child_level: Level,
    pub parent: PositionId,
    pub parent_level: Level,
}

/// Ordered, id-indexed collection of positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionStore {
    positions: Vec<Position>,
    index: HashMap<PositionId, usize>,
}

impl PositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a flat list, keeping list order as insertion order
    ///
    /// Only id uniqueness is checked here; call [`PositionStore::validate`]
    /// for the structural invariants.
    pub fn from_positions(positions: Vec<Position>) -> HierarchyResult<Self> {
        let mut index = HashMap::with_capacity(positions.len());
        for (i, position) in positions.iter().enumerate() {
            if index.insert(position.id.clone(), i).is_some() {
                return Err(HierarchyError::integrity(format!(
                    "duplicate position id {}",
                    position.id
                )));
            }
        }
        Ok(Self { positions, index })
    }

    pub fn get(&self, id: &PositionId) -> Option<&Position> {
        self.index.get(id).map(|&i| &self.positions[i])
    }

    /// Like [`PositionStore::get`] but a missing id is a `NotFoundError`
    pub fn require(&self, id: &PositionId) -> HierarchyResult<&Position> {
        self.get(id).ok_or_else(|| HierarchyError::not_found(id))
    }

    pub fn all(&self) -> &[Position] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, id: &PositionId) -> bool {
        self.index.contains_key(id)
    }

    /// Direct children of `parent` in insertion order; `None` yields the roots
    pub fn children_of(&self, parent: Option<&PositionId>) -> Vec<&Position> {
        self.positions
            .iter()
            .filter(|p| p.parent_id.as_ref() == parent)
            .collect()
    }

    pub fn roots(&self) -> Vec<&Position> {
        self.children_of(None)
    }

    /// Whole adjacency in a single pass
    pub fn adjacency(&self) -> Adjacency<'_> {
        let mut adjacency: Adjacency<'_> = HashMap::new();
        for position in &self.positions {
            adjacency
                .entry(position.parent_id.as_ref())
                .or_default()
                .push(position);
        }
        adjacency
    }

    pub fn find_by_occupant(&self, occupant_id: &ContactId) -> Option<&Position> {
        self.positions
            .iter()
            .find(|p| p.occupant_id.as_ref() == Some(occupant_id))
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors_of(&self, id: &PositionId) -> HierarchyResult<Vec<&Position>> {
        let mut ancestors = Vec::new();
        let mut current = self.require(id)?;
        while let Some(parent_id) = &current.parent_id {
            if ancestors.len() >= self.len() {
                return Err(HierarchyError::integrity(format!(
                    "parent chain of {id} does not terminate"
                )));
            }
            current = self.get(parent_id).ok_or_else(|| {
                HierarchyError::integrity(format!(
                    "{} references missing parent {}",
                    current.id, parent_id
                ))
            })?;
            ancestors.push(current);
        }
        Ok(ancestors)
    }

    /// True when `ancestor` appears on the parent chain of `candidate`
    ///
    /// The walk is bounded by the store size, so corrupted cyclic data can
    /// not loop forever.
    pub fn is_descendant_of(&self, candidate: &PositionId, ancestor: &PositionId) -> bool {
        let mut current = self.get(candidate).and_then(|p| p.parent_id.as_ref());
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.len() {
                return false;
            }
            current = self.get(id).and_then(|p| p.parent_id.as_ref());
        }
        false
    }

    /// Check the hard invariants: acyclic, referentially complete, titled,
    /// and one position per occupant
    pub fn validate(&self) -> HierarchyResult<()> {
        self.validate_structure()?;

        for position in &self.positions {
            Position::check_title(&position.title)
                .map_err(|e| HierarchyError::integrity(format!("{}: {e}", position.id)))?;
        }

        let mut occupants: HashMap<&ContactId, &PositionId> = HashMap::new();
        for position in &self.positions {
            if let Some(occupant) = &position.occupant_id {
                if let Some(other) = occupants.insert(occupant, &position.id) {
                    return Err(HierarchyError::integrity(format!(
                        "occupant {occupant} holds both {other} and {}",
                        position.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parent pointers reference existing positions and never form a cycle
    pub fn validate_structure(&self) -> HierarchyResult<()> {
        // Positions already proven to reach a root
        let mut settled: HashSet<&PositionId> = HashSet::with_capacity(self.len());

        for position in &self.positions {
            let mut path: Vec<&PositionId> = Vec::new();
            let mut on_path: HashSet<&PositionId> = HashSet::new();
            let mut current = position;

            loop {
                if settled.contains(&current.id) {
                    break;
                }
                if !on_path.insert(&current.id) {
                    return Err(HierarchyError::integrity(format!(
                        "cycle detected through {}",
                        current.id
                    )));
                }
                path.push(&current.id);

                match &current.parent_id {
                    None => break,
                    Some(parent_id) => {
                        current = self.get(parent_id).ok_or_else(|| {
                            HierarchyError::integrity(format!(
                                "{} references missing parent {}",
                                current.id, parent_id
                            ))
                        })?;
                    }
                }
            }

            settled.extend(path);
        }
        Ok(())
    }

    /// Children ranked more senior than their parent; reported, never fixed
    pub fn level_violations(&self) -> Vec<LevelViolation> {
        self.positions
            .iter()
            .filter_map(|child| {
                let parent = self.get(child.parent_id.as_ref()?)?;
                (child.level < parent.level).then(|| LevelViolation {
                    child: child.id.clone(),
                    child_level: child.level,
                    parent: parent.id.clone(),
                    parent_level: parent.level,
                })
            })
            .collect()
    }

    pub(crate) fn get_mut(&mut self, id: &PositionId) -> Option<&mut Position> {
        let i = *self.index.get(id)?;
        self.positions.get_mut(i)
    }

    pub(crate) fn push(&mut self, position: Position) -> HierarchyResult<()> {
        if self.contains(&position.id) {
            return Err(HierarchyError::validation(format!(
                "position id {} already exists",
                position.id
            )));
        }
        self.index.insert(position.id.clone(), self.positions.len());
        self.positions.push(position);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &PositionId) -> Option<Position> {
        let i = self.index.remove(id)?;
        let removed = self.positions.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(removed)
    }
}
