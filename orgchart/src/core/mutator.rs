//! Pure hierarchy editing operations
//!
//! Every operation borrows the current store and returns a brand new one;
//! the input is never touched. A result is only handed back after the hard
//! invariants have been re-checked, so anything that reaches the history is
//! a valid chart.

use shared::{ContactId, Department, Level, Position, PositionId};

use super::store::PositionStore;
use crate::error::{HierarchyError, HierarchyResult};

/// Fields for a position that does not exist yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewPosition {
    pub title: String,
    pub department: Department,
    pub level: Level,
    pub parent_id: Option<PositionId>,
}

impl NewPosition {
    pub fn new(title: impl Into<String>, department: Department, level: Level) -> Self {
        Self {
            title: title.into(),
            department,
            level,
            parent_id: None,
        }
    }

    pub fn under(mut self, parent_id: PositionId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

impl Default for NewPosition {
    /// Placeholder the builder drops onto the canvas before the user edits it
    fn default() -> Self {
        Self::new("New Position", Department::General, Level::DIRECTOR)
    }
}

/// Partial update of the mutable fields; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionUpdate {
    pub title: Option<String>,
    pub department: Option<Department>,
    pub level: Option<Level>,
}

impl PositionUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn department(department: Department) -> Self {
        Self {
            department: Some(department),
            ..Self::default()
        }
    }

    pub fn level(level: Level) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.department.is_none() && self.level.is_none()
    }
}

fn validate_title(title: &str) -> HierarchyResult<()> {
    Ok(Position::check_title(title)?)
}

fn accept(store: PositionStore) -> HierarchyResult<PositionStore> {
    store.validate()?;
    Ok(store)
}

/// Append a new position with a freshly generated id
pub fn add_position(store: &PositionStore, new: NewPosition) -> HierarchyResult<(PositionStore, PositionId)> {
    let mut id = PositionId::generate();
    while store.contains(&id) {
        id = PositionId::generate();
    }
    let next = add_position_with_id(store, id.clone(), new)?;
    Ok((next, id))
}

/// Append a new position under a caller supplied id
///
/// Ids are never reused, so an id already present is rejected.
pub fn add_position_with_id(store: &PositionStore, id: PositionId, new: NewPosition) -> HierarchyResult<PositionStore> {
    validate_title(&new.title)?;
    if let Some(parent_id) = &new.parent_id {
        if !store.contains(parent_id) {
            return Err(HierarchyError::validation(format!("unknown parent position {parent_id}")));
        }
    }

    let mut position = Position::new(id, new.title.trim(), new.department, new.level);
    position.parent_id = new.parent_id;

    let mut next = store.clone();
    next.push(position)?;
    accept(next)
}

/// Replace title, department and/or level of an existing position
pub fn update_position(store: &PositionStore, id: &PositionId, update: PositionUpdate) -> HierarchyResult<PositionStore> {
    store.require(id)?;
    if let Some(title) = &update.title {
        validate_title(title)?;
    }

    let mut next = store.clone();
    let position = next.get_mut(id).ok_or_else(|| HierarchyError::not_found(id))?;
    if let Some(title) = update.title {
        position.title = title.trim().to_string();
    }
    if let Some(department) = update.department {
        position.department = department;
    }
    if let Some(level) = update.level {
        position.level = level;
    }
    accept(next)
}

/// Remove a position, promoting its direct children to its own parent
pub fn delete_position(store: &PositionStore, id: &PositionId) -> HierarchyResult<PositionStore> {
    let promoted_parent = store.require(id)?.parent_id.clone();

    let mut next = store.clone();
    next.remove(id);

    let child_ids: Vec<PositionId> = store
        .children_of(Some(id))
        .into_iter()
        .map(|c| c.id.clone())
        .collect();
    for child_id in &child_ids {
        if let Some(child) = next.get_mut(child_id) {
            child.parent_id = promoted_parent.clone();
        }
    }
    accept(next)
}

/// Put `occupant_id` on a position, vacating any other position they held
pub fn assign_occupant(store: &PositionStore, position_id: &PositionId, occupant_id: ContactId) -> HierarchyResult<PositionStore> {
    store.require(position_id)?;

    let mut next = store.clone();
    let previous = store
        .find_by_occupant(&occupant_id)
        .filter(|p| &p.id != position_id)
        .map(|p| p.id.clone());
    if let Some(previous_id) = previous {
        if let Some(previous) = next.get_mut(&previous_id) {
            previous.occupant_id = None;
        }
    }

    let target = next
        .get_mut(position_id)
        .ok_or_else(|| HierarchyError::not_found(position_id))?;
    target.occupant_id = Some(occupant_id);
    accept(next)
}

/// Vacate a single position
pub fn unassign_occupant(store: &PositionStore, position_id: &PositionId) -> HierarchyResult<PositionStore> {
    store.require(position_id)?;

    let mut next = store.clone();
    let target = next
        .get_mut(position_id)
        .ok_or_else(|| HierarchyError::not_found(position_id))?;
    target.occupant_id = None;
    accept(next)
}

/// Reparent a position; `None` makes it a root
pub fn move_parent(store: &PositionStore, id: &PositionId, new_parent_id: Option<&PositionId>) -> HierarchyResult<PositionStore> {
    store.require(id)?;

    if let Some(new_parent_id) = new_parent_id {
        store.require(new_parent_id)?;
        if new_parent_id == id || store.is_descendant_of(new_parent_id, id) {
            return Err(HierarchyError::CycleError {
                id: id.clone(),
                new_parent_id: new_parent_id.clone(),
            });
        }
    }

    let mut next = store.clone();
    let position = next.get_mut(id).ok_or_else(|| HierarchyError::not_found(id))?;
    position.parent_id = new_parent_id.cloned();
    accept(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PositionId {
        PositionId::new(s).unwrap()
    }

    fn position(pid: &str, parent: Option<&str>, level: Level) -> Position {
        let mut p = Position::new(id(pid), pid, Department::General, level);
        p.parent_id = parent.map(id);
        p
    }

    /// ceo -> (vp -> (dir -> ic), cfo)
    fn chart() -> PositionStore {
        PositionStore::from_positions(vec![
            position("ceo", None, Level::C_LEVEL),
            position("vp", Some("ceo"), Level::VICE_PRESIDENT),
            position("dir", Some("vp"), Level::DIRECTOR),
            position("ic", Some("dir"), Level::INDIVIDUAL),
            position("cfo", Some("ceo"), Level::C_LEVEL),
        ])
        .unwrap()
    }

    #[test]
    fn test_add_position_appends_with_fresh_id() {
        let store = chart();
        let new = NewPosition::new("  Head of Design ", Department::Technology, Level::DIRECTOR).under(id("vp"));
        let (next, new_id) = add_position(&store, new).unwrap();

        assert_eq!(store.len(), 5, "input store must be untouched");
        assert_eq!(next.len(), 6);
        assert_eq!(next.all().last().unwrap().id, new_id);
        let added = next.get(&new_id).unwrap();
        assert_eq!(added.title, "Head of Design");
        assert_eq!(added.parent_id, Some(id("vp")));
        assert!(added.is_vacant());
    }

    #[test]
    fn test_add_position_validation() {
        let store = chart();

        let empty = NewPosition::new("   ", Department::Sales, Level::MANAGER);
        assert!(matches!(add_position(&store, empty), Err(HierarchyError::ValidationError { .. })));

        let orphan = NewPosition::default().under(id("ghost"));
        assert!(matches!(add_position(&store, orphan), Err(HierarchyError::ValidationError { .. })));

        let reused = add_position_with_id(&store, id("vp"), NewPosition::default());
        assert!(matches!(reused, Err(HierarchyError::ValidationError { .. })));
    }

    #[test]
    fn test_default_new_position() {
        let defaults = NewPosition::default();
        assert_eq!(defaults.title, "New Position");
        assert_eq!(defaults.department, Department::General);
        assert_eq!(defaults.level, Level::DIRECTOR);
        assert_eq!(defaults.parent_id, None);
    }

    #[test]
    fn test_update_position_fields() {
        let store = chart();
        let update = PositionUpdate {
            title: Some("Chief Revenue Officer".to_string()),
            department: Some(Department::Sales),
            level: None,
        };
        let next = update_position(&store, &id("vp"), update).unwrap();
        let vp = next.get(&id("vp")).unwrap();
        assert_eq!(vp.title, "Chief Revenue Officer");
        assert_eq!(vp.department, Department::Sales);
        assert_eq!(vp.level, Level::VICE_PRESIDENT);
        assert_eq!(store.get(&id("vp")).unwrap().title, "vp");
    }

    #[test]
    fn test_update_position_errors() {
        let store = chart();
        assert!(matches!(
            update_position(&store, &id("ghost"), PositionUpdate::level(Level::MANAGER)),
            Err(HierarchyError::NotFoundError { .. })
        ));
        assert!(matches!(
            update_position(&store, &id("vp"), PositionUpdate::title("")),
            Err(HierarchyError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_update_may_invert_levels_without_rejection() {
        let store = chart();
        let next = update_position(&store, &id("ic"), PositionUpdate::level(Level::C_LEVEL)).unwrap();
        assert_eq!(next.level_violations().len(), 1);
    }

    #[test]
    fn test_delete_promotes_children_to_grandparent() {
        let store = chart();
        let next = delete_position(&store, &id("vp")).unwrap();

        assert!(next.get(&id("vp")).is_none());
        assert_eq!(next.get(&id("dir")).unwrap().parent_id, Some(id("ceo")));
        assert_eq!(next.get(&id("ic")).unwrap().parent_id, Some(id("dir")));
        assert_eq!(next.len(), 4);
    }

    #[test]
    fn test_delete_root_makes_children_roots() {
        let store = chart();
        let next = delete_position(&store, &id("ceo")).unwrap();
        let roots: Vec<&str> = next.roots().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(roots, vec!["vp", "cfo"]);
    }

    #[test]
    fn test_delete_missing_position() {
        assert!(matches!(
            delete_position(&chart(), &id("ghost")),
            Err(HierarchyError::NotFoundError { .. })
        ));
    }

    #[test]
    fn test_assign_moves_occupant() {
        let store = chart();
        let contact = ContactId::new("contact-42");
        let first = assign_occupant(&store, &id("vp"), contact.clone()).unwrap();
        let second = assign_occupant(&first, &id("cfo"), contact.clone()).unwrap();

        assert_eq!(second.get(&id("vp")).unwrap().occupant_id, None);
        assert_eq!(second.get(&id("cfo")).unwrap().occupant_id, Some(contact.clone()));
        assert_eq!(first.get(&id("vp")).unwrap().occupant_id, Some(contact));
    }

    #[test]
    fn test_assign_replaces_previous_occupant_of_target() {
        let store = assign_occupant(&chart(), &id("vp"), ContactId::new("a")).unwrap();
        let next = assign_occupant(&store, &id("vp"), ContactId::new("b")).unwrap();
        assert_eq!(next.get(&id("vp")).unwrap().occupant_id, Some(ContactId::new("b")));
        assert!(next.find_by_occupant(&ContactId::new("a")).is_none());
    }

    #[test]
    fn test_unassign_only_touches_target() {
        let store = assign_occupant(&chart(), &id("vp"), ContactId::new("a")).unwrap();
        let store = assign_occupant(&store, &id("dir"), ContactId::new("b")).unwrap();
        let next = unassign_occupant(&store, &id("vp")).unwrap();

        assert!(next.get(&id("vp")).unwrap().is_vacant());
        assert_eq!(next.get(&id("dir")).unwrap().occupant_id, Some(ContactId::new("b")));
        assert!(matches!(
            unassign_occupant(&store, &id("ghost")),
            Err(HierarchyError::NotFoundError { .. })
        ));
    }

    #[test]
    fn test_move_parent() {
        let store = chart();
        let next = move_parent(&store, &id("dir"), Some(&id("cfo"))).unwrap();
        assert_eq!(next.get(&id("dir")).unwrap().parent_id, Some(id("cfo")));

        let detached = move_parent(&store, &id("vp"), None).unwrap();
        assert!(detached.get(&id("vp")).unwrap().is_root());
    }

    #[test]
    fn test_move_parent_rejects_cycles() {
        let store = chart();
        let before = store.clone();

        assert!(matches!(
            move_parent(&store, &id("vp"), Some(&id("ic"))),
            Err(HierarchyError::CycleError { .. })
        ));
        assert!(matches!(
            move_parent(&store, &id("vp"), Some(&id("vp"))),
            Err(HierarchyError::CycleError { .. })
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn test_move_parent_unknown_ids() {
        let store = chart();
        assert!(matches!(
            move_parent(&store, &id("ghost"), None),
            Err(HierarchyError::NotFoundError { .. })
        ));
        assert!(matches!(
            move_parent(&store, &id("vp"), Some(&id("ghost"))),
            Err(HierarchyError::NotFoundError { .. })
        ));
    }
}
