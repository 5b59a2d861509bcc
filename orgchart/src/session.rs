//! Editing session over one company's chart
//!
//! A session owns the history of snapshots, the expanded set and the
//! adapters. Every successful edit commits exactly one snapshot; a failed
//! edit leaves history untouched. Dropping a session without saving
//! discards its edits.
//!
//! The expanded set outlives the positions it names: rendering ignores ids
//! missing from the current snapshot, and undoing a delete brings the
//! position back with its old expansion state.

use std::sync::Arc;

use shared::{logging, session_debug, session_info, session_warn};
use shared::{CompanyId, ContactId, ContactSummary, PositionId, SaveAck, SessionId};

use crate::config::SessionConfig;
use crate::core::renderer::build_forest;
use crate::core::search::search_forest;
use crate::core::{mutator, ChartStats, ExpandedSet, HistoryController, NewPosition, OccupantResolver, PositionStore, PositionUpdate, SearchFilter, ViewNode};
use crate::error::HierarchyResult;
use crate::persistence::PersistenceAdapter;
use crate::traits::{ContactDirectory, PositionRepository};

pub struct EditSession<R: PositionRepository, D: ContactDirectory> {
    id: SessionId,
    company_id: CompanyId,
    config: SessionConfig,
    persistence: PersistenceAdapter<R>,
    directory: D,
    resolver: OccupantResolver,
    history: HistoryController,
    expanded: ExpandedSet,
    /// Snapshot that matches what the repository holds
    saved: Arc<PositionStore>,
}

impl<R: PositionRepository, D: ContactDirectory> EditSession<R, D> {
    /// Load the company's chart and start a history with it
    pub async fn open(repository: R, directory: D, config: SessionConfig, company_id: CompanyId) -> HierarchyResult<Self> {
        let id = SessionId::new();
        logging::log_startup(&id, &format!("edit session for {company_id}"));

        let persistence = PersistenceAdapter::new(repository);
        let store = persistence.load(&company_id).await.inspect_err(|e| {
            logging::log_error(&id, "Chart load", e);
        })?;

        let expanded = ExpandedSet::initial(&store);
        let mut history = HistoryController::new(store);
        if let Some(limit) = config.history_limit {
            history = history.with_limit(limit);
        }
        let saved = history.current();
        session_info!(id, "Loaded {} positions for {}", saved.len(), company_id);

        Ok(Self {
            id,
            company_id,
            config,
            persistence,
            directory,
            resolver: OccupantResolver::new(),
            history,
            expanded,
            saved,
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        self.persistence.repository()
    }

    pub fn history(&self) -> &HistoryController {
        &self.history
    }

    pub fn expanded(&self) -> &ExpandedSet {
        &self.expanded
    }

    pub fn current(&self) -> Arc<PositionStore> {
        self.history.current()
    }

    /// Run a pure edit against the current snapshot and commit its result
    fn apply<T, F>(&mut self, label: &str, edit: F) -> HierarchyResult<T>
    where
        F: FnOnce(&PositionStore) -> HierarchyResult<(PositionStore, T)>,
    {
        let current = self.history.current();
        match edit(&current) {
            Ok((next, output)) => {
                let committed = self.history.commit_labeled(next, label);
                session_debug!(self.id, "{} committed, {} positions, snapshot {}", label, committed.len(), self.history.cursor());
                Ok(output)
            }
            Err(err) => {
                session_warn!(self.id, "{} rejected: {}", label, err);
                Err(err)
            }
        }
    }

    /// Add a position; its parent is expanded so the new entry is visible
    pub fn add_position(&mut self, new: NewPosition) -> HierarchyResult<PositionId> {
        let parent = new.parent_id.clone();
        let id = self.apply("add", |store| mutator::add_position(store, new))?;
        if let Some(parent) = parent {
            self.expanded.expand(parent);
        }
        Ok(id)
    }

    pub fn update_position(&mut self, id: &PositionId, update: PositionUpdate) -> HierarchyResult<()> {
        self.apply("update", |store| Ok((mutator::update_position(store, id, update)?, ())))
    }

    /// Delete a position, promoting its direct reports to its parent
    pub fn delete_position(&mut self, id: &PositionId) -> HierarchyResult<()> {
        self.apply("delete", |store| Ok((mutator::delete_position(store, id)?, ())))
    }

    pub fn move_position(&mut self, id: &PositionId, new_parent_id: Option<&PositionId>) -> HierarchyResult<()> {
        self.apply("move", |store| Ok((mutator::move_parent(store, id, new_parent_id)?, ())))
    }

    /// Put a contact into a position
    ///
    /// # Returns
    /// The position the contact held before, which is now vacant
    pub fn assign_occupant(&mut self, position_id: &PositionId, occupant_id: ContactId) -> HierarchyResult<Option<PositionId>> {
        let resolver = self.resolver;
        self.apply("assign", |store| {
            let previous = resolver.conflict(store, &occupant_id, position_id);
            let next = mutator::assign_occupant(store, position_id, occupant_id)?;
            Ok((next, previous))
        })
    }

    pub fn unassign_occupant(&mut self, position_id: &PositionId) -> HierarchyResult<()> {
        self.apply("unassign", |store| Ok((mutator::unassign_occupant(store, position_id)?, ())))
    }

    /// Step back one snapshot; returns false at the start of history
    pub fn undo(&mut self) -> bool {
        let before = self.history.cursor();
        self.history.undo();
        before != self.history.cursor()
    }

    /// Step forward one snapshot; returns false at the end of history
    pub fn redo(&mut self) -> bool {
        let before = self.history.cursor();
        self.history.redo();
        before != self.history.cursor()
    }

    /// Full forest of the current snapshot
    pub fn forest(&self) -> HierarchyResult<Vec<ViewNode>> {
        build_forest(&self.history.current(), &self.expanded)
    }

    /// Forest narrowed to matches and their ancestors
    pub fn search(&self, query: &str, filter: &SearchFilter) -> HierarchyResult<Vec<ViewNode>> {
        Ok(search_forest(&self.forest()?, query, filter))
    }

    pub fn toggle_expanded(&mut self, id: &PositionId) -> HierarchyResult<bool> {
        self.history.current().require(id)?;
        Ok(self.expanded.toggle(id))
    }

    pub fn expand_all(&mut self) {
        let current = self.history.current();
        self.expanded.expand_all(&current);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.collapse_all();
    }

    pub fn stats(&self) -> HierarchyResult<ChartStats> {
        Ok(ChartStats::from_forest(&self.forest()?))
    }

    /// Occupant candidates for `query`
    pub async fn search_contacts(&self, query: &str) -> HierarchyResult<Vec<ContactSummary>> {
        self.resolver.search(&self.directory, query).await.inspect_err(|e| {
            logging::log_error(&self.id, "Contact search", e);
        })
    }

    /// Save the current snapshot in full
    pub async fn save(&mut self) -> HierarchyResult<SaveAck> {
        let current = self.history.current();
        let ack = self.persistence.save(&self.company_id, &current).await.inspect_err(|e| {
            logging::log_error(&self.id, "Chart save", e);
        })?;
        self.saved = current;
        logging::log_success(&self.id, &format!("Saved {} positions for {}", ack.saved_positions, self.company_id));
        Ok(ack)
    }

    /// True when the current snapshot differs from the last saved one
    pub fn has_unsaved_changes(&self) -> bool {
        !Arc::ptr_eq(&self.history.current(), &self.saved)
    }
}
