//! Test helpers and builder patterns for org chart tests

use orgchart::services::{InMemoryRepository, StaticContactDirectory};
use orgchart::traits::MockContactDirectory;
use orgchart::*;
use shared::{ContactSummary, Position, PositionId};

use super::fixtures::TestFixtures;

/// Session over an in-memory repository and a mocked contact directory
pub type TestSession = EditSession<InMemoryRepository, MockContactDirectory>;

/// Builder for test sessions with sensible defaults
pub struct SessionBuilder {
    positions: Vec<Position>,
    directory: MockContactDirectory,
    config: SessionConfig,
}

impl SessionBuilder {
    /// Start from the CEO/VP chart and a directory returning the fixture contacts
    pub fn new() -> Self {
        let mut directory = MockContactDirectory::new();
        directory
            .expect_search_contacts()
            .returning(|_| Ok(TestFixtures::contacts()))
            .times(0..);

        Self {
            positions: TestFixtures::ceo_with_two_vps(),
            directory,
            config: SessionConfig::default(),
        }
    }

    pub fn with_positions(mut self, positions: Vec<Position>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.config = self.config.with_history_limit(limit);
        self
    }

    /// Replace the default directory mock
    pub fn with_directory<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockContactDirectory),
    {
        let mut directory = MockContactDirectory::new();
        setup(&mut directory);
        self.directory = directory;
        self
    }

    pub async fn build(self) -> TestSession {
        let repository = InMemoryRepository::with_chart(TestFixtures::company(), self.positions);
        EditSession::open(repository, self.directory, self.config, TestFixtures::company())
            .await
            .expect("session opens")
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    pub fn store(positions: Vec<Position>) -> PositionStore {
        PositionStore::from_positions(positions).expect("valid fixture")
    }

    /// Session over a fixed contact list instead of a mock
    pub async fn static_session(contacts: Vec<ContactSummary>) -> EditSession<InMemoryRepository, StaticContactDirectory> {
        let repository = InMemoryRepository::with_chart(TestFixtures::company(), TestFixtures::ceo_with_two_vps());
        EditSession::open(
            repository,
            StaticContactDirectory::new(contacts),
            SessionConfig::default(),
            TestFixtures::company(),
        )
        .await
        .expect("session opens")
    }

    /// Ids of the roots, in store order
    pub fn root_ids(store: &PositionStore) -> Vec<String> {
        store.roots().iter().map(|p| p.id.to_string()).collect()
    }

    pub fn parent_of(store: &PositionStore, id: &str) -> Option<PositionId> {
        store.get(&TestFixtures::pid(id)).and_then(|p| p.parent_id.clone())
    }

    /// Every hard invariant holds and the forest renders
    pub fn assert_invariants(store: &PositionStore) {
        store.validate().expect("store invariants hold");
        let forest = orgchart::core::renderer::build_forest(store, &ExpandedSet::new()).expect("forest renders");
        let rendered: usize = forest.iter().map(|n| 1 + n.descendant_count).sum();
        assert_eq!(rendered, store.len());
    }
}
