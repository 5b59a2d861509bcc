//! Occupant candidate matching
//!
//! The resolver never edits a store. It narrows contact candidates for a
//! query and reports when an assignment would move a person away from the
//! position they currently hold; the caller then goes through the mutator.

use shared::{ContactId, ContactSummary, PositionId};

use super::store::PositionStore;
use crate::error::HierarchyResult;
use crate::traits::ContactDirectory;

#[derive(Debug, Clone, Copy, Default)]
pub struct OccupantResolver;

impl OccupantResolver {
    pub fn new() -> Self {
        Self
    }

    /// Case-insensitive substring match on display name or contact address
    ///
    /// Source order is preserved. A blank query matches every candidate.
    pub fn filter(&self, query: &str, candidates: &[ContactSummary]) -> Vec<ContactSummary> {
        let needle = query.trim().to_lowercase();
        candidates
            .iter()
            .filter(|c| Self::matches(&needle, c))
            .cloned()
            .collect()
    }

    fn matches(needle: &str, contact: &ContactSummary) -> bool {
        if needle.is_empty() {
            return true;
        }
        contact.display_name.to_lowercase().contains(needle)
            || contact
                .contact_address
                .as_ref()
                .is_some_and(|a| a.to_lowercase().contains(needle))
    }

    /// Query the external directory and filter its answer
    pub async fn search<D>(&self, directory: &D, query: &str) -> HierarchyResult<Vec<ContactSummary>>
    where
        D: ContactDirectory + ?Sized,
    {
        let candidates = directory.search_contacts(query).await?;
        Ok(self.filter(query, &candidates))
    }

    /// The other position `occupant_id` holds, if assigning it to
    /// `position_id` would implicitly move them
    pub fn conflict(&self, store: &PositionStore, occupant_id: &ContactId, position_id: &PositionId) -> Option<PositionId> {
        store
            .find_by_occupant(occupant_id)
            .filter(|p| &p.id != position_id)
            .map(|p| p.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockContactDirectory;
    use shared::{Department, Level, Position};

    fn candidates() -> Vec<ContactSummary> {
        vec![
            ContactSummary::new("1", "Ada Lovelace").with_address("ada@analytical.io"),
            ContactSummary::new("2", "Grace Hopper").with_address("grace@navy.mil"),
            ContactSummary::new("3", "Alan Turing"),
        ]
    }

    #[test]
    fn test_filter_matches_name_or_address() {
        let resolver = OccupantResolver::new();

        let by_name: Vec<String> = resolver.filter("LOVE", &candidates()).into_iter().map(|c| c.display_name).collect();
        assert_eq!(by_name, vec!["Ada Lovelace"]);

        let by_address = resolver.filter("navy", &candidates());
        assert_eq!(by_address.len(), 1);
        assert_eq!(by_address[0].id, ContactId::new("2"));
    }

    #[test]
    fn test_filter_preserves_source_order() {
        let resolver = OccupantResolver::new();
        let ids: Vec<ContactId> = resolver.filter("a", &candidates()).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ContactId::new("1"), ContactId::new("2"), ContactId::new("3")]);
    }

    #[test]
    fn test_blank_query_returns_everything() {
        assert_eq!(OccupantResolver::new().filter("  ", &candidates()).len(), 3);
        assert!(OccupantResolver::new().filter("zzz", &candidates()).is_empty());
    }

    #[test]
    fn test_conflict_reports_other_position() {
        let a = PositionId::new("a").unwrap();
        let b = PositionId::new("b").unwrap();
        let store = PositionStore::from_positions(vec![
            Position::new(a.clone(), "A", Department::Sales, Level::MANAGER).with_occupant(ContactId::new("42")),
            Position::new(b.clone(), "B", Department::Sales, Level::MANAGER),
        ])
        .unwrap();

        let resolver = OccupantResolver::new();
        assert_eq!(resolver.conflict(&store, &ContactId::new("42"), &b), Some(a.clone()));
        assert_eq!(resolver.conflict(&store, &ContactId::new("42"), &a), None);
        assert_eq!(resolver.conflict(&store, &ContactId::new("7"), &a), None);
    }

    #[tokio::test]
    async fn test_search_filters_directory_results() {
        let mut directory = MockContactDirectory::new();
        directory
            .expect_search_contacts()
            .withf(|q| q.contains("grace"))
            .times(1)
            .returning(|_| Ok(candidates()));

        let found = OccupantResolver::new().search(&directory, "grace").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_name, "Grace Hopper");
    }
}
