//! Test fixtures and data for org chart tests

use shared::{CompanyId, ContactId, ContactSummary, Department, Level, Position, PositionId};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const COMPANY: &'static str = "acme-corp";
    pub const CONTACT_ADA: &'static str = "contact-ada";
    pub const CONTACT_GRACE: &'static str = "contact-grace";

    /// Branching factor of the synthetic tree
    pub const FAN_OUT: usize = 3;

    pub fn company() -> CompanyId {
        CompanyId::new(Self::COMPANY)
    }

    pub fn pid(id: &str) -> PositionId {
        PositionId::new(id).unwrap()
    }

    /// The three-position chart: a CEO with two vice presidents
    pub fn ceo_with_two_vps() -> Vec<Position> {
        vec![
            Position::new(Self::pid("r"), "CEO", Department::Executive, Level::C_LEVEL),
            Position::new(Self::pid("c1"), "VP Sales", Department::Sales, Level::VICE_PRESIDENT).with_parent(Self::pid("r")),
            Position::new(Self::pid("c2"), "VP Marketing", Department::Marketing, Level::VICE_PRESIDENT)
                .with_parent(Self::pid("r")),
        ]
    }

    /// Four levels deep, `FAN_OUT` children per node: 1 + 3 + 9 + 27 positions
    pub fn four_level_tree() -> Vec<Position> {
        let departments = [Department::Sales, Department::Technology, Department::Finance];
        let mut positions = vec![Position::new(Self::pid("root"), "Chief Executive", Department::Executive, Level::C_LEVEL)];
        let mut frontier = vec![Self::pid("root")];

        for depth in 1..4 {
            let mut next = Vec::new();
            for parent in &frontier {
                for i in 0..Self::FAN_OUT {
                    let id = Self::pid(&format!("{parent}-{i}"));
                    let level = Level::new(depth as i64 + 1).unwrap();
                    positions.push(
                        Position::new(id.clone(), format!("Position {id}"), departments[i], level).with_parent(parent.clone()),
                    );
                    next.push(id);
                }
            }
            frontier = next;
        }
        positions
    }

    pub fn contacts() -> Vec<ContactSummary> {
        vec![
            ContactSummary::new(Self::CONTACT_ADA, "Ada Lovelace").with_address("ada@example.com"),
            ContactSummary::new(Self::CONTACT_GRACE, "Grace Hopper").with_address("grace@example.com"),
            ContactSummary::new("contact-alan", "Alan Turing"),
        ]
    }

    pub fn ada() -> ContactId {
        ContactId::new(Self::CONTACT_ADA)
    }

    pub fn grace() -> ContactId {
        ContactId::new(Self::CONTACT_GRACE)
    }
}
