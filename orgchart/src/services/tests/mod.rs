//! Service-specific tests
//!
//! Each adapter has its own test file; shared sample data lives here.


pub mod common {
    use shared::{CompanyId, ContactId, Department, Level, Position, PositionId};

    pub fn company() -> CompanyId {
        CompanyId::new("acme-corp")
    }

    /// CEO with two VPs, one of them filled
    pub fn sample_positions() -> Vec<Position> {
        let ceo = PositionId::new("r").unwrap();
        vec![
            Position::new(ceo.clone(), "CEO", Department::Executive, Level::C_LEVEL),
            Position::new(PositionId::new("c1").unwrap(), "VP Sales", Department::Sales, Level::VICE_PRESIDENT)
                .with_parent(ceo.clone())
                .with_occupant(ContactId::new("contact-42")),
            Position::new(PositionId::new("c2").unwrap(), "VP Marketing", Department::Marketing, Level::VICE_PRESIDENT)
                .with_parent(ceo),
        ]
    }
}
