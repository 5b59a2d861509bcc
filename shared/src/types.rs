//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Opaque identifier of a position in an org chart
///
/// Identifiers coming from the persistence layer are kept verbatim; freshly
/// created positions get a `pos_` prefixed UUID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PositionId(String);

impl PositionId {
    pub fn new(id: impl Into<String>) -> SharedResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SharedError::InvalidId { input: id });
        }
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(format!("pos_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PositionId {
    type Error = SharedError;

    fn try_from(value: String) -> SharedResult<Self> {
        Self::new(value)
    }
}

impl From<PositionId> for String {
    fn from(id: PositionId) -> Self {
        id.0
    }
}

impl FromStr for PositionId {
    type Err = SharedError;

    fn from_str(s: &str) -> SharedResult<Self> {
        Self::new(s)
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an external contact record
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the company owning an org chart
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(String);

impl CompanyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CompanyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for one editing session, used to tag log lines
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell sessions apart in logs
        let simple = self.0.simple().to_string();
        write!(f, "session_{}", &simple[..8])
    }
}

/// Department a position belongs to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Department {
    Executive,
    Marketing,
    Sales,
    Technology,
    Operations,
    Finance,
    Hr,
    #[default]
    General,
}

impl Department {
    pub const ALL: [Department; 8] = [
        Department::Executive,
        Department::Marketing,
        Department::Sales,
        Department::Technology,
        Department::Operations,
        Department::Finance,
        Department::Hr,
        Department::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Executive => "Executive",
            Department::Marketing => "Marketing",
            Department::Sales => "Sales",
            Department::Technology => "Technology",
            Department::Operations => "Operations",
            Department::Finance => "Finance",
            Department::Hr => "HR",
            Department::General => "General",
        }
    }
}

impl FromStr for Department {
    type Err = SharedError;

    fn from_str(s: &str) -> SharedResult<Self> {
        let wanted = s.trim();
        Department::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SharedError::InvalidDepartment { input: s.to_string() })
    }
}

impl TryFrom<String> for Department {
    type Error = SharedError;

    fn try_from(value: String) -> SharedResult<Self> {
        value.parse()
    }
}

impl From<Department> for String {
    fn from(d: Department) -> Self {
        d.as_str().to_string()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seniority level, 1 = most senior, 5 = individual contributor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const C_LEVEL: Level = Level(1);
    pub const VICE_PRESIDENT: Level = Level(2);
    pub const DIRECTOR: Level = Level(3);
    pub const MANAGER: Level = Level(4);
    pub const INDIVIDUAL: Level = Level(5);

    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> SharedResult<Self> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(SharedError::InvalidLevel { value });
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Human readable rank name
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "C-Level",
            2 => "Vice President",
            3 => "Director",
            4 => "Manager",
            _ => "Individual Contributor",
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::DIRECTOR
    }
}

impl TryFrom<i64> for Level {
    type Error = SharedError;

    fn try_from(value: i64) -> SharedResult<Self> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cosmetic canvas coordinates; never used for tree logic
///
/// On the wire the coordinates sit directly on the position as `x` and `y`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutHint {
    pub x: f64,
    pub y: f64,
}

/// A role in the org chart, independent of who (if anyone) fills it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: PositionId,
    pub title: String,
    pub department: Department,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<PositionId>,
    #[serde(default, rename = "contactId", alias = "occupantId", skip_serializing_if = "Option::is_none")]
    pub occupant_id: Option<ContactId>,
    #[serde(flatten)]
    pub layout_hint: Option<LayoutHint>,
}

impl Position {
    pub fn new(id: PositionId, title: impl Into<String>, department: Department, level: Level) -> Self {
        Self {
            id,
            title: title.into(),
            department,
            level,
            parent_id: None,
            occupant_id: None,
            layout_hint: None,
        }
    }

    pub fn with_parent(mut self, parent_id: PositionId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_occupant(mut self, occupant_id: ContactId) -> Self {
        self.occupant_id = Some(occupant_id);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_vacant(&self) -> bool {
        self.occupant_id.is_none()
    }

    /// A title must contain something other than whitespace
    pub fn check_title(title: &str) -> SharedResult<()> {
        if title.trim().is_empty() {
            return Err(SharedError::EmptyTitle);
        }
        Ok(())
    }
}

/// Contact record returned by the external contact directory
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub id: ContactId,
    #[serde(alias = "fullName")]
    pub display_name: String,
    #[serde(default, alias = "email", skip_serializing_if = "Option::is_none")]
    pub contact_address: Option<String>,
    #[serde(default, alias = "profileImage", skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
}

impl ContactSummary {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: ContactId::new(id),
            display_name: display_name.into(),
            contact_address: None,
            avatar_ref: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.contact_address = Some(address.into());
        self
    }
}
