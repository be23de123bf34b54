use serde::{Deserialize, Serialize};

/// Stored group (business view)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub start_year: i32,
}

/// Create input. Both fields are optional at the wire level so that a
/// missing field surfaces as a validation error, not a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCreateInput {
    pub name: Option<String>,
    pub start_year: Option<i32>,
}

/// Validated group ready for insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub name: String,
    pub start_year: i32,
}

/// Public group view; all fields pass through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub start_year: i32,
}

impl From<Group> for GroupView {
    fn from(group: Group) -> Self {
        Self { id: group.id, name: group.name, start_year: group.start_year }
    }
}
