use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::Violations;

pub const COLLECTION: &str = "groups";
pub const MIN_LENGTH_GROUP_NAME: usize = 2;
pub const MIN_GROUP_START_YEAR: i32 = 2020;

/// Stored shape of a group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub start_year: i32,
}

/// Length is measured in UTF-16 code units, the unit the document store's
/// `minlength` rule counts.
pub fn validate_name(v: &mut Violations, name: Option<&str>) {
    match name {
        None | Some("") => v.required("name"),
        Some(n) if n.encode_utf16().count() < MIN_LENGTH_GROUP_NAME => v.push(
            "name",
            format!(
                "Path `name` (`{}`) is shorter than the minimum allowed length ({}).",
                n, MIN_LENGTH_GROUP_NAME
            ),
        ),
        Some(_) => {}
    }
}

pub fn validate_start_year(v: &mut Violations, start_year: Option<i32>) {
    match start_year {
        None => v.required("startYear"),
        Some(y) if y < MIN_GROUP_START_YEAR => v.push(
            "startYear",
            format!(
                "Path `startYear` ({}) is less than minimum allowed value ({}).",
                y, MIN_GROUP_START_YEAR
            ),
        ),
        Some(_) => {}
    }
}

/// Validate a group before it is written. Missing fields count as violations.
pub fn validate(name: Option<&str>, start_year: Option<i32>) -> Result<(), ModelError> {
    let mut v = Violations::new("Group");
    validate_name(&mut v, name);
    validate_start_year(&mut v, start_year);
    v.into_result()
}
