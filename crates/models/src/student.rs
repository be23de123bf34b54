use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::Violations;

pub const COLLECTION: &str = "students";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDocument {
    pub country: String,
    pub town: String,
    pub address_string: String,
}

/// Stored shape of a student. `created_at`/`updated_at` never leave the storage layer views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub surname: String,
    pub group_id: ObjectId,
    pub birth_date: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressDocument>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Borrowed view of the fields to validate before a write.
/// `None` means the field was not supplied.
#[derive(Debug, Default, Clone, Copy)]
pub struct StudentFields<'a> {
    pub name: Option<&'a str>,
    pub surname: Option<&'a str>,
    pub group_id: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<AddressFields<'a>>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AddressFields<'a> {
    pub country: Option<&'a str>,
    pub town: Option<&'a str>,
    pub address_string: Option<&'a str>,
}

fn check_text(v: &mut Violations, path: &str, value: Option<&str>, required: bool) {
    match value {
        Some("") => v.required(path),
        None if required => v.required(path),
        _ => {}
    }
}

fn check_birth_date(v: &mut Violations, value: Option<NaiveDate>, required: bool, today: NaiveDate) {
    match value {
        None if required => v.required("birthDate"),
        Some(date) if date > today => v.push(
            "birthDate",
            format!("Birth date cannot be in the future. Provided date: {}", date),
        ),
        _ => {}
    }
}

fn check_address(v: &mut Violations, address: Option<AddressFields<'_>>) {
    // all three parts are required once an address is given
    if let Some(a) = address {
        check_text(v, "address.country", a.country, true);
        check_text(v, "address.town", a.town, true);
        check_text(v, "address.addressString", a.address_string, true);
    }
}

/// Validate a complete student before insert.
pub fn validate_new(fields: &StudentFields<'_>, today: NaiveDate) -> Result<(), ModelError> {
    let mut v = Violations::new("Student");
    check_text(&mut v, "name", fields.name, true);
    check_text(&mut v, "surname", fields.surname, true);
    check_text(&mut v, "groupId", fields.group_id, true);
    check_birth_date(&mut v, fields.birth_date, true, today);
    check_address(&mut v, fields.address);
    v.into_result()
}

/// Validate only the supplied fields of a partial update.
pub fn validate_patch(fields: &StudentFields<'_>, today: NaiveDate) -> Result<(), ModelError> {
    let mut v = Violations::new("Student");
    check_text(&mut v, "name", fields.name, false);
    check_text(&mut v, "surname", fields.surname, false);
    check_text(&mut v, "groupId", fields.group_id, false);
    check_birth_date(&mut v, fields.birth_date, false, today);
    check_address(&mut v, fields.address);
    v.into_result()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Calendar dates are stored as midnight UTC.
pub fn date_to_bson(date: NaiveDate) -> bson::DateTime {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
    bson::DateTime::from_millis(midnight.timestamp_millis())
}

pub fn date_from_bson(value: bson::DateTime) -> Result<NaiveDate, ModelError> {
    Utc.timestamp_millis_opt(value.timestamp_millis())
        .single()
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ModelError::Db(format!("birthDate out of range: {}", value.timestamp_millis())))
}

pub fn timestamp_from_bson(value: bson::DateTime) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(value.timestamp_millis())
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn complete<'a>() -> StudentFields<'a> {
        StudentFields {
            name: Some("John"),
            surname: Some("Doe"),
            group_id: Some("507f1f77bcf86cd799439011"),
            birth_date: Some(d(1988, 1, 30)),
            address: None,
        }
    }

    #[test]
    fn complete_student_is_valid() {
        assert!(validate_new(&complete(), d(2025, 1, 1)).is_ok());
    }

    #[test]
    fn empty_name_and_surname_are_required() {
        let fields = StudentFields { name: Some(""), surname: None, ..complete() };
        let err = validate_new(&fields, d(2025, 1, 1)).unwrap_err().to_string();
        assert_eq!(
            err,
            "Student validation failed: name: Path `name` is required., surname: Path `surname` is required."
        );
    }

    #[test]
    fn birth_date_in_the_future_is_rejected() {
        let fields = StudentFields { birth_date: Some(d(2222, 1, 30)), ..complete() };
        let err = validate_new(&fields, d(2025, 1, 1)).unwrap_err().to_string();
        assert!(err.contains("birthDate: Birth date cannot be in the future. Provided date: 2222-01-30"));
    }

    #[test]
    fn birth_date_today_is_allowed() {
        let fields = StudentFields { birth_date: Some(d(2025, 1, 1)), ..complete() };
        assert!(validate_new(&fields, d(2025, 1, 1)).is_ok());
    }

    #[test]
    fn incomplete_address_lists_every_missing_part() {
        let fields = StudentFields { address: Some(AddressFields::default()), ..complete() };
        let err = validate_new(&fields, d(2025, 1, 1)).unwrap_err().to_string();
        assert_eq!(
            err,
            "Student validation failed: address.country: Path `country` is required., address.town: Path `town` is required., address.addressString: Path `addressString` is required."
        );
    }

    #[test]
    fn patch_ignores_absent_fields() {
        assert!(validate_patch(&StudentFields::default(), d(2025, 1, 1)).is_ok());
        let fields = StudentFields { surname: Some(""), ..StudentFields::default() };
        assert!(validate_patch(&fields, d(2025, 1, 1)).is_err());
    }

    #[test]
    fn dates_survive_bson_conversion() {
        let date = d(2000, 1, 1);
        let stored = date_to_bson(date);
        assert_eq!(stored.timestamp_millis(), 946_684_800_000);
        assert_eq!(date_from_bson(stored).unwrap(), date);
    }
}
