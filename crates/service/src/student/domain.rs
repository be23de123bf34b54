use chrono::{DateTime, NaiveDate, Utc};
use models::student::{AddressFields, StudentFields};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub country: String,
    pub town: String,
    pub address_string: String,
}

/// Stored student, including bookkeeping fields no view exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub group_id: String,
    pub birth_date: NaiveDate,
    pub phone_numbers: Option<Vec<String>>,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address as received. Parts stay optional so an incomplete address is
/// reported field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub country: Option<String>,
    pub town: Option<String>,
    pub address_string: Option<String>,
}

impl AddressInput {
    fn fields(&self) -> AddressFields<'_> {
        AddressFields {
            country: self.country.as_deref(),
            town: self.town.as_deref(),
            address_string: self.address_string.as_deref(),
        }
    }
}

impl TryFrom<AddressInput> for Address {
    type Error = ServiceError;

    fn try_from(input: AddressInput) -> Result<Self, Self::Error> {
        match (input.country, input.town, input.address_string) {
            (Some(country), Some(town), Some(address_string)) => Ok(Address { country, town, address_string }),
            _ => Err(ServiceError::Validation(
                "Student validation failed: address must contain country, town and addressString".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCreateInput {
    pub name: String,
    pub surname: String,
    pub group_id: String,
    #[serde(with = "date_format")]
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub phone_numbers: Option<Vec<String>>,
    #[serde(default)]
    pub address: Option<AddressInput>,
}

impl StudentCreateInput {
    pub fn fields(&self) -> StudentFields<'_> {
        StudentFields {
            name: Some(self.name.as_str()),
            surname: Some(self.surname.as_str()),
            group_id: Some(self.group_id.as_str()),
            birth_date: Some(self.birth_date),
            address: self.address.as_ref().map(AddressInput::fields),
        }
    }
}

/// Partial update. `None` (omitted or `null`) leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdateInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub phone_numbers: Option<Vec<String>>,
    #[serde(default)]
    pub address: Option<AddressInput>,
}

impl StudentUpdateInput {
    pub fn fields(&self) -> StudentFields<'_> {
        StudentFields {
            name: self.name.as_deref(),
            surname: self.surname.as_deref(),
            group_id: self.group_id.as_deref(),
            birth_date: self.birth_date,
            address: self.address.as_ref().map(AddressInput::fields),
        }
    }
}

/// Search criteria. Absent or empty criteria do not constrain the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

/// Validated student ready for insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub surname: String,
    pub group_id: String,
    pub birth_date: NaiveDate,
    pub phone_numbers: Option<Vec<String>>,
    pub address: Option<Address>,
}

/// Validated set of changes; only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub group_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone_numbers: Option<Vec<String>>,
    pub address: Option<Address>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        *self == StudentPatch::default()
    }

    /// Merge the supplied fields into a stored record.
    pub fn apply_to(self, student: &mut Student) {
        if let Some(name) = self.name { student.name = name; }
        if let Some(surname) = self.surname { student.surname = surname; }
        if let Some(group_id) = self.group_id { student.group_id = group_id; }
        if let Some(birth_date) = self.birth_date { student.birth_date = birth_date; }
        if let Some(phone_numbers) = self.phone_numbers { student.phone_numbers = Some(phone_numbers); }
        if let Some(address) = self.address { student.address = Some(address); }
    }
}

/// Exact-match conjunctive filter; `None` fields are left unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub group_id: Option<String>,
}

impl StudentFilter {
    pub fn by_group(group_id: &str) -> Self {
        Self { group_id: Some(group_id.to_string()), ..Self::default() }
    }

    pub fn from_query(query: &StudentQuery) -> Self {
        fn present(v: &Option<String>) -> Option<String> {
            v.as_ref().filter(|s| !s.is_empty()).cloned()
        }
        Self {
            name: present(&query.name),
            surname: present(&query.surname),
            group_id: present(&query.group_id),
        }
    }

    pub fn matches(&self, student: &Student) -> bool {
        self.name.as_ref().map_or(true, |n| *n == student.name)
            && self.surname.as_ref().map_or(true, |s| *s == student.surname)
            && self.group_id.as_ref().map_or(true, |g| *g == student.group_id)
    }
}

/// List view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub surname: String,
    pub group_id: String,
    #[serde(with = "date_format")]
    pub birth_date: NaiveDate,
}

/// Detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub surname: String,
    pub group_id: String,
    #[serde(with = "date_format")]
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl From<Student> for StudentInfo {
    fn from(s: Student) -> Self {
        Self { id: s.id, name: s.name, surname: s.surname, group_id: s.group_id, birth_date: s.birth_date }
    }
}

impl From<Student> for StudentDetails {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.name,
            surname: s.surname,
            group_id: s.group_id,
            birth_date: s.birth_date,
            phone_numbers: s.phone_numbers,
            address: s.address,
        }
    }
}

/// Dates travel as `YYYY-MM-DD`; full RFC 3339 timestamps are accepted on input
/// and truncated to their UTC date.
pub mod date_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc().date()))
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date `{}`", raw)))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid date `{}`", raw))),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student() -> Student {
        Student {
            id: "507f1f77bcf86cd799439011".into(),
            name: "Ann".into(),
            surname: "Lee".into(),
            group_id: "507f1f77bcf86cd799439099".into(),
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            phone_numbers: Some(vec!["+100".into()]),
            address: Some(Address { country: "PL".into(), town: "Gdańsk".into(), address_string: "Main 1".into() }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn info_view_hides_contact_and_bookkeeping_fields() {
        let value = serde_json::to_value(StudentInfo::from(student())).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "507f1f77bcf86cd799439011",
                "name": "Ann",
                "surname": "Lee",
                "groupId": "507f1f77bcf86cd799439099",
                "birthDate": "2000-01-01"
            })
        );
    }

    #[test]
    fn details_view_includes_contact_fields_only() {
        let value = serde_json::to_value(StudentDetails::from(student())).unwrap();
        assert_eq!(value["phoneNumbers"], json!(["+100"]));
        assert_eq!(value["address"]["addressString"], "Main 1");
        assert!(value.get("createdAt").is_none());
        assert!(value.get("updatedAt").is_none());
    }

    #[test]
    fn details_view_omits_absent_optionals() {
        let mut s = student();
        s.phone_numbers = None;
        s.address = None;
        let value = serde_json::to_value(StudentDetails::from(s)).unwrap();
        assert!(value.get("phoneNumbers").is_none());
        assert!(value.get("address").is_none());
    }

    #[test]
    fn create_input_accepts_date_or_timestamp() {
        let a: StudentCreateInput = serde_json::from_value(json!({
            "name": "John", "surname": "Doe", "groupId": "507f1f77bcf86cd799439011", "birthDate": "1988-01-30"
        }))
        .unwrap();
        let b: StudentCreateInput = serde_json::from_value(json!({
            "name": "John", "surname": "Doe", "groupId": "507f1f77bcf86cd799439011", "birthDate": "1988-01-30T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(a.birth_date, b.birth_date);
        assert!(a.address.is_none());
    }

    #[test]
    fn update_input_distinguishes_supplied_fields() {
        let patch: StudentUpdateInput = serde_json::from_value(json!({ "birthDate": "1999-12-31" })).unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.birth_date, NaiveDate::from_ymd_opt(1999, 12, 31));
        let empty: StudentUpdateInput = serde_json::from_value(json!({})).unwrap();
        assert!(empty.birth_date.is_none());
    }

    #[test]
    fn patch_changes_only_supplied_fields() {
        let mut s = student();
        StudentPatch { surname: Some("Kim".into()), ..StudentPatch::default() }.apply_to(&mut s);
        assert_eq!(s.surname, "Kim");
        assert_eq!(s.name, "Ann");
        assert!(s.address.is_some());
    }

    #[test]
    fn filter_ignores_empty_criteria() {
        let query = StudentQuery { name: Some("Ann".into()), surname: Some(String::new()), ..StudentQuery::default() };
        let filter = StudentFilter::from_query(&query);
        assert_eq!(filter, StudentFilter { name: Some("Ann".into()), ..StudentFilter::default() });
        assert!(filter.matches(&student()));
        assert!(!StudentFilter { name: Some("John".into()), ..StudentFilter::default() }.matches(&student()));
    }

    #[test]
    fn incomplete_address_does_not_convert() {
        let input = AddressInput { country: Some("PL".into()), ..AddressInput::default() };
        assert!(Address::try_from(input).is_err());
    }
}
