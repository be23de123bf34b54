//! Document identifier helpers.
//!
//! Identifiers are MongoDB object ids rendered as 24 hex characters. Either
//! case is accepted on input; the canonical form is lowercase, as produced by
//! `ObjectId::to_hex`. A well-formed id says nothing about whether a record exists.

use mongodb::bson::oid::ObjectId;

pub const OBJECT_ID_LEN: usize = 24;

/// Pure syntactic check: exactly 24 hex characters.
pub fn is_id_valid(id: &str) -> bool {
    id.len() == OBJECT_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Canonical lowercase form of a well-formed id.
pub fn normalize_id(id: &str) -> Option<String> {
    is_id_valid(id).then(|| id.to_ascii_lowercase())
}

pub fn parse_id(id: &str) -> Option<ObjectId> {
    if !is_id_valid(id) {
        return None;
    }
    ObjectId::parse_str(id).ok()
}

pub fn new_id() -> String {
    ObjectId::new().to_hex()
}
