//! The single persisted entity: one submitted form value.

use serde::Serialize;

/// One stored submission from the `inputs` table.
///
/// `id` is assigned by the database (`SERIAL`) and never changes; `value`
/// is never null. Records are created by `POST /submit` and are never
/// updated or deleted by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Database-generated primary key.
    pub id: i32,
    /// Submitted text, stored verbatim.
    pub value: String,
}

impl Record {
    /// Creates a record from a stored row.
    #[must_use]
    pub fn new(id: i32, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

impl From<(i32, String)> for Record {
    fn from((id, value): (i32, String)) -> Self {
        Self { id, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_row_tuple() {
        let record = Record::from((7, "hello".to_string()));
        assert_eq!(record, Record::new(7, "hello"));
    }

    #[test]
    fn serializes_id_and_value() {
        let json = serde_json::to_value(Record::new(1, "a")).ok();
        assert_eq!(json, Some(serde_json::json!({ "id": 1, "value": "a" })));
    }
}
