//! The `Todo` record and the attributes accepted on create and update.
//!
//! # Design
//! `TodoParams` is the raw, permissive shape of a request body. It only
//! becomes writable after `validate` turns it into `TodoFields`, so the store
//! layer never sees a todo without a title.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Field name to human-readable messages, rendered as the 422 body.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const BLANK: &str = "can't be blank";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable attributes as sent by a client. Every field may be missing or
/// null; unknown fields are ignored so a client can send back a whole record.
#[derive(Debug, Default, Deserialize)]
pub struct TodoParams {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub completed_on: Option<DateTime<Utc>>,
}

/// Attributes that passed validation and can be written as a row.
#[derive(Clone, Debug, PartialEq)]
pub struct TodoFields {
    pub title: String,
    pub body: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed_on: Option<DateTime<Utc>>,
}

impl TodoParams {
    /// Decode a request body that is either flat (`{"title": ..}`) or
    /// wrapped in the resource key (`{"todo": {"title": ..}}`).
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let value = match value {
            Value::Object(mut map) if matches!(map.get("todo"), Some(Value::Object(_))) => {
                map.remove("todo").unwrap_or_default()
            }
            other => other,
        };
        serde_json::from_value(value)
    }

    pub fn validate(self) -> Result<TodoFields, FieldErrors> {
        let Some(title) = self.title.filter(|t| !t.trim().is_empty()) else {
            return Err(FieldErrors::from([(
                "title".to_string(),
                vec![BLANK.to_string()],
            )]));
        };
        Ok(TodoFields {
            title,
            body: self.body,
            due_date: self.due_date,
            completed_on: self.completed_on,
        })
    }
}

/// Date decoding that accepts what browsers and form inputs actually send.
mod lenient {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer};

    fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    /// `YYYY-MM-DD`, or an RFC 3339 timestamp truncated to its date.
    pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let Some(s) = raw(deserializer)? else {
            return Ok(None);
        };
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(&s).ok().map(|dt| dt.date_naive()))
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date `{s}`")))
    }

    /// An RFC 3339 timestamp, or a bare date read as midnight UTC.
    pub fn timestamp<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let Some(s) = raw(deserializer)? else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            })
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> TodoParams {
        TodoParams::from_json(value).unwrap()
    }

    #[test]
    fn todo_serializes_dates_as_plain_strings() {
        let now = DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let todo = Todo {
            id: Uuid::nil(),
            title: "Test".to_string(),
            body: None,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            completed_on: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["due_date"], "2024-03-05");
        assert!(json["body"].is_null());
        assert!(json["completed_on"].is_null());
    }

    #[test]
    fn flat_and_wrapped_bodies_decode_the_same() {
        let flat = params(json!({"title": "Walk dog", "due_date": "2024-01-02"}));
        let wrapped = params(json!({"todo": {"title": "Walk dog", "due_date": "2024-01-02"}}));
        assert_eq!(flat.validate().unwrap(), wrapped.validate().unwrap());
    }

    #[test]
    fn whole_record_bodies_are_accepted() {
        let input = params(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "title": "Echoed",
            "created_at": "2024-01-01T00:00:00Z",
        }));
        assert_eq!(input.title.as_deref(), Some("Echoed"));
    }

    #[test]
    fn missing_title_is_blank() {
        let errors = params(json!({"body": "no title"})).validate().unwrap_err();
        assert_eq!(errors["title"], vec![BLANK.to_string()]);
    }

    #[test]
    fn null_and_whitespace_titles_are_blank() {
        assert!(params(json!({"title": null})).validate().is_err());
        assert!(params(json!({"title": "   "})).validate().is_err());
    }

    #[test]
    fn due_date_accepts_timestamps_and_empty_strings() {
        let from_ts = params(json!({"title": "t", "due_date": "2019-02-10T00:00:00.000Z"}));
        assert_eq!(from_ts.due_date, NaiveDate::from_ymd_opt(2019, 2, 10));

        let empty = params(json!({"title": "t", "due_date": ""}));
        assert!(empty.due_date.is_none());
    }

    #[test]
    fn completed_on_accepts_bare_dates() {
        let input = params(json!({"title": "t", "completed_on": "2024-06-01"}));
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());
        assert_eq!(input.completed_on, expected);
    }

    #[test]
    fn garbage_dates_are_rejected() {
        let result = TodoParams::from_json(json!({"title": "t", "due_date": "next tuesday"}));
        assert!(result.is_err());
    }
}
