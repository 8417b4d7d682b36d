//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently, so
//! the client core does not pull in axum or sqlx. The integration test runs
//! both crates together and catches schema drift.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field name to messages, as returned in a 422 body.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn is_done(&self) -> bool {
        self.completed_on.is_some()
    }
}

/// Request payload for both create and update. Updates replace every
/// editable field, so `None` clears a field on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub body: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed_on: Option<DateTime<Utc>>,
}

impl From<&Todo> for TodoInput {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            body: todo.body.clone(),
            due_date: todo.due_date,
            completed_on: todo.completed_on,
        }
    }
}
