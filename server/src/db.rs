//! SQLite persistence for todos.
//!
//! One table, one statement per operation. The pool is the only shared
//! mutable state in the server; SQLite's own locking orders the writes.

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;
use uuid::Uuid;

use crate::model::{Todo, TodoFields};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS todos (
    id BLOB PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    body TEXT,
    due_date TEXT,
    completed_on TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const COLUMNS: &str = "id, title, body, due_date, completed_on, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if missing) the database at `url` and ensure the schema.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::init(pool).await
    }

    /// A private in-memory database shared by the pool's connections. One
    /// connection is kept open for the pool's lifetime, since the database
    /// is dropped when its last connection closes.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// All todos, latest due date first, then newest first. Undated rows
    /// come last.
    pub async fn list(&self) -> Result<Vec<Todo>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM todos ORDER BY due_date DESC, created_at DESC, rowid DESC"
        );
        sqlx::query_as::<_, Todo>(&sql).fetch_all(&self.pool).await
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Todo>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM todos WHERE id = ?");
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(&self, fields: TodoFields) -> Result<Todo, sqlx::Error> {
        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4(),
            title: fields.title,
            body: fields.body,
            due_date: fields.due_date,
            completed_on: fields.completed_on,
            created_at: now,
            updated_at: now,
        };
        let sql = format!("INSERT INTO todos ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)");
        sqlx::query(&sql)
            .bind(todo.id)
            .bind(&todo.title)
            .bind(&todo.body)
            .bind(todo.due_date)
            .bind(todo.completed_on)
            .bind(todo.created_at)
            .bind(todo.updated_at)
            .execute(&self.pool)
            .await?;
        debug!(id = %todo.id, "inserted todo");
        Ok(todo)
    }

    /// Replace every editable column. `None` when no row has `id`.
    pub async fn update(&self, id: Uuid, fields: TodoFields) -> Result<Option<Todo>, sqlx::Error> {
        let sql = format!(
            "UPDATE todos SET title = ?, body = ?, due_date = ?, completed_on = ?, updated_at = ? \
             WHERE id = ? RETURNING {COLUMNS}"
        );
        let todo = sqlx::query_as::<_, Todo>(&sql)
            .bind(fields.title)
            .bind(fields.body)
            .bind(fields.due_date)
            .bind(fields.completed_on)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if todo.is_some() {
            debug!(%id, "updated todo");
        }
        Ok(todo)
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
