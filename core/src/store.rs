//! Client list and form state.
//!
//! # Design
//! `TodoStore` owns a disposable copy of the server's list. Mutations never
//! patch that copy from the server's reply: each one waits for the write to
//! be acknowledged and then refetches the whole list. The one local change is
//! the completion flip in `toggle_done`, which the following refetch
//! reconciles.
//!
//! Everything runs on the caller's thread, one request at a time.

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::sort::{self, SortDirection};
use crate::types::{FieldErrors, Todo, TodoInput};

/// Key for errors not tied to a single field.
pub const BASE: &str = "base";

/// Contents of the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub body: String,
    pub due_date: Option<NaiveDate>,
}

impl From<&Todo> for TodoForm {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            body: todo.body.clone().unwrap_or_default(),
            due_date: todo.due_date,
        }
    }
}

impl TodoForm {
    /// An empty body field means no body.
    fn into_input(self, completed_on: Option<chrono::DateTime<Utc>>) -> TodoInput {
        TodoInput {
            title: self.title,
            body: Some(self.body).filter(|b| !b.is_empty()),
            due_date: self.due_date,
            completed_on,
        }
    }
}

/// The client's copy of the list plus its form, loading and sort state.
///
/// All server traffic goes through the `Transport` it owns. Every write is
/// followed by a full `fetch_todos`.
pub struct TodoStore<T> {
    client: TodoClient,
    transport: T,
    todos: Vec<Todo>,
    sort: SortDirection,
    loading: bool,
    editing: Option<Todo>,
    errors: Option<FieldErrors>,
}

impl<T: Transport> TodoStore<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self::with_todos(client, transport, Vec::new())
    }

    /// Start from an already known list, e.g. one embedded in the host page.
    pub fn with_todos(client: TodoClient, transport: T, todos: Vec<Todo>) -> Self {
        Self {
            client,
            transport,
            todos,
            sort: SortDirection::default(),
            loading: false,
            editing: None,
            errors: None,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn sorted(&self) -> Vec<&Todo> {
        sort::sorted(&self.todos, self.sort)
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    pub fn set_sort(&mut self, direction: SortDirection) {
        self.sort = direction;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn editing(&self) -> Option<&Todo> {
        self.editing.as_ref()
    }

    pub fn form_errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One-line state summary for a status bar.
    pub fn status(&self) -> &'static str {
        if self.errors.is_some() {
            "Something went wrong"
        } else if self.loading {
            "Loading..."
        } else {
            ""
        }
    }

    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        self.transport.execute(request)
    }

    /// Replace the local list with the server's.
    pub fn fetch_todos(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        let request = self.client.build_list_todos();
        let result = self
            .send(request)
            .and_then(|response| self.client.parse_list_todos(response));
        self.loading = false;
        self.todos = result?;
        debug!(count = self.todos.len(), "refetched todos");
        Ok(())
    }

    /// Fetch a single record without touching the list.
    pub fn fetch_todo(&mut self, id: Uuid) -> Result<Todo, ApiError> {
        let request = self.client.build_get_todo(id);
        let response = self.send(request)?;
        self.client.parse_get_todo(response)
    }

    /// Put `id` into the form for editing.
    pub fn edit(&mut self, id: Uuid) -> Result<TodoForm, ApiError> {
        let todo = self
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)?;
        let form = TodoForm::from(&todo);
        self.editing = Some(todo);
        Ok(form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.errors = None;
    }

    /// Create, or update the record being edited, then refetch.
    ///
    /// A failed write keeps the editing state and leaves its errors in
    /// `form_errors`; validation errors keep the server's field map, anything
    /// else is filed under `base`.
    pub fn save(&mut self, form: TodoForm) -> Result<(), ApiError> {
        self.errors = None;
        self.loading = true;
        match self.write(form) {
            Ok(()) => {
                self.editing = None;
                self.fetch_todos()
            }
            Err(err) => {
                self.errors = Some(match &err {
                    ApiError::Validation(errors) => errors.clone(),
                    other => FieldErrors::from([(BASE.to_string(), vec![other.to_string()])]),
                });
                self.loading = false;
                Err(err)
            }
        }
    }

    fn write(&mut self, form: TodoForm) -> Result<(), ApiError> {
        match self.editing.as_ref().map(|t| (t.id, t.completed_on)) {
            Some((id, completed_on)) => {
                let request = self.client.build_update_todo(id, &form.into_input(completed_on))?;
                let response = self.send(request)?;
                self.client.parse_update_todo(response).map(|_| ())
            }
            None => {
                let request = self.client.build_create_todo(&form.into_input(None))?;
                let response = self.send(request)?;
                self.client.parse_create_todo(response)
            }
        }
    }

    /// Flip completion on the local copy, write the whole record, refetch.
    /// A failed write undoes the local flip.
    pub fn toggle_done(&mut self, id: Uuid) -> Result<(), ApiError> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::NotFound)?;
        let previous = todo.completed_on;
        todo.completed_on = match previous {
            Some(_) => None,
            None => Some(Utc::now()),
        };
        let input = TodoInput::from(&*todo);

        self.loading = true;
        let result = self
            .client
            .build_update_todo(id, &input)
            .and_then(|request| self.send(request))
            .and_then(|response| self.client.parse_update_todo(response));
        if let Err(err) = result {
            if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
                todo.completed_on = previous;
            }
            self.loading = false;
            return Err(err);
        }
        self.fetch_todos()
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), ApiError> {
        self.loading = true;
        let request = self.client.build_delete_todo(id);
        let result = self
            .send(request)
            .and_then(|response| self.client.parse_delete_todo(response));
        if let Err(err) = result {
            self.loading = false;
            return Err(err);
        }
        if self.editing.as_ref().is_some_and(|t| t.id == id) {
            self.editing = None;
        }
        self.fetch_todos()
    }
}
