//! Synchronous API client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that, `TodoStore`
//! keeps the client's list, form and loading state, and talks to the server
//! through whatever `Transport` the host provides.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `TodoStore` refetches the full list after every write instead of
//!   merging server replies into its copy.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod sort;
pub mod store;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use sort::SortDirection;
pub use store::{TodoForm, TodoStore};
pub use types::{FieldErrors, Todo, TodoInput};
