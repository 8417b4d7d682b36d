//! Due-date ordering for the client list.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::types::Todo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Undated todos sort as if due on 1970-01-01.
fn due_day(todo: &Todo) -> NaiveDate {
    todo.due_date.unwrap_or_default()
}

/// Compare two todos by due day. Same-day todos are equal, so a stable sort
/// keeps their relative order in either direction.
pub fn compare_due_dates(a: &Todo, b: &Todo, direction: SortDirection) -> Ordering {
    let ord = due_day(a).cmp(&due_day(b));
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Sorted view over `todos` without reordering the list itself.
pub fn sorted(todos: &[Todo], direction: SortDirection) -> Vec<&Todo> {
    let mut view: Vec<&Todo> = todos.iter().collect();
    view.sort_by(|a, b| compare_due_dates(a, b, direction));
    view
}
