use std::io::{self, Write};

use todo_core::{FieldErrors, Todo};

const NO_DATE: &str = "----------";

pub fn line(todo: &Todo) -> String {
    let mark = if todo.is_done() { 'x' } else { ' ' };
    let due = todo
        .due_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| NO_DATE.to_string());
    format!("[{mark}] {due}  {}  ({})", todo.title, todo.id)
}

pub fn write_list(out: &mut impl Write, todos: &[&Todo]) -> io::Result<()> {
    if todos.is_empty() {
        return writeln!(out, "No todos.");
    }
    for todo in todos {
        writeln!(out, "{}", line(todo))?;
    }
    Ok(())
}

pub fn write_detail(out: &mut impl Write, todo: &Todo) -> io::Result<()> {
    writeln!(out, "{}", todo.title)?;
    writeln!(out, "  id:       {}", todo.id)?;
    if let Some(due) = todo.due_date {
        writeln!(out, "  due:      {due}")?;
    }
    match todo.completed_on {
        Some(at) => writeln!(out, "  done:     {}", at.format("%Y-%m-%d %H:%M"))?,
        None => writeln!(out, "  done:     no")?,
    }
    writeln!(out, "  created:  {}", todo.created_at.format("%Y-%m-%d %H:%M"))?;
    writeln!(out, "  updated:  {}", todo.updated_at.format("%Y-%m-%d %H:%M"))?;
    if let Some(body) = todo.body.as_deref().filter(|b| !b.is_empty()) {
        writeln!(out)?;
        for text in body.lines() {
            writeln!(out, "  {text}")?;
        }
    }
    Ok(())
}

/// One `field: message` line per error.
pub fn write_errors(out: &mut impl Write, errors: &FieldErrors) -> io::Result<()> {
    for (field, messages) in errors {
        for message in messages {
            writeln!(out, "{field}: {message}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, Utc};
    use uuid::Uuid;

    use super::*;

    fn todo(done: bool, due: Option<NaiveDate>) -> Todo {
        let at = DateTime::parse_from_rfc3339("2024-03-01T09:15:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Todo {
            id: Uuid::nil(),
            title: "Water plants".to_string(),
            body: Some("ferns\ncactus".to_string()),
            due_date: due,
            completed_on: done.then_some(at),
            created_at: at,
            updated_at: at,
        }
    }

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn line_marks_done_and_due_date() {
        let done = todo(true, NaiveDate::from_ymd_opt(2024, 3, 9));
        assert_eq!(
            line(&done),
            "[x] 2024-03-09  Water plants  (00000000-0000-0000-0000-000000000000)"
        );
        assert!(line(&todo(false, None)).starts_with("[ ] ----------  Water plants"));
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(rendered(|out| write_list(out, &[])), "No todos.\n");
    }

    #[test]
    fn detail_includes_body_lines() {
        let text = rendered(|out| write_detail(out, &todo(true, None)));
        assert!(text.starts_with("Water plants\n"));
        assert!(text.contains("  done:     2024-03-01 09:15\n"));
        assert!(text.ends_with("  ferns\n  cactus\n"));
        assert!(!text.contains("due:"));
    }

    #[test]
    fn errors_print_one_per_line() {
        let errors = FieldErrors::from([(
            "title".to_string(),
            vec!["can't be blank".to_string()],
        )]);
        assert_eq!(
            rendered(|out| write_errors(out, &errors)),
            "title: can't be blank\n"
        );
    }
}
