//! Host page served at `/`.
//!
//! Renders the current list in the same order as the index endpoint and
//! embeds it as JSON under `#todo-data`, so a client can start from it without
//! an initial fetch.

use axum::{extract::State, response::Html};

use crate::db::Db;
use crate::error::ApiError;
use crate::model::Todo;

pub async fn home(State(db): State<Db>) -> Result<Html<String>, ApiError> {
    let todos = db.list().await?;
    render(&todos).map(Html).map_err(ApiError::Render)
}

pub fn render(todos: &[Todo]) -> Result<String, serde_json::Error> {
    // `<` is escaped so a title containing `</script>` stays inside the block.
    let data = serde_json::to_string(todos)?.replace('<', "\\u003c");

    let mut items = String::new();
    for todo in todos {
        let class = if todo.completed_on.is_some() {
            "list-group-item todo-list-item done"
        } else {
            "list-group-item todo-list-item"
        };
        items.push_str(&format!(
            "<li class=\"{class}\" data-id=\"{}\"><span class=\"todo-title\">{}</span>",
            todo.id,
            escape(&todo.title)
        ));
        if let Some(due) = todo.due_date {
            items.push_str(&format!(" <small class=\"todo-due\">{due}</small>"));
        }
        if let Some(body) = todo.body.as_deref().filter(|b| !b.is_empty()) {
            items.push_str(&format!("<p class=\"todo-body\">{}</p>", escape(body)));
        }
        items.push_str("</li>\n");
    }

    Ok(format!(
        "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>Todos</title>
</head>
<body>
<h1>Todos</h1>
<ul id=\"todo-list\" class=\"list-group\">
{items}</ul>
<script type=\"application/json\" id=\"todo-data\">{data}</script>
</body>
</html>
"
    ))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
