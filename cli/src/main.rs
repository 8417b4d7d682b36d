mod cli;
mod render;
mod transport;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use todo_core::{ApiError, TodoClient, TodoForm, TodoStore, Transport};
use uuid::Uuid;

use cli::{Cli, Command};
use transport::UreqTransport;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = TodoStore::new(TodoClient::new(&cli.base_url), UreqTransport::new());
    let result = run(
        cli.command,
        &mut store,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = report(&mut io::stderr().lock(), &err);
            ExitCode::FAILURE
        }
    }
}

/// Validation failures print as `field: message` lines, anything else as a
/// single `error:` line.
fn report(out: &mut impl Write, err: &anyhow::Error) -> io::Result<()> {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Validation(errors)) => render::write_errors(out, errors),
        _ => writeln!(out, "error: {err:#}"),
    }
}

/// Execute one command against `store`. Every command except `show` ends by
/// printing the list as the server now has it.
fn run<T: Transport>(
    command: Command,
    store: &mut TodoStore<T>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List { sort } => {
            store.set_sort(sort.into());
            store.fetch_todos()?;
        }
        Command::Show { id } => {
            let todo = store.fetch_todo(id)?;
            render::write_detail(out, &todo)?;
            return Ok(());
        }
        Command::Add { title, body, due } => {
            store.save(TodoForm {
                title,
                body: body.unwrap_or_default(),
                due_date: due,
            })?;
        }
        Command::Edit {
            id,
            title,
            body,
            due,
            clear_due,
        } => {
            // The store edits from its own copy, so load it first.
            store.fetch_todos()?;
            let mut form = store.edit(id)?;
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(body) = body {
                form.body = body;
            }
            if clear_due {
                form.due_date = None;
            } else if due.is_some() {
                form.due_date = due;
            }
            store.save(form)?;
        }
        Command::Toggle { id } => {
            store.fetch_todos()?;
            store.toggle_done(id)?;
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm_delete(id, input, out)? {
                writeln!(out, "Not deleted.")?;
                return Ok(());
            }
            store.delete(id)?;
        }
    }

    render::write_list(out, &store.sorted())?;
    Ok(())
}

/// Only an explicit `y` or `yes` counts; end of input declines.
fn confirm_delete(id: Uuid, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "Delete {id}? [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
