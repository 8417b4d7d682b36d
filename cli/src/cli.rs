use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use todo_core::SortDirection;
use uuid::Uuid;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api/v1";

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Manage the todo list through its HTTP API")]
pub struct Cli {
    /// API root of the todo server
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List todos by due date
    List {
        #[arg(long, value_enum, default_value_t = SortArg::Desc)]
        sort: SortArg,
    },
    /// Show one todo in full
    Show { id: Uuid },
    /// Create a todo
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: Option<String>,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Change a todo; unspecified fields keep their current value
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },
    /// Mark a todo done, or not done again
    Toggle { id: Uuid },
    /// Delete a todo after confirming
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortDirection {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortDirection::Ascending,
            SortArg::Desc => SortDirection::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("todo").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_defaults_to_descending() {
        let cli = parse(&["list"]);
        assert_eq!(cli.command, Command::List { sort: SortArg::Desc });
    }

    #[test]
    fn add_parses_due_date() {
        let cli = parse(&["add", "--title", "Pay rent", "--due", "2024-08-01"]);
        assert_eq!(
            cli.command,
            Command::Add {
                title: "Pay rent".to_string(),
                body: None,
                due: NaiveDate::from_ymd_opt(2024, 8, 1),
            }
        );
    }

    #[test]
    fn base_url_is_global() {
        let cli = parse(&["toggle", "00000000-0000-0000-0000-000000000001", "--base-url", "http://x/api/v1"]);
        assert_eq!(cli.base_url, "http://x/api/v1");
        assert_eq!(cli.command, Command::Toggle { id: Uuid::from_u128(1) });
    }

    #[test]
    fn bad_id_and_bad_date_are_rejected() {
        assert!(Cli::try_parse_from(["todo", "show", "nope"]).is_err());
        assert!(Cli::try_parse_from(["todo", "add", "--title", "t", "--due", "tomorrow"]).is_err());
    }

    #[test]
    fn delete_confirms_unless_told_not_to() {
        let id = "00000000-0000-0000-0000-000000000001";
        assert_eq!(
            parse(&["delete", id]).command,
            Command::Delete { id: Uuid::from_u128(1), yes: false }
        );
        assert_eq!(
            parse(&["delete", "-y", id]).command,
            Command::Delete { id: Uuid::from_u128(1), yes: true }
        );
    }

    #[test]
    fn due_and_clear_due_conflict() {
        let result = Cli::try_parse_from([
            "todo",
            "edit",
            "00000000-0000-0000-0000-000000000001",
            "--due",
            "2024-01-01",
            "--clear-due",
        ]);
        assert!(result.is_err());
    }
}
