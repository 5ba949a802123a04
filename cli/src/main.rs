//! Terminal front end for the todo list.
//!
//! Every invocation loads the list, performs at most one action through
//! `TodoApp`, then prints the reconciled table and any message.

mod logging;
mod transport;

use std::fmt::{self, Write as _};

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use todo_core::{TodoApp, TodoClient, TodoItem};

use transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(name = "todo", about = "Manage the shared todo list")]
struct Cli {
    /// Base URL of the todo API server.
    #[arg(long, env = "TODO_API_URL", default_value = "http://localhost:7002")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show all items.
    List,
    /// Add an item.
    Add {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Mark an item completed.
    Done { id: String },
    /// Delete an item.
    Rm { id: String },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;

    let cli = Cli::parse();
    let mut app = TodoApp::new(TodoClient::new(&cli.base_url), UreqTransport::new());
    app.init();

    match cli.command {
        Command::List => {}
        Command::Add { words } => {
            app.item_control_mut().set_value(words.join(" "));
            let rejection = app.validation_message();
            app.submit();
            if !rejection.is_empty() {
                eprintln!("{rejection}");
            }
        }
        Command::Done { id } => {
            let item = find(app.items(), &id)?;
            app.mark_as_complete(&item);
        }
        Command::Rm { id } => app.mark_for_deletion(&id),
    }

    print!("{}", render_table(app.items())?);
    if !app.error_message().is_empty() {
        eprintln!("{}", app.error_message());
    }
    Ok(())
}

fn find(items: &[TodoItem], id: &str) -> color_eyre::Result<TodoItem> {
    items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .ok_or_else(|| eyre!("no item with id {id}"))
}

fn render_table(items: &[TodoItem]) -> Result<String, fmt::Error> {
    let id_width = items.iter().map(|i| i.id.len()).max().unwrap_or(0).max(2);
    let mut out = String::new();
    writeln!(out, "{:>3}  {:<id_width$}  {:<4}  DESCRIPTION", "#", "ID", "DONE")?;
    for (n, item) in items.iter().enumerate() {
        let done = if item.is_completed { "yes" } else { "" };
        writeln!(
            out,
            "{:>3}  {:<id_width$}  {:<4}  {}",
            n + 1,
            item.id,
            done,
            item.description
        )?;
    }
    Ok(out)
}
