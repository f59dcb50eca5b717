//! taskdeck
//!
//! A single-user task list: add, edit, delete, reorder, and search short
//! text items with optional due dates. All state lives in one SQLite file.

use anyhow::{Context, Result};
use clap::Parser;
use taskdeck::cli::{Cli, Command, OutputFormat};
use taskdeck::config::Config;
use taskdeck::db::Database;
use taskdeck::types::{Task, parse_due_date};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let db_path = cli.database.unwrap_or(config.db_path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    debug!(path = %db_path.display(), "opening database");
    let db = Database::open(&db_path)?;

    run(cli.command, db)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, db: Database) -> Result<()> {
    match command {
        Command::Add { title, due } => {
            let due_date = due.as_deref().map(parse_due_date).transpose()?;
            let task = db.create_task(&title, due_date)?;
            info!(id = task.id, position = task.position, "task created");
            println!("{}", render_task(&task));
        }
        Command::Show { id } => {
            println!("{}", render_task(&db.get_task(id)?));
        }
        Command::Edit { id, title, due } => {
            let due_date = due.as_deref().map(parse_due_date).transpose()?;
            let task = db.update_task(id, &title, due_date)?;
            println!("{}", render_task(&task));
        }
        Command::Rm { id } => {
            db.delete_task(id)?;
            info!(id, "task deleted");
        }
        Command::List { by, format } => {
            print_tasks(&db.list_tasks(by.into())?, format)?;
        }
        Command::Search { query, by, format } => {
            print_tasks(&db.search_tasks(&query, by.into())?, format)?;
        }
        Command::Reorder { ids } => {
            db.reorder_tasks(&ids)?;
            info!(count = ids.len(), "tasks reordered");
        }
    }
    Ok(())
}

fn render_task(task: &Task) -> String {
    match &task.due_date {
        Some(due) => format!("{:>3}. [{}] {} (due {})", task.position, task.id, task.title, due),
        None => format!("{:>3}. [{}] {}", task.position, task.id, task.title),
    }
}

fn print_tasks(tasks: &[Task], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for task in tasks {
                println!("{}", render_task(task));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(tasks)?);
        }
    }
    Ok(())
}
