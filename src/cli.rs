//! CLI command definitions for taskdeck
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::types::OrderBy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for list-style commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines (default)
    #[default]
    Text,
    /// JSON array of tasks
    Json,
}

/// Sort key for list and search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    /// Manual order (position)
    #[default]
    Position,
    /// Due date ascending, unscheduled last
    Due,
}

impl From<SortKey> for OrderBy {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Position => OrderBy::Position,
            SortKey::Due => OrderBy::DueDate,
        }
    }
}

/// Single-user task list backed by SQLite
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task to the end of the list
    Add {
        /// Task title
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Show a single task
    Show {
        /// Task id
        id: i64,
    },

    /// Replace a task's title and due date
    Edit {
        /// Task id
        id: i64,

        /// New title
        title: String,

        /// New due date (YYYY-MM-DD); omit to clear
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: i64,
    },

    /// List all tasks
    List {
        /// Sort key
        #[arg(short, long, value_enum, default_value = "position")]
        by: SortKey,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Search task titles for a substring (case-insensitive)
    Search {
        /// Substring to look for
        query: String,

        /// Sort key
        #[arg(short, long, value_enum, default_value = "position")]
        by: SortKey,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Rewrite the manual order: pass every task id in the new order
    Reorder {
        /// Every current task id, in the desired order
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}
