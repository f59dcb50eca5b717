//! Ordered, additive schema migrations for the tasks table.
//!
//! Each step decides applicability by introspecting the live schema, so the
//! list is safe to run on every open regardless of which revision created
//! the database. Steps only ever add; nothing is removed or renamed.

use super::schema::{has_column, table_exists};
use crate::error::{StoreError, StoreResult};
use rusqlite::Connection;
use tracing::debug;

/// A single additive schema change.
pub struct SchemaStep {
    /// Stable identifier, used in logs and error reports.
    pub id: &'static str,
    /// What this step does.
    pub description: &'static str,
    /// Whether the step still needs to run against this database.
    pub needed: fn(&Connection) -> rusqlite::Result<bool>,
    /// Apply the change.
    pub apply: fn(&Connection) -> rusqlite::Result<()>,
}

fn needs_tasks_table(conn: &Connection) -> rusqlite::Result<bool> {
    Ok(!table_exists(conn, "tasks")?)
}

fn create_tasks_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE tasks (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             title TEXT NOT NULL,
             position INTEGER,
             due_date TEXT
         );
         CREATE INDEX IF NOT EXISTS idx_tasks_position ON tasks(position);",
    )
}

fn needs_position_column(conn: &Connection) -> rusqlite::Result<bool> {
    Ok(!has_column(conn, "tasks", "position")?)
}

fn add_position_column(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "ALTER TABLE tasks ADD COLUMN position INTEGER;
         UPDATE tasks SET position = id WHERE position IS NULL;
         CREATE INDEX IF NOT EXISTS idx_tasks_position ON tasks(position);",
    )
}

fn needs_due_date_column(conn: &Connection) -> rusqlite::Result<bool> {
    Ok(!has_column(conn, "tasks", "due_date")?)
}

fn add_due_date_column(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("ALTER TABLE tasks ADD COLUMN due_date TEXT;")
}

/// All schema steps in the order they must run.
pub fn schema_steps() -> Vec<SchemaStep> {
    vec![
        SchemaStep {
            id: "create-tasks-table",
            description: "Create the tasks table and position index",
            needed: needs_tasks_table,
            apply: create_tasks_table,
        },
        SchemaStep {
            id: "add-position-column",
            description: "Add position, backfilled from id for existing rows",
            needed: needs_position_column,
            apply: add_position_column,
        },
        SchemaStep {
            id: "add-due-date-column",
            description: "Add the nullable due_date column",
            needed: needs_due_date_column,
            apply: add_due_date_column,
        },
    ]
}

/// Bring the schema up to the current revision. Idempotent.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    for step in schema_steps() {
        let needed = (step.needed)(conn).map_err(|source| StoreError::Migration {
            step: step.id,
            source,
        })?;
        if !needed {
            continue;
        }
        debug!(step = step.id, "applying schema step: {}", step.description);
        (step.apply)(conn).map_err(|source| StoreError::Migration {
            step: step.id,
            source,
        })?;
    }
    Ok(())
}
