//! Substring search over task titles.

use super::Database;
use super::tasks::{build_order_clause, parse_task_row};
use crate::error::StoreResult;
use crate::types::{OrderBy, Task};
use rusqlite::params;

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

impl Database {
    /// Case-insensitive substring match against titles. An empty query
    /// returns the full list; ordering follows the same rules as
    /// `list_tasks`.
    pub fn search_tasks(&self, query: &str, order_by: OrderBy) -> StoreResult<Vec<Task>> {
        if query.is_empty() {
            return self.list_tasks(order_by);
        }

        let pattern = format!("%{}%", escape_like(query));

        self.with_conn(|conn| {
            let sql = format!(
                "SELECT id, title, position, due_date FROM tasks
                 WHERE title LIKE ?1 ESCAPE '\\'
                 ORDER BY {}",
                build_order_clause(order_by)
            );
            let mut stmt = conn.prepare(&sql)?;
            let tasks = stmt
                .query_map(params![pattern], parse_task_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
    }
}
