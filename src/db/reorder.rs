//! Atomic bulk reordering of tasks.

use super::Database;
use crate::error::{StoreError, StoreResult};
use rusqlite::params;
use std::collections::HashSet;

impl Database {
    /// Apply a client-supplied permutation: `ordered_ids[i]` gets position
    /// `i + 1`, all in one transaction.
    ///
    /// The input must list every current task exactly once. Duplicates,
    /// unknown ids, and partial coverage are rejected before a single row
    /// is touched, so positions stay dense through any outcome.
    pub fn reorder_tasks(&self, ordered_ids: &[i64]) -> StoreResult<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let mut seen = HashSet::with_capacity(ordered_ids.len());
            for id in ordered_ids {
                if !seen.insert(*id) {
                    return Err(StoreError::validation(format!(
                        "duplicate id {id} in reorder"
                    )));
                }
            }

            let existing: HashSet<i64> = {
                let mut stmt = tx.prepare("SELECT id FROM tasks")?;
                stmt.query_map([], |row| row.get(0))?
                    .collect::<Result<HashSet<_>, _>>()?
            };

            if let Some(unknown) = ordered_ids.iter().find(|id| !existing.contains(*id)) {
                return Err(StoreError::validation(format!(
                    "unknown id {unknown} in reorder"
                )));
            }
            if seen.len() != existing.len() {
                return Err(StoreError::validation(format!(
                    "reorder must cover all {} tasks, got {}",
                    existing.len(),
                    ordered_ids.len()
                )));
            }

            for (index, id) in ordered_ids.iter().enumerate() {
                tx.execute(
                    "UPDATE tasks SET position = ?1 WHERE id = ?2",
                    params![index as i64 + 1, id],
                )?;
            }

            tx.commit()?;
            Ok(())
        })
    }
}
