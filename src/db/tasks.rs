//! Task CRUD and ordered reads.

use super::Database;
use crate::error::{StoreError, StoreResult};
use crate::types::{DUE_DATE_FORMAT, OrderBy, Task, validate_title};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};

/// Build an ORDER BY clause for list and search queries.
/// Returns a safe SQL ORDER BY expression.
pub(crate) fn build_order_clause(order_by: OrderBy) -> &'static str {
    match order_by {
        OrderBy::Position => "position ASC",
        // Unscheduled tasks sort last; ties within a day keep manual order.
        OrderBy::DueDate => "due_date IS NULL, due_date ASC, position ASC",
    }
}

pub(crate) fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let id: i64 = row.get("id")?;
    let title: String = row.get("title")?;
    let position: i64 = row.get("position")?;
    let due_date: Option<String> = row.get("due_date")?;

    let due_date = due_date
        .map(|s| {
            NaiveDate::parse_from_str(&s, DUE_DATE_FORMAT)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))
        })
        .transpose()?;

    Ok(Task {
        id,
        title,
        position,
        due_date,
    })
}

/// Internal helper to get a task using an existing connection.
pub(crate) fn get_task_internal(conn: &Connection, id: i64) -> StoreResult<Option<Task>> {
    let mut stmt = conn.prepare("SELECT id, title, position, due_date FROM tasks WHERE id = ?1")?;

    let result = stmt.query_row(params![id], parse_task_row);

    match result {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Renumber every position to a dense `1..=N` sequence, preserving the
/// current relative order. Must run inside the caller's transaction.
pub(crate) fn compact_positions(conn: &Connection) -> StoreResult<()> {
    let mut stmt = conn.prepare("SELECT id FROM tasks ORDER BY position, id")?;
    let ids: Vec<i64> = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for (index, id) in ids.iter().enumerate() {
        conn.execute(
            "UPDATE tasks SET position = ?1 WHERE id = ?2",
            params![index as i64 + 1, id],
        )?;
    }
    Ok(())
}

fn due_date_param(due_date: Option<NaiveDate>) -> Option<String> {
    due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string())
}

impl Database {
    /// Create a new task at the end of the list.
    pub fn create_task(&self, title: &str, due_date: Option<NaiveDate>) -> StoreResult<Task> {
        validate_title(title)?;
        let due = due_date_param(due_date);

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let next_position: i64 = tx.query_row(
                "SELECT COALESCE(MAX(position), 0) + 1 FROM tasks",
                [],
                |row| row.get(0),
            )?;
            tx.execute(
                "INSERT INTO tasks (title, position, due_date) VALUES (?1, ?2, ?3)",
                params![title, next_position, due],
            )?;
            let id = tx.last_insert_rowid();

            tx.commit()?;

            Ok(Task {
                id,
                title: title.to_string(),
                position: next_position,
                due_date,
            })
        })
    }

    /// Fetch a single task by id.
    pub fn get_task(&self, id: i64) -> StoreResult<Task> {
        self.with_conn(|conn| get_task_internal(conn, id)?.ok_or(StoreError::NotFound(id)))
    }

    /// Replace a task's title and due date. Position is left untouched.
    pub fn update_task(
        &self,
        id: i64,
        title: &str,
        due_date: Option<NaiveDate>,
    ) -> StoreResult<Task> {
        validate_title(title)?;
        let due = due_date_param(due_date);

        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET title = ?1, due_date = ?2 WHERE id = ?3",
                params![title, due, id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound(id));
            }
            get_task_internal(conn, id)?.ok_or(StoreError::NotFound(id))
        })
    }

    /// Delete a task. Unknown ids are a no-op; any actual deletion compacts
    /// the survivors back to a dense `1..=N` in the same transaction.
    pub fn delete_task(&self, id: i64) -> StoreResult<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let deleted = tx.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            if deleted > 0 {
                compact_positions(&tx)?;
            }

            tx.commit()?;
            Ok(())
        })
    }

    /// List every task in the requested order.
    pub fn list_tasks(&self, order_by: OrderBy) -> StoreResult<Vec<Task>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT id, title, position, due_date FROM tasks ORDER BY {}",
                build_order_clause(order_by)
            );
            let mut stmt = conn.prepare(&sql)?;
            let tasks = stmt
                .query_map([], parse_task_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
    }

    /// Number of tasks currently stored.
    pub fn task_count(&self) -> StoreResult<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DUE_DATE_FORMAT).unwrap()
    }

    #[test]
    fn create_assigns_trailing_positions() {
        let db = setup_db();

        let a = db.create_task("first", None).unwrap();
        let b = db.create_task("second", None).unwrap();
        let c = db.create_task("third", None).unwrap();

        assert_eq!(a.position, 1);
        assert_eq!(b.position, 2);
        assert_eq!(c.position, 3);
    }

    #[test]
    fn create_rejects_blank_titles() {
        let db = setup_db();

        assert!(matches!(
            db.create_task("", None),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            db.create_task("   ", None),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(db.task_count().unwrap(), 0);
    }

    #[test]
    fn create_then_get_round_trips() {
        let db = setup_db();

        let created = db.create_task("Buy milk", None).unwrap();
        let fetched = db.get_task(created.id).unwrap();

        assert_eq!(fetched.title, "Buy milk");
        assert_eq!(fetched.due_date, None);
        assert_eq!(fetched, created);
    }

    #[test]
    fn create_persists_due_date() {
        let db = setup_db();

        let created = db
            .create_task("pay rent", Some(date("2024-02-01")))
            .unwrap();
        let fetched = db.get_task(created.id).unwrap();

        assert_eq!(fetched.due_date, Some(date("2024-02-01")));
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let db = setup_db();

        assert!(matches!(db.get_task(42), Err(StoreError::NotFound(42))));
    }

    #[test]
    fn update_replaces_title_and_due_date_but_not_position() {
        let db = setup_db();
        db.create_task("first", None).unwrap();
        let task = db.create_task("second", Some(date("2024-03-01"))).unwrap();

        let updated = db
            .update_task(task.id, "second, revised", Some(date("2024-04-01")))
            .unwrap();

        assert_eq!(updated.title, "second, revised");
        assert_eq!(updated.due_date, Some(date("2024-04-01")));
        assert_eq!(updated.position, task.position);
    }

    #[test]
    fn update_with_none_clears_due_date() {
        let db = setup_db();
        let task = db.create_task("dated", Some(date("2024-03-01"))).unwrap();

        let updated = db.update_task(task.id, "dated", None).unwrap();

        assert_eq!(updated.due_date, None);
    }

    #[test]
    fn update_rejects_blank_title_and_unknown_id() {
        let db = setup_db();
        let task = db.create_task("fine", None).unwrap();

        assert!(matches!(
            db.update_task(task.id, " ", None),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            db.update_task(999, "ok", None),
            Err(StoreError::NotFound(999))
        ));
        // Failed updates leave the row untouched.
        assert_eq!(db.get_task(task.id).unwrap().title, "fine");
    }

    #[test]
    fn delete_compacts_positions_preserving_order() {
        let db = setup_db();
        let a = db.create_task("a", None).unwrap();
        let b = db.create_task("b", None).unwrap();
        let c = db.create_task("c", None).unwrap();

        db.delete_task(b.id).unwrap();

        let tasks = db.list_tasks(OrderBy::Position).unwrap();
        assert_eq!(
            tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![a.id, c.id]
        );
        assert_eq!(
            tasks.iter().map(|t| t.position).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let db = setup_db();
        db.create_task("a", None).unwrap();
        db.create_task("b", None).unwrap();

        db.delete_task(999).unwrap();

        let tasks = db.list_tasks(OrderBy::Position).unwrap();
        assert_eq!(
            tasks.iter().map(|t| t.position).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn list_by_due_date_puts_unscheduled_last() {
        let db = setup_db();
        let a = db.create_task("a", Some(date("2024-01-05"))).unwrap();
        let b = db.create_task("b", None).unwrap();
        let c = db.create_task("c", Some(date("2024-01-01"))).unwrap();

        let tasks = db.list_tasks(OrderBy::DueDate).unwrap();
        assert_eq!(
            tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![c.id, a.id, b.id]
        );
    }

    #[test]
    fn list_by_due_date_breaks_ties_by_position() {
        let db = setup_db();
        let a = db.create_task("a", Some(date("2024-01-05"))).unwrap();
        let b = db.create_task("b", Some(date("2024-01-05"))).unwrap();
        let c = db.create_task("c", None).unwrap();
        let d = db.create_task("d", None).unwrap();

        db.reorder_tasks(&[b.id, a.id, d.id, c.id]).unwrap();

        let tasks = db.list_tasks(OrderBy::DueDate).unwrap();
        assert_eq!(
            tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![b.id, a.id, d.id, c.id]
        );
    }
}
