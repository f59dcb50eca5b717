//! Schema introspection queries for the taskdeck database.

use rusqlite::{Connection, params};

/// Check whether a table exists.
pub fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Get the column names of a table using PRAGMA table_info.
pub fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;

    let columns: Vec<String> = stmt
        .query_map([], |row| row.get(1))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(columns)
}

/// Check whether a table has a column of the given name.
pub fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    Ok(table_columns(conn, table)?.iter().any(|c| c == column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn introspection_reports_tables_and_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE things (id INTEGER PRIMARY KEY, name TEXT);")
            .unwrap();

        assert!(table_exists(&conn, "things").unwrap());
        assert!(!table_exists(&conn, "missing").unwrap());

        let columns = table_columns(&conn, "things").unwrap();
        assert_eq!(columns, vec!["id", "name"]);

        assert!(has_column(&conn, "things", "name").unwrap());
        assert!(!has_column(&conn, "things", "position").unwrap());
    }

    #[test]
    fn table_columns_is_empty_for_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        let columns = table_columns(&conn, "nope").unwrap();
        assert!(columns.is_empty());
    }
}
