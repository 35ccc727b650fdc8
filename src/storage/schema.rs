//! Database schema definitions.
//!
//! The schema is small and additive. Every statement uses `IF NOT EXISTS`
//! so applying it on each open is safe.

use rusqlite::{Connection, Result};

/// Current schema version for migration tracking.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// The complete SQL schema for the ledger database.
///
/// Timestamps are stored as INTEGER (Unix milliseconds). Money is stored as
/// INTEGER cents. Foreign keys are declared without cascade actions; whether
/// SQLite enforces them depends on the `foreign_keys` pragma chosen at open.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0)
);

CREATE TABLE IF NOT EXISTS attendance_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL,
    clock_in INTEGER NOT NULL,
    clock_out INTEGER,
    FOREIGN KEY (employee_id) REFERENCES employees(id)
);

CREATE INDEX IF NOT EXISTS idx_attendance_open
    ON attendance_records(employee_id, clock_out);

CREATE TABLE IF NOT EXISTS sales (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL,
    amount_cents INTEGER NOT NULL CHECK (amount_cents >= 0),
    occurred_at INTEGER NOT NULL,
    FOREIGN KEY (employee_id) REFERENCES employees(id)
);

CREATE INDEX IF NOT EXISTS idx_sales_employee ON sales(employee_id);
CREATE INDEX IF NOT EXISTS idx_sales_occurred ON sales(occurred_at);
";

/// Apply the schema to the database.
///
/// Idempotent: repeated calls neither duplicate tables nor touch data.
/// `enforce_foreign_keys` turns on SQLite's referential checks; when off,
/// rows may reference unknown employees.
///
/// # Errors
///
/// Returns an error if the SQL execution fails or pragmas cannot be set.
pub fn apply_schema(conn: &Connection, enforce_foreign_keys: bool) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(
        None,
        "foreign_keys",
        if enforce_foreign_keys { "ON" } else { "OFF" },
    )?;

    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        rusqlite::params![
            format!("v{CURRENT_SCHEMA_VERSION}"),
            chrono::Utc::now().timestamp_millis()
        ],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<_>>>()
        .unwrap()
    }

    #[test]
    fn test_apply_schema() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn, false).expect("Failed to apply schema");

        let tables = table_names(&conn);
        assert_eq!(
            tables,
            vec!["attendance_records", "employees", "sales", "schema_migrations"]
        );
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn, false).expect("First apply failed");
        conn.execute("INSERT INTO employees (name) VALUES ('Ana')", [])
            .unwrap();

        apply_schema(&conn, false).expect("Second apply failed");

        assert_eq!(table_names(&conn).len(), 4);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn test_foreign_keys_follow_mode() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn, false).unwrap();
        let fk: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 0);

        // Orphans are accepted while enforcement is off
        conn.execute(
            "INSERT INTO sales (employee_id, amount_cents, occurred_at) VALUES (99, 100, 0)",
            [],
        )
        .unwrap();

        let strict = Connection::open_in_memory().unwrap();
        apply_schema(&strict, true).unwrap();
        let result = strict.execute(
            "INSERT INTO sales (employee_id, amount_cents, occurred_at) VALUES (99, 100, 0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_amount_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn, false).unwrap();

        let result = conn.execute(
            "INSERT INTO sales (employee_id, amount_cents, occurred_at) VALUES (1, -1, 0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_name_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn, false).unwrap();

        assert!(conn.execute("INSERT INTO employees (name) VALUES ('  ')", []).is_err());
    }
}
