//! SQLite storage implementation.
//!
//! This module provides the ledger's storage backend. Every write runs in
//! its own IMMEDIATE transaction and is committed before the call returns.

use crate::error::{Error, Result};
use crate::model::{
    Amount, AttendanceRecord, AttendanceRecordId, ClockOut, Employee, EmployeeId,
    LeaderboardEntry, Sale, SaleId, TopSeller,
};
use crate::storage::schema::apply_schema;
use chrono::Datelike;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// How long a write waits for a lock held by another process.
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Options that shape how the store is opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    /// Reject operations that reference unknown employees.
    ///
    /// Off by default: attendance and sales rows may then point at ids
    /// that were never registered.
    pub strict_references: bool,
}

/// SQLite-based storage backend.
///
/// Owns the single connection of the process. Dropping it closes the store.
#[derive(Debug)]
pub struct LedgerStorage {
    conn: Connection,
    options: StoreOptions,
}

impl LedgerStorage {
    /// Open a ledger at the given path, creating it (and its parent
    /// directory) if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, StoreOptions::default())
    }

    /// Open a ledger with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open_with_options(path: &Path, options: StoreOptions) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        apply_schema(&conn, options.strict_references)?;
        info!(path = %path.display(), strict = options.strict_references, "Opened ledger");
        Ok(Self { conn, options })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        Self::open_memory_with_options(StoreOptions::default())
    }

    /// Open an in-memory database with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory_with_options(options: StoreOptions) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn, options.strict_references)?;
        Ok(Self { conn, options })
    }

    /// Get a reference to the underlying connection (for read operations).
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Whether unknown employee ids are rejected.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.options.strict_references
    }

    /// Execute a single write as one committed transaction.
    ///
    /// The transaction is rolled back if the closure fails.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails.
    pub fn mutate<F, R>(&mut self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

        let result = f(&tx)?;

        tx.commit()?;
        debug!(op, "Committed");

        Ok(result)
    }

    // ===================
    // Employee Operations
    // ===================

    /// Register a new employee and return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `Error::RequiredField` if the name is blank, or a database
    /// error if the insert fails.
    pub fn register_employee(&mut self, name: &str) -> Result<EmployeeId> {
        let name = Employee::normalize_name(name).ok_or(Error::RequiredField("name"))?;

        let id = self.mutate("register_employee", |tx| {
            tx.execute("INSERT INTO employees (name) VALUES (?1)", [&name])?;
            Ok(EmployeeId(tx.last_insert_rowid()))
        })?;

        info!(employee_id = %id, "Registered employee");
        Ok(id)
    }

    /// List all employees in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees(&self) -> Result<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM employees ORDER BY id ASC")?;

        let rows = stmt.query_map([], map_employee_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    /// Get an employee by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                "SELECT id, name FROM employees WHERE id = ?1",
                [id],
                map_employee_row,
            )
            .optional()?;

        Ok(employee)
    }

    // =====================
    // Attendance Operations
    // =====================

    /// Open a new attendance record for the employee.
    ///
    /// A second clock-in before a clock-out creates a second open record.
    /// Returns the new record as stored.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmployeeNotFound` in strict mode for unknown ids,
    /// or a database error if the insert fails.
    pub fn clock_in(&mut self, employee_id: EmployeeId) -> Result<AttendanceRecord> {
        let strict = self.is_strict();
        let now = now_millis();

        let id = self.mutate("clock_in", |tx| {
            ensure_employee(tx, strict, employee_id)?;
            tx.execute(
                "INSERT INTO attendance_records (employee_id, clock_in, clock_out)
                 VALUES (?1, ?2, NULL)",
                rusqlite::params![employee_id, now],
            )?;
            Ok(AttendanceRecordId(tx.last_insert_rowid()))
        })?;

        info!(%employee_id, record_id = %id, "Clocked in");
        Ok(AttendanceRecord {
            id,
            employee_id,
            clock_in: now,
            clock_out: None,
        })
    }

    /// Close every open attendance record of the employee.
    ///
    /// The closing time never precedes any of the records' clock-in.
    /// Returns `ClockOut::NotClockedIn` without writing when nothing is open.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmployeeNotFound` in strict mode for unknown ids,
    /// or a database error if the update fails.
    pub fn clock_out(&mut self, employee_id: EmployeeId) -> Result<ClockOut> {
        let strict = self.is_strict();
        let now = now_millis();

        let outcome = self.mutate("clock_out", |tx| {
            ensure_employee(tx, strict, employee_id)?;

            let open: Vec<(AttendanceRecordId, i64)> = tx
                .prepare(
                    "SELECT id, clock_in FROM attendance_records
                     WHERE employee_id = ?1 AND clock_out IS NULL
                     ORDER BY id ASC",
                )?
                .query_map([employee_id], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<std::result::Result<_, _>>()?;

            let Some(latest_in) = open.iter().map(|(_, clock_in)| *clock_in).max() else {
                return Ok(ClockOut::NotClockedIn);
            };
            let closed_at = now.max(latest_in);

            tx.execute(
                "UPDATE attendance_records SET clock_out = ?1
                 WHERE employee_id = ?2 AND clock_out IS NULL",
                rusqlite::params![closed_at, employee_id],
            )?;

            Ok(ClockOut::Closed {
                record_ids: open.into_iter().map(|(id, _)| id).collect(),
                clock_out: closed_at,
            })
        })?;

        match &outcome {
            ClockOut::Closed { record_ids, .. } => {
                info!(%employee_id, closed = record_ids.len(), "Clocked out");
            }
            ClockOut::NotClockedIn => debug!(%employee_id, "No open record to close"),
        }
        Ok(outcome)
    }

    /// List the employee's attendance records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_attendance(&self, employee_id: EmployeeId) -> Result<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, employee_id, clock_in, clock_out FROM attendance_records
             WHERE employee_id = ?1 ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([employee_id], |row| {
            Ok(AttendanceRecord {
                id: row.get(0)?,
                employee_id: row.get(1)?,
                clock_in: row.get(2)?,
                clock_out: row.get(3)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // ================
    // Sales Operations
    // ================

    /// Record a sale made now by the employee.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmployeeNotFound` in strict mode for unknown ids,
    /// or a database error if the insert fails.
    pub fn record_sale(&mut self, employee_id: EmployeeId, amount: Amount) -> Result<SaleId> {
        let strict = self.is_strict();
        let now = now_millis();

        let id = self.mutate("record_sale", |tx| {
            ensure_employee(tx, strict, employee_id)?;
            tx.execute(
                "INSERT INTO sales (employee_id, amount_cents, occurred_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![employee_id, amount, now],
            )?;
            Ok(SaleId(tx.last_insert_rowid()))
        })?;

        info!(%employee_id, sale_id = %id, %amount, "Recorded sale");
        Ok(id)
    }

    /// List the employee's sales, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_sales(&self, employee_id: EmployeeId) -> Result<Vec<Sale>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, employee_id, amount_cents, occurred_at FROM sales
             WHERE employee_id = ?1 ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([employee_id], |row| {
            Ok(Sale {
                id: row.get(0)?,
                employee_id: row.get(1)?,
                amount: row.get(2)?,
                occurred_at: row.get(3)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // =================
    // Report Operations
    // =================

    /// Top seller of the current local calendar month.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn top_seller_this_month(&self) -> Result<Option<TopSeller>> {
        self.top_seller_for_month(current_month())
    }

    /// Top seller for a month of the year (1-12).
    ///
    /// Sales from that month of *any* year count. Ties have no defined
    /// winner.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for a month outside 1-12, or an
    /// error if the query fails.
    pub fn top_seller_for_month(&self, month: u32) -> Result<Option<TopSeller>> {
        let top = self
            .monthly_leaderboard(month, Some(1))?
            .into_iter()
            .next()
            .map(TopSeller::from);

        Ok(top)
    }

    /// Employees ranked by total sales for a month of the year (1-12).
    ///
    /// Uses the same year-agnostic filter as [`Self::top_seller_for_month`].
    /// Sales by unregistered employee ids are not ranked.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for a month outside 1-12, or an
    /// error if the query fails.
    pub fn monthly_leaderboard(
        &self,
        month: u32,
        limit: Option<usize>,
    ) -> Result<Vec<LeaderboardEntry>> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidArgument(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }

        // SQLite treats a negative LIMIT as unbounded
        let limit = limit
            .and_then(|l| i64::try_from(l).ok())
            .unwrap_or(-1);

        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.name, SUM(s.amount_cents) AS total, COUNT(*) AS sale_count
             FROM sales s
             JOIN employees e ON s.employee_id = e.id
             WHERE strftime('%m', s.occurred_at / 1000, 'unixepoch', 'localtime') = ?1
             GROUP BY e.id
             ORDER BY total DESC
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(rusqlite::params![format!("{month:02}"), limit], |row| {
            Ok((
                row.get::<_, EmployeeId>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Amount>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;

        let mut entries = Vec::new();
        for (rank, row) in rows.enumerate() {
            let (employee_id, name, total, sale_count) = row?;
            entries.push(LeaderboardEntry {
                rank: rank + 1,
                employee_id,
                name,
                total,
                sale_count,
            });
        }

        Ok(entries)
    }
}

/// Fail with `EmployeeNotFound` when strict and the id is unknown.
fn ensure_employee(conn: &Connection, strict: bool, id: EmployeeId) -> Result<()> {
    if !strict {
        return Ok(());
    }

    let exists = conn
        .prepare("SELECT 1 FROM employees WHERE id = ?1")?
        .exists([id])?;

    if exists {
        Ok(())
    } else {
        Err(Error::EmployeeNotFound { id: id.get() })
    }
}

fn map_employee_row(row: &rusqlite::Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Month of the year (1-12) in local time.
#[must_use]
pub fn current_month() -> u32 {
    chrono::Local::now().month()
}
