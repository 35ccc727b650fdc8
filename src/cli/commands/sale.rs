//! Sale command implementations (record, list).

use super::format_timestamp;
use crate::error::Result;
use crate::model::{Amount, EmployeeId, Sale, SaleId};
use crate::storage::LedgerStorage;
use serde::Serialize;
use std::io::Write;

/// Output for sale recording.
#[derive(Serialize)]
struct SaleRecordOutput {
    id: SaleId,
    employee_id: EmployeeId,
    amount: Amount,
}

/// Output for sale listing.
#[derive(Serialize)]
struct SaleListOutput<'a> {
    employee_id: EmployeeId,
    sales: &'a [Sale],
    count: usize,
    total: Amount,
}

/// Record a sale for the employee.
///
/// # Errors
///
/// Returns `Error::EmployeeNotFound` in strict mode for unknown ids.
pub fn record(
    employee_id: EmployeeId,
    amount: Amount,
    storage: &mut LedgerStorage,
    out: &mut impl Write,
    json: bool,
) -> Result<()> {
    let id = storage.record_sale(employee_id, amount)?;

    if json {
        let output = SaleRecordOutput {
            id,
            employee_id,
            amount,
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    } else {
        writeln!(out, "Sale of {amount} recorded for employee {employee_id}.")?;
    }

    Ok(())
}

/// List the employee's sales with a running total.
///
/// # Errors
///
/// Returns an error if the query or the output fails.
pub fn list(
    employee_id: EmployeeId,
    storage: &LedgerStorage,
    out: &mut impl Write,
    json: bool,
) -> Result<()> {
    let sales = storage.list_sales(employee_id)?;
    let total = sales.iter().fold(Amount::ZERO, |acc, s| acc + s.amount);

    if crate::is_csv() {
        writeln!(out, "id,employee_id,amount,occurred_at")?;
        for s in &sales {
            writeln!(
                out,
                "{},{},{},{}",
                s.id,
                s.employee_id,
                s.amount,
                format_timestamp(s.occurred_at)
            )?;
        }
    } else if json {
        let output = SaleListOutput {
            employee_id,
            sales: &sales,
            count: sales.len(),
            total,
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    } else if sales.is_empty() {
        writeln!(out, "No sales recorded for employee {employee_id}.")?;
    } else {
        writeln!(out, "Sales for employee {employee_id}:")?;
        for s in &sales {
            writeln!(
                out,
                "  #{} {} {:>12}",
                s.id,
                format_timestamp(s.occurred_at),
                s.amount
            )?;
        }
        writeln!(out, "Total: {total} ({} sales)", sales.len())?;
    }

    Ok(())
}
