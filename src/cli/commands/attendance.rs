//! Attendance command implementations (clock-in, clock-out, shifts).

use super::format_timestamp;
use crate::error::Result;
use crate::model::attendance::format_duration;
use crate::model::{AttendanceRecord, AttendanceRecordId, ClockOut, EmployeeId};
use crate::storage::LedgerStorage;
use serde::Serialize;
use std::io::Write;

/// Output for clock-in.
#[derive(Serialize)]
struct ClockInOutput {
    employee_id: EmployeeId,
    record_id: AttendanceRecordId,
    clock_in: i64,
}

/// Output for clock-out.
#[derive(Serialize)]
struct ClockOutOutput<'a> {
    employee_id: EmployeeId,
    #[serde(flatten)]
    outcome: &'a ClockOut,
}

/// Output for shifts.
#[derive(Serialize)]
struct ShiftListOutput<'a> {
    employee_id: EmployeeId,
    shifts: Vec<ShiftItem<'a>>,
    count: usize,
}

#[derive(Serialize)]
struct ShiftItem<'a> {
    #[serde(flatten)]
    record: &'a AttendanceRecord,
    state: &'static str,
    duration_ms: Option<i64>,
}

/// Open a shift for the employee.
///
/// # Errors
///
/// Returns `Error::EmployeeNotFound` in strict mode for unknown ids.
pub fn clock_in(
    employee_id: EmployeeId,
    storage: &mut LedgerStorage,
    out: &mut impl Write,
    json: bool,
) -> Result<()> {
    let record = storage.clock_in(employee_id)?;

    if json {
        let output = ClockInOutput {
            employee_id,
            record_id: record.id,
            clock_in: record.clock_in,
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    } else {
        writeln!(
            out,
            "Clock-in recorded for employee {employee_id} at {}.",
            format_timestamp(record.clock_in)
        )?;
    }

    Ok(())
}

/// Close the employee's open shifts.
///
/// Having no open shift is reported, not treated as a failure.
///
/// # Errors
///
/// Returns `Error::EmployeeNotFound` in strict mode for unknown ids.
pub fn clock_out(
    employee_id: EmployeeId,
    storage: &mut LedgerStorage,
    out: &mut impl Write,
    json: bool,
) -> Result<()> {
    let outcome = storage.clock_out(employee_id)?;

    if json {
        let output = ClockOutOutput {
            employee_id,
            outcome: &outcome,
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
        return Ok(());
    }

    match outcome {
        ClockOut::Closed {
            record_ids,
            clock_out,
        } => {
            write!(
                out,
                "Clock-out recorded for employee {employee_id} at {}.",
                format_timestamp(clock_out)
            )?;
            if record_ids.len() > 1 {
                write!(out, " ({} open shifts closed)", record_ids.len())?;
            }
            writeln!(out)?;
        }
        ClockOut::NotClockedIn => {
            writeln!(out, "Employee {employee_id} has no open shift.")?;
        }
    }

    Ok(())
}

/// List the employee's shifts.
///
/// # Errors
///
/// Returns an error if the query or the output fails.
pub fn shifts(
    employee_id: EmployeeId,
    storage: &LedgerStorage,
    out: &mut impl Write,
    json: bool,
) -> Result<()> {
    let records = storage.list_attendance(employee_id)?;

    if crate::is_csv() {
        writeln!(out, "id,employee_id,clock_in,clock_out,state")?;
        for r in &records {
            writeln!(
                out,
                "{},{},{},{},{}",
                r.id,
                r.employee_id,
                format_timestamp(r.clock_in),
                r.clock_out.map(format_timestamp).unwrap_or_default(),
                r.state().as_str()
            )?;
        }
    } else if json {
        let shifts: Vec<ShiftItem> = records
            .iter()
            .map(|record| ShiftItem {
                record,
                state: record.state().as_str(),
                duration_ms: record.duration_ms(),
            })
            .collect();
        let output = ShiftListOutput {
            employee_id,
            count: shifts.len(),
            shifts,
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    } else if records.is_empty() {
        writeln!(out, "No shifts recorded for employee {employee_id}.")?;
    } else {
        writeln!(out, "Shifts for employee {employee_id}:")?;
        for r in &records {
            match (r.clock_out, r.duration_ms()) {
                (Some(closed), Some(ms)) => writeln!(
                    out,
                    "  #{} {} -> {} ({})",
                    r.id,
                    format_timestamp(r.clock_in),
                    format_timestamp(closed),
                    format_duration(ms)
                )?,
                _ => writeln!(
                    out,
                    "  #{} {} -> (open)",
                    r.id,
                    format_timestamp(r.clock_in)
                )?,
            }
        }
    }

    Ok(())
}
