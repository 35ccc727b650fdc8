//! Employee command implementations (add, list).

use crate::cli::EmployeeCommands;
use crate::error::Result;
use crate::model::{Employee, EmployeeId};
use crate::storage::LedgerStorage;
use serde::Serialize;
use std::io::Write;

/// Output for employee add.
#[derive(Serialize)]
struct EmployeeAddOutput {
    id: EmployeeId,
    name: String,
}

/// Output for employee list.
#[derive(Serialize)]
struct EmployeeListOutput<'a> {
    employees: &'a [Employee],
    count: usize,
}

/// Execute employee commands.
///
/// # Errors
///
/// Returns an error if the store or the output fails.
pub fn execute(
    command: &EmployeeCommands,
    storage: &mut LedgerStorage,
    out: &mut impl Write,
    json: bool,
) -> Result<()> {
    match command {
        EmployeeCommands::Add { name } => add(name, storage, out, json),
        EmployeeCommands::List => list(storage, out, json),
    }
}

/// Register an employee and report the assigned id.
///
/// # Errors
///
/// Returns `Error::RequiredField` for a blank name.
pub fn add(
    name: &str,
    storage: &mut LedgerStorage,
    out: &mut impl Write,
    json: bool,
) -> Result<()> {
    let id = storage.register_employee(name)?;
    let name = name.trim().to_string();

    if json {
        let output = EmployeeAddOutput { id, name };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    } else {
        writeln!(out, "Employee {name} registered with ID {id}.")?;
    }

    Ok(())
}

/// List employees in registration order.
///
/// # Errors
///
/// Returns an error if the query or the output fails.
pub fn list(storage: &LedgerStorage, out: &mut impl Write, json: bool) -> Result<()> {
    let employees = storage.list_employees()?;

    if crate::is_csv() {
        writeln!(out, "id,name")?;
        for e in &employees {
            writeln!(out, "{},{}", e.id, crate::csv_escape(&e.name))?;
        }
    } else if json {
        let output = EmployeeListOutput {
            employees: &employees,
            count: employees.len(),
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    } else {
        write_employee_table(out, &employees)?;
    }

    Ok(())
}

/// Human listing shared with the interactive menu.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_employee_table(out: &mut impl Write, employees: &[Employee]) -> std::io::Result<()> {
    if employees.is_empty() {
        return writeln!(out, "No employees registered.");
    }

    writeln!(out, "Registered employees:")?;
    for e in employees {
        writeln!(out, "  ID: {}, Name: {}", e.id, e.name)?;
    }
    Ok(())
}
