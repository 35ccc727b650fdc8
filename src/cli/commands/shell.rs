//! Interactive numbered menu.
//!
//! Reads one choice per line, collects the values the chosen operation
//! needs, prints the outcome and loops. Validation errors and unknown
//! employees are reported and the loop continues; store failures end the
//! session with an error. End of input behaves like choosing Exit.

use super::{attendance, employee, report, sale};
use crate::error::{Error, Result};
use crate::model::Amount;
use crate::storage::LedgerStorage;
use crate::validate::{parse_employee_id, parse_menu_choice, MenuChoice};
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::debug;

/// What the loop does after an action.
enum Flow {
    Continue,
    Exit,
}

/// Menu session over a borrowed store and arbitrary line input.
pub struct Shell<'a, R, W> {
    storage: &'a mut LedgerStorage,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(storage: &'a mut LedgerStorage, input: R, out: W) -> Self {
        Self {
            storage,
            input,
            out,
        }
    }

    /// Run until Exit or end of input.
    ///
    /// # Errors
    ///
    /// Returns the first non-recoverable error (store or I/O failure).
    pub fn run(mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let line = match self.prompt("Choose an option: ") {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) if e.is_recoverable() => {
                    self.report(&e)?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(choice) = parse_menu_choice(&line) else {
                writeln!(self.out, "Invalid option, try again.")?;
                continue;
            };
            debug!(?choice, "Menu choice");

            match self.dispatch(choice) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is_recoverable() => self.report(&e)?,
                Err(e) => return Err(e),
            }
        }

        writeln!(self.out, "Exiting.")?;
        self.out.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "=== Shift Ledger ===".bold())?;
        for choice in MenuChoice::ALL {
            writeln!(self.out, "{}. {}", choice.number(), choice.label())?;
        }
        Ok(())
    }

    /// Print a label and read one trimmed line; `None` at end of input.
    ///
    /// A line that is not valid UTF-8 is consumed and rejected as
    /// `Error::InvalidArgument`.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }

        let line = String::from_utf8(bytes)
            .map_err(|_| Error::InvalidArgument("input is not valid UTF-8 text".to_string()))?;
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, e: &Error) -> Result<()> {
        writeln!(self.out, "{} {e}", "Error:".red())?;
        if let Some(hint) = e.hint() {
            writeln!(self.out, "  Hint: {hint}")?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::Exit => return Ok(Flow::Exit),
            MenuChoice::RegisterEmployee => {
                let Some(name) = self.prompt("Employee name: ")? else {
                    return Ok(Flow::Exit);
                };
                employee::add(&name, self.storage, &mut self.out, false)?;
            }
            MenuChoice::ClockIn => {
                let Some(id) = self.prompt_employee()? else {
                    return Ok(Flow::Exit);
                };
                attendance::clock_in(id, self.storage, &mut self.out, false)?;
            }
            MenuChoice::ClockOut => {
                let Some(id) = self.prompt_employee()? else {
                    return Ok(Flow::Exit);
                };
                attendance::clock_out(id, self.storage, &mut self.out, false)?;
            }
            MenuChoice::RecordSale => {
                let Some(id) = self.prompt_employee()? else {
                    return Ok(Flow::Exit);
                };
                let Some(raw) = self.prompt("Sale amount: ")? else {
                    return Ok(Flow::Exit);
                };
                let amount = Amount::parse(&raw)?;
                sale::record(id, amount, self.storage, &mut self.out, false)?;
            }
            MenuChoice::TopSeller => {
                let top = self.storage.top_seller_this_month()?;
                report::write_top_seller(&mut self.out, top.as_ref())?;
            }
            MenuChoice::ListEmployees => {
                let employees = self.storage.list_employees()?;
                employee::write_employee_table(&mut self.out, &employees)?;
            }
        }

        Ok(Flow::Continue)
    }

    /// List employees, then ask for an id.
    fn prompt_employee(&mut self) -> Result<Option<crate::model::EmployeeId>> {
        let employees = self.storage.list_employees()?;
        employee::write_employee_table(&mut self.out, &employees)?;

        match self.prompt("Employee ID: ")? {
            Some(raw) => parse_employee_id(&raw).map(Some),
            None => Ok(None),
        }
    }
}

/// Run the menu over `input`, writing to `out`.
///
/// # Errors
///
/// Returns the first non-recoverable error.
pub fn execute<R: BufRead, W: Write>(
    storage: &mut LedgerStorage,
    input: R,
    out: W,
) -> Result<()> {
    Shell::new(storage, input, out).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(storage: &mut LedgerStorage, script: &str) -> String {
        let mut buf = Vec::new();
        execute(storage, Cursor::new(script.to_string()), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_menu_lists_all_options() {
        let mut storage = LedgerStorage::open_memory().unwrap();
        let text = session(&mut storage, "0\n");

        assert!(text.contains("1. Register employee"));
        assert!(text.contains("5. Employee of the month"));
        assert!(text.contains("6. List employees"));
        assert!(text.contains("0. Exit"));
        assert!(text.trim_end().ends_with("Exiting."));
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut storage = LedgerStorage::open_memory().unwrap();
        let text = session(&mut storage, "");
        assert!(text.trim_end().ends_with("Exiting."));
    }

    #[test]
    fn test_unknown_option_loops() {
        let mut storage = LedgerStorage::open_memory().unwrap();
        let text = session(&mut storage, "9\nbanana\n0\n");
        assert_eq!(text.matches("Invalid option, try again.").count(), 2);
    }

    #[test]
    fn test_full_workday() {
        let mut storage = LedgerStorage::open_memory().unwrap();
        let script = "1\nAna\n1\nBruno\n2\n1\n4\n1\n100\n4\n2\n120\n4\n1\n50\n3\n1\n5\n0\n";
        let text = session(&mut storage, script);

        assert!(text.contains("Employee Ana registered with ID 1."));
        assert!(text.contains("Employee Bruno registered with ID 2."));
        assert!(text.contains("ID: 2, Name: Bruno"));
        assert!(text.contains("Clock-in recorded for employee 1"));
        assert!(text.contains("Sale of 120.00 recorded for employee 2."));
        assert!(text.contains("Clock-out recorded for employee 1"));
        assert!(text.contains("Employee of the month: Ana with 150.00 in sales."));

        assert_eq!(storage.list_sales(crate::model::EmployeeId(1)).unwrap().len(), 2);
    }

    #[test]
    fn test_validation_errors_keep_looping() {
        let mut storage = LedgerStorage::open_memory().unwrap();
        storage.register_employee("Ana").unwrap();

        let text = session(&mut storage, "2\nabc\n4\n1\n-5\n4\n1\n1,5\n1\n   \n0\n");

        assert!(text.contains("employee id must be a positive integer"));
        assert!(text.contains("Sale amounts cannot be negative"));
        assert!(text.contains("decimal separator"));
        assert!(text.contains("Required field is empty: name"));
        assert!(text.trim_end().ends_with("Exiting."));
        assert!(storage.list_sales(crate::model::EmployeeId(1)).unwrap().is_empty());
        assert_eq!(storage.list_employees().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_utf8_input_is_reported() {
        let mut storage = LedgerStorage::open_memory().unwrap();
        let mut buf = Vec::new();

        let script: &[u8] = b"1\n\xff\xfe\n\xff\n6\n0\n";
        execute(&mut storage, Cursor::new(script), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.matches("input is not valid UTF-8 text").count(), 2);
        assert!(text.contains("No employees registered."));
        assert!(text.trim_end().ends_with("Exiting."));
        assert!(storage.list_employees().unwrap().is_empty());
    }

    #[test]
    fn test_clock_out_without_shift_is_reported() {
        let mut storage = LedgerStorage::open_memory().unwrap();
        storage.register_employee("Ana").unwrap();

        let text = session(&mut storage, "3\n1\n0\n");
        assert!(text.contains("Employee 1 has no open shift."));
    }

    #[test]
    fn test_end_of_input_mid_action() {
        let mut storage = LedgerStorage::open_memory().unwrap();
        storage.register_employee("Ana").unwrap();

        let text = session(&mut storage, "4\n1\n");
        assert!(text.trim_end().ends_with("Exiting."));
        assert!(storage.list_sales(crate::model::EmployeeId(1)).unwrap().is_empty());
    }
}
