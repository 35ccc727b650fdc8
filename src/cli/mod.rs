//! CLI definitions using clap.

use crate::model::{Amount, EmployeeId};
use crate::validate::{parse_employee_id, parse_month};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
    /// Comma-separated values
    Csv,
}

pub mod commands;

/// Shift Ledger - employee attendance and sales ledger
///
/// Run without a subcommand to open the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "shiftledger", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database path (default: ~/.shiftledger/data/ledger.db)
    #[arg(long, global = true, env = "SL_DB")]
    pub db: Option<PathBuf>,

    /// Reject clock-ins, clock-outs and sales for unregistered employee ids
    #[arg(long, global = true, env = "SL_STRICT")]
    pub strict: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json, csv)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no logging or error text on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive numbered menu (default)
    Menu,

    /// Employee registry
    Employee {
        #[command(subcommand)]
        command: EmployeeCommands,
    },

    /// Start a shift for an employee
    ClockIn {
        /// Employee ID
        #[arg(value_parser = parse_employee_id)]
        employee_id: EmployeeId,
    },

    /// Close every open shift of an employee
    ClockOut {
        /// Employee ID
        #[arg(value_parser = parse_employee_id)]
        employee_id: EmployeeId,
    },

    /// Show an employee's shifts
    Shifts {
        /// Employee ID
        #[arg(value_parser = parse_employee_id)]
        employee_id: EmployeeId,
    },

    /// Record a sale for an employee
    Sale {
        /// Employee ID
        #[arg(value_parser = parse_employee_id)]
        employee_id: EmployeeId,

        /// Sale amount, e.g. 19.90
        #[arg(value_parser = Amount::parse, allow_hyphen_values = true)]
        amount: Amount,
    },

    /// Show an employee's sales
    Sales {
        /// Employee ID
        #[arg(value_parser = parse_employee_id)]
        employee_id: EmployeeId,
    },

    /// Show the top seller of the current month
    Top,

    /// Rank employees by sales for a month of the year
    Leaderboard {
        /// Month (1-12, default: current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<u32>,

        /// Maximum rows to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommands {
    /// Register a new employee
    Add {
        /// Employee name
        name: String,
    },

    /// List registered employees
    List,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
