//! Input validation for operator-entered values.
//!
//! The interactive menu collects raw text; these helpers turn it into typed
//! values or a validation error the menu can report before looping again.
//! Menu choices resolve in two tiers: exact number, then word synonym.

use crate::error::{Error, Result};
use crate::model::EmployeeId;
use std::collections::HashMap;
use std::sync::LazyLock;

/// One entry of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    RegisterEmployee,
    ClockIn,
    ClockOut,
    RecordSale,
    TopSeller,
    ListEmployees,
}

impl MenuChoice {
    /// All choices in menu order (the number is the position, with Exit last).
    pub const ALL: [Self; 7] = [
        Self::RegisterEmployee,
        Self::ClockIn,
        Self::ClockOut,
        Self::RecordSale,
        Self::TopSeller,
        Self::ListEmployees,
        Self::Exit,
    ];

    /// The number the operator types.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Exit => 0,
            Self::RegisterEmployee => 1,
            Self::ClockIn => 2,
            Self::ClockOut => 3,
            Self::RecordSale => 4,
            Self::TopSeller => 5,
            Self::ListEmployees => 6,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exit => "Exit",
            Self::RegisterEmployee => "Register employee",
            Self::ClockIn => "Clock in",
            Self::ClockOut => "Clock out",
            Self::RecordSale => "Record sale",
            Self::TopSeller => "Employee of the month",
            Self::ListEmployees => "List employees",
        }
    }

    const fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => Some(Self::Exit),
            1 => Some(Self::RegisterEmployee),
            2 => Some(Self::ClockIn),
            3 => Some(Self::ClockOut),
            4 => Some(Self::RecordSale),
            5 => Some(Self::TopSeller),
            6 => Some(Self::ListEmployees),
            _ => None,
        }
    }
}

static MENU_SYNONYMS: LazyLock<HashMap<&str, MenuChoice>> = LazyLock::new(|| {
    [
        ("exit", MenuChoice::Exit),
        ("quit", MenuChoice::Exit),
        ("q", MenuChoice::Exit),
        ("register", MenuChoice::RegisterEmployee),
        ("add", MenuChoice::RegisterEmployee),
        ("in", MenuChoice::ClockIn),
        ("clock-in", MenuChoice::ClockIn),
        ("out", MenuChoice::ClockOut),
        ("clock-out", MenuChoice::ClockOut),
        ("sale", MenuChoice::RecordSale),
        ("top", MenuChoice::TopSeller),
        ("best", MenuChoice::TopSeller),
        ("list", MenuChoice::ListEmployees),
        ("ls", MenuChoice::ListEmployees),
    ]
    .into_iter()
    .collect()
});

/// Resolve a menu line to a choice, or `None` if it matches nothing.
#[must_use]
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    let trimmed = input.trim();

    if let Ok(n) = trimmed.parse::<u8>() {
        return MenuChoice::from_number(n);
    }

    MENU_SYNONYMS
        .get(trimmed.to_lowercase().as_str())
        .copied()
}

/// Parse an employee id typed by the operator.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` unless the input is a positive integer.
pub fn parse_employee_id(input: &str) -> Result<EmployeeId> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(EmployeeId(id)),
        _ => Err(Error::InvalidArgument(format!(
            "employee id must be a positive integer, got '{trimmed}'"
        ))),
    }
}

/// Parse a month of the year (1-12).
///
/// # Errors
///
/// Returns `Error::InvalidArgument` for anything else.
pub fn parse_month(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(m) if (1..=12).contains(&m) => Ok(m),
        _ => Err(Error::InvalidArgument(format!(
            "month must be between 1 and 12, got '{trimmed}'"
        ))),
    }
}
