//! Sales and the monthly leaderboard rows built from them.

use super::{Amount, EmployeeId};
use serde::Serialize;

super::row_id! {
    /// Row id of a sale.
    SaleId
}

/// A recorded sale. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    pub id: SaleId,
    pub employee_id: EmployeeId,
    pub amount: Amount,
    /// Unix milliseconds.
    pub occurred_at: i64,
}

/// The best seller of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopSeller {
    pub employee_id: EmployeeId,
    pub name: String,
    pub total: Amount,
}

/// One ranked row of the monthly leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub employee_id: EmployeeId,
    pub name: String,
    pub total: Amount,
    pub sale_count: i64,
}

impl From<LeaderboardEntry> for TopSeller {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            employee_id: entry.employee_id,
            name: entry.name,
            total: entry.total,
        }
    }
}
