//! Data models for the ledger.
//!
//! This module contains all domain models:
//! - Employee
//! - AttendanceRecord (shift)
//! - Sale
//! - Amount (money in cents)
//! - Leaderboard rows

/// Declare an integer row-id newtype that binds directly as a SQL parameter.
macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The raw integer key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl rusqlite::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl rusqlite::types::FromSql for $name {
            fn column_result(
                value: rusqlite::types::ValueRef<'_>,
            ) -> rusqlite::types::FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

pub(crate) use row_id;

pub mod amount;
pub mod attendance;
pub mod employee;
pub mod sale;

pub use amount::Amount;
pub use attendance::{AttendanceRecord, AttendanceRecordId, ClockOut, ShiftState};
pub use employee::{Employee, EmployeeId};
pub use sale::{LeaderboardEntry, Sale, SaleId, TopSeller};
