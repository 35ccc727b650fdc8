//! SQLite storage layer for the ledger.
//!
//! This module provides the persistence layer using SQLite with:
//! - WAL mode and a busy timeout for the single local file
//! - One committed transaction per write
//! - Advisory or enforced employee references
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - Main SQLite storage implementation

pub mod schema;
pub mod sqlite;

pub use sqlite::{current_month, LedgerStorage, StoreOptions};
