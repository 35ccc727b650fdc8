//! Configuration management.
//!
//! Resolves where the ledger file lives. The only configuration surface is
//! the store path; everything else comes from command-line flags.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// File name of the ledger database.
pub const DB_FILE_NAME: &str = "ledger.db";

/// Get the global ledger directory location (`~/.shiftledger/`).
#[must_use]
pub fn global_ledger_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".shiftledger"))
}

/// Check if test mode is enabled.
///
/// Test mode is enabled by setting `SL_TEST_DB=1` (or any non-empty value).
/// This redirects all database operations to an isolated test database.
#[must_use]
pub fn is_test_mode() -> bool {
    std::env::var("SL_TEST_DB").is_ok_and(|v| is_truthy(&v))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `SL_TEST_DB` environment variable → uses test database
/// 3. `SHIFTLEDGER_DB` environment variable
/// 4. Global location: `~/.shiftledger/data/ledger.db`
///
/// # Errors
///
/// Returns `Error::Config` when nothing names a path and no home directory
/// can be determined.
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    let sources = PathSources {
        explicit: explicit_path.map(Path::to_path_buf),
        test_mode: is_test_mode(),
        env_db: std::env::var("SHIFTLEDGER_DB").ok(),
        ledger_dir: global_ledger_dir(),
    };
    sources.resolve()
}

/// Everything path resolution looks at, captured up front.
#[derive(Debug, Default)]
struct PathSources {
    explicit: Option<PathBuf>,
    test_mode: bool,
    env_db: Option<String>,
    ledger_dir: Option<PathBuf>,
}

impl PathSources {
    fn resolve(self) -> Result<PathBuf> {
        if let Some(path) = self.explicit {
            return Ok(path);
        }

        if self.test_mode {
            if let Some(dir) = &self.ledger_dir {
                return Ok(dir.join("test").join(DB_FILE_NAME));
            }
        }

        if let Some(db_path) = self.env_db.filter(|p| !p.trim().is_empty()) {
            return Ok(PathBuf::from(db_path));
        }

        self.ledger_dir
            .map(|dir| dir.join("data").join(DB_FILE_NAME))
            .ok_or_else(|| Error::Config("cannot determine the home directory".to_string()))
    }
}

/// Interpret a flag-like environment value.
fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}
