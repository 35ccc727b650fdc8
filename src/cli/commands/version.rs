//! Version command implementation.

use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct VersionOutput<'a> {
    name: &'a str,
    version: &'a str,
    build: &'a str,
    schema_version: i32,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn execute(out: &mut impl Write, json: bool) -> Result<()> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if json {
        let output = VersionOutput {
            name,
            version,
            build,
            schema_version: crate::storage::schema::CURRENT_SCHEMA_VERSION,
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
        return Ok(());
    }

    writeln!(out, "{name} version {version} ({build})")?;
    Ok(())
}
