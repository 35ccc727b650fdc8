//! Shift Ledger CLI entry point.

use clap::Parser;
use shiftledger::cli::commands;
use shiftledger::cli::{Cli, Commands, OutputFormat};
use shiftledger::config::resolve_db_path;
use shiftledger::error::Error;
use shiftledger::storage::{LedgerStorage, StoreOptions};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.format == OutputFormat::Csv {
        shiftledger::CSV_OUTPUT.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // The menu always talks to a human, so only an explicit request selects JSON
    let json = cli.json || cli.format == OutputFormat::Json;

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Commands that never touch the ledger
    match &cli.command {
        Some(Commands::Version) => return commands::version::execute(&mut out, json),
        Some(Commands::Completions { shell }) => {
            return commands::completions::execute(shell, &mut out);
        }
        _ => {}
    }

    let db_path = resolve_db_path(cli.db.as_deref())?;
    let options = StoreOptions {
        strict_references: cli.strict,
        ..StoreOptions::default()
    };
    let mut storage = LedgerStorage::open_with_options(&db_path, options)?;

    let result = match &cli.command {
        None | Some(Commands::Menu) => {
            let stdin = std::io::stdin();
            commands::shell::execute(&mut storage, stdin.lock(), &mut out)
        }

        // Employees
        Some(Commands::Employee { command }) => {
            commands::employee::execute(command, &mut storage, &mut out, json)
        }

        // Attendance
        Some(Commands::ClockIn { employee_id }) => {
            commands::attendance::clock_in(*employee_id, &mut storage, &mut out, json)
        }
        Some(Commands::ClockOut { employee_id }) => {
            commands::attendance::clock_out(*employee_id, &mut storage, &mut out, json)
        }
        Some(Commands::Shifts { employee_id }) => {
            commands::attendance::shifts(*employee_id, &storage, &mut out, json)
        }

        // Sales
        Some(Commands::Sale {
            employee_id,
            amount,
        }) => commands::sale::record(*employee_id, *amount, &mut storage, &mut out, json),
        Some(Commands::Sales { employee_id }) => {
            commands::sale::list(*employee_id, &storage, &mut out, json)
        }

        // Reports
        Some(Commands::Top) => commands::report::top(&storage, &mut out, json),
        Some(Commands::Leaderboard { month, limit }) => {
            commands::report::leaderboard(*month, *limit, &storage, &mut out, json)
        }

        Some(Commands::Version | Commands::Completions { .. }) => Ok(()),
    };

    out.flush()?;
    result
}
