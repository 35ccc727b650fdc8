//! Report command implementations (employee of the month, leaderboard).

use crate::error::Result;
use crate::model::{LeaderboardEntry, TopSeller};
use crate::storage::{current_month, LedgerStorage};
use serde::Serialize;
use std::io::Write;

/// Output for the top seller report.
#[derive(Serialize)]
struct TopOutput<'a> {
    month: u32,
    top: Option<&'a TopSeller>,
}

/// Output for the leaderboard.
#[derive(Serialize)]
struct LeaderboardOutput<'a> {
    month: u32,
    entries: &'a [LeaderboardEntry],
    count: usize,
}

/// Report the employee of the current month.
///
/// # Errors
///
/// Returns an error if the query or the output fails.
pub fn top(storage: &LedgerStorage, out: &mut impl Write, json: bool) -> Result<()> {
    let month = current_month();
    let top = storage.top_seller_for_month(month)?;

    if json {
        let output = TopOutput {
            month,
            top: top.as_ref(),
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
        return Ok(());
    }

    write_top_seller(out, top.as_ref())?;
    Ok(())
}

/// Human line shared with the interactive menu.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_top_seller(out: &mut impl Write, top: Option<&TopSeller>) -> std::io::Result<()> {
    match top {
        Some(t) => writeln!(
            out,
            "Employee of the month: {} with {} in sales.",
            t.name, t.total
        ),
        None => writeln!(out, "No sales recorded this month."),
    }
}

/// Rank employees by sales for a month (default: current month).
///
/// # Errors
///
/// Returns `Error::InvalidArgument` for a month outside 1-12, or an error
/// if the query or the output fails.
pub fn leaderboard(
    month: Option<u32>,
    limit: Option<usize>,
    storage: &LedgerStorage,
    out: &mut impl Write,
    json: bool,
) -> Result<()> {
    let month = month.unwrap_or_else(current_month);
    let entries = storage.monthly_leaderboard(month, limit)?;

    if crate::is_csv() {
        writeln!(out, "rank,employee_id,name,total,sale_count")?;
        for e in &entries {
            writeln!(
                out,
                "{},{},{},{},{}",
                e.rank,
                e.employee_id,
                crate::csv_escape(&e.name),
                e.total,
                e.sale_count
            )?;
        }
    } else if json {
        let output = LeaderboardOutput {
            month,
            entries: &entries,
            count: entries.len(),
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    } else if entries.is_empty() {
        writeln!(out, "No sales recorded for month {month}.")?;
    } else {
        let width = entries
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        writeln!(out, "Leaderboard for month {month}:")?;
        writeln!(out, "{:>4}  {:<width$}  {:>12}  {:>5}", "#", "Name", "Total", "Sales")?;
        for e in &entries {
            writeln!(
                out,
                "{:>4}  {:<width$}  {:>12}  {:>5}",
                e.rank,
                e.name,
                e.total.to_string(),
                e.sale_count
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::Amount;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn seeded() -> LedgerStorage {
        let mut storage = LedgerStorage::open_memory().unwrap();
        let ana = storage.register_employee("Ana").unwrap();
        let bruno = storage.register_employee("Bruno").unwrap();
        storage.record_sale(ana, Amount::parse("100").unwrap()).unwrap();
        storage.record_sale(ana, Amount::parse("50").unwrap()).unwrap();
        storage.record_sale(bruno, Amount::parse("120").unwrap()).unwrap();
        storage
    }

    #[test]
    fn test_top_with_no_sales() {
        let storage = LedgerStorage::open_memory().unwrap();

        let text = render(|out| top(&storage, out, false));
        assert_eq!(text, "No sales recorded this month.\n");

        let text = render(|out| top(&storage, out, true));
        let json: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert!(json["top"].is_null());
    }

    #[test]
    fn test_top_names_winner() {
        let storage = seeded();

        let text = render(|out| top(&storage, out, false));
        assert_eq!(text, "Employee of the month: Ana with 150.00 in sales.\n");

        let text = render(|out| top(&storage, out, true));
        let json: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(json["top"]["name"], "Ana");
        assert_eq!(json["top"]["total"], 150.0);
    }

    #[test]
    fn test_leaderboard_table() {
        let storage = seeded();

        let text = render(|out| leaderboard(None, None, &storage, out, false));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("Ana") && lines[2].contains("150.00"));
        assert!(lines[3].contains("Bruno") && lines[3].contains("120.00"));

        let text = render(|out| leaderboard(None, Some(1), &storage, out, true));
        let json: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["entries"][0]["rank"], 1);
        assert_eq!(json["entries"][0]["sale_count"], 2);
    }

    #[test]
    fn test_leaderboard_empty_month() {
        let storage = seeded();
        let other = current_month() % 12 + 1;

        let text = render(|out| leaderboard(Some(other), None, &storage, out, false));
        assert_eq!(text, format!("No sales recorded for month {other}.\n"));
    }

    #[test]
    fn test_leaderboard_rejects_bad_month() {
        let storage = seeded();
        let mut buf = Vec::new();

        let result = leaderboard(Some(0), None, &storage, &mut buf, false);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
