//! CSV export for the load ledger and the cashflow projection.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::load::LoadSummary;
use crate::solar::CashflowPoint;

/// Column header for the ledger export.
const LEDGER_HEADER: &str = "device,power_w,hours_per_day,quantity,wh_per_day,kwh_per_day";

/// Column header for the cashflow export.
const CASHFLOW_HEADER: &str = "year,cumulative_savings,investment";

/// Exports the ledger rows to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_ledger_csv(summary: &LoadSummary, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_ledger_csv(summary, io::BufWriter::new(file))
}

/// Writes one row per ledger entry, in insertion order, to any writer.
///
/// Device names are quoted by the CSV writer when they contain commas.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_ledger_csv(summary: &LoadSummary, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(LEDGER_HEADER.split(','))?;

    for e in &summary.per_entry {
        wtr.write_record(&[
            e.name.clone(),
            format!("{:.1}", e.power_watts),
            format!("{:.2}", e.hours_per_day),
            e.quantity.to_string(),
            format!("{:.2}", e.watt_hours_per_day),
            format!("{:.4}", e.kwh_per_day),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the cashflow series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_cashflow_csv(points: &[CashflowPoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_cashflow_csv(points, io::BufWriter::new(file))
}

/// Writes one row per projected year to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_cashflow_csv(points: &[CashflowPoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(CASHFLOW_HEADER.split(','))?;

    for p in points {
        wtr.write_record(&[
            p.year.to_string(),
            format!("{:.2}", p.cumulative_savings),
            format!("{:.2}", p.investment),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
