//! Console formatting for the CLI.

use crate::load::LoadSummary;
use crate::simulation::SimulationReport;
use crate::solar::ProsCons;

/// Formats an amount as whole rupiah with comma thousands separators.
///
/// ```
/// use solar_calc::reporting::format_currency;
///
/// assert_eq!(format_currency(61_600_000.0), "Rp 61,600,000");
/// assert_eq!(format_currency(43_341.2), "Rp 43,341");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("Rp {}", group_thousands(amount.round()))
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Prints the ledger table and totals.
pub fn print_load_summary(summary: &LoadSummary) {
    println!("{summary}");
    let shares = summary.distribution();
    if !shares.is_empty() {
        println!("\n--- Energy Distribution ---");
        for s in &shares {
            println!("{:<22} {:>5.1}%", s.name, s.share_pct);
        }
    }
}

/// Prints the simulation report followed by the topology pros and cons.
pub fn print_simulation_report(report: &SimulationReport) {
    println!("\n{report}");
    print_pros_cons(&report.pros_cons);
}

fn print_pros_cons(pc: &ProsCons) {
    println!("\n--- Kelebihan (Pros) ---");
    for p in pc.pros {
        println!("+ {}: {}", p.headline, p.detail);
    }
    println!("\n--- Kekurangan (Cons) ---");
    for c in pc.cons {
        println!("- {}: {}", c.headline, c.detail);
    }
}
