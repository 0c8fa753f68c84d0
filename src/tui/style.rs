//! Color constants and chart scaling helpers for the TUI.

use ratatui::style::Color;

/// Cumulative savings line color.
pub const SAVINGS_COLOR: Color = Color::Green;
/// Investment line color.
pub const INVESTMENT_COLOR: Color = Color::Red;
/// Highlighted form row.
pub const SELECTED_FG: Color = Color::Yellow;
/// Form rows that do not apply to the current topology.
pub const DISABLED_FG: Color = Color::DarkGray;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Footer error text color.
pub const ERROR_FG: Color = Color::Red;
/// Pros list color.
pub const PROS_FG: Color = Color::Green;
/// Cons list color.
pub const CONS_FG: Color = Color::Magenta;

/// Y-axis bounds for the cashflow chart: zero up to the largest value plus 10%.
pub fn cashflow_bounds_y(savings: &[(f64, f64)], investment: &[(f64, f64)]) -> [f64; 2] {
    let max = savings
        .iter()
        .chain(investment.iter())
        .map(|&(_, y)| y)
        .fold(0.0, f64::max);
    if max <= 0.0 || !max.is_finite() {
        return [0.0, 1.0];
    }
    [0.0, max * 1.1]
}

/// Compact currency for axis labels, e.g. `61.6 jt`.
pub fn short_currency(amount: f64) -> String {
    if amount.abs() >= 1e9 {
        format!("{:.1} M", amount / 1e9)
    } else if amount.abs() >= 1e6 {
        format!("{:.1} jt", amount / 1e6)
    } else {
        format!("{amount:.0}")
    }
}
