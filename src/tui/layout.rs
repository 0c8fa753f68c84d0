//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Cell, Chart, Dataset, Paragraph, Row, Table, Wrap};

use super::runtime::{App, Field, Form};
use super::style;
use crate::reporting::format_currency;

/// Width of the distribution bars in characters.
const BAR_WIDTH: usize = 20;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(20),   // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(42), Constraint::Min(40)])
        .split(chunks[1]);
    render_form(frame, app, body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),     // ledger
            Constraint::Length(10), // metrics + distribution
            Constraint::Min(10),    // cashflow
            Constraint::Length(9),  // pros/cons
        ])
        .split(body[1]);
    render_ledger(frame, app, right[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(right[1]);
    render_metrics(frame, app, middle[0]);
    render_distribution(frame, app, middle[1]);

    render_cashflow(frame, app, right[2]);
    render_pros_cons(frame, app, right[3]);
    render_footer(frame, app, chunks[2]);
}

/// Header bar: title and the topology tagline.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " SOLAR-CALC ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            app.form.mode.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" │ {}", app.form.mode.tagline())),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn field_value(form: &Form, field: Field) -> String {
    match field {
        Field::Device => form.device().label().to_string(),
        Field::Power => format!("{:.0} W", form.power_watts),
        Field::Hours => format!("{:.1} h", form.hours_per_day),
        Field::Quantity => form.quantity.to_string(),
        Field::Tariff => format!("{:.2}", form.tariff),
        Field::Region => form.region.label().to_string(),
        Field::GridVa => form.grid.to_string(),
        Field::Phase => form.phase.to_string(),
        Field::Mode => form.mode.to_string(),
        Field::PanelWattPeak => format!("{} Wp", form.panel_watt_peak),
        Field::PanelCount => form.panel_count.to_string(),
        Field::BatteryType => form.battery_type.to_string(),
        Field::BatteryKwh => format!(
            "{:.1} (saran {:.1})",
            form.battery_kwh,
            form.suggested_battery_kwh()
        ),
        Field::Tilt => format!("{:.0}°", form.tilt_deg),
        Field::Shading => format!("{:.0}%", form.shading_loss_pct),
        Field::Efficiency => format!("{:.0}%", form.efficiency_pct),
    }
}

/// Form rows with the highlighted control marked.
fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.selected_field();
    let lines: Vec<Line> = Field::ALL
        .iter()
        .map(|&field| {
            let value = field_value(&app.form, field);
            let text = format!(
                "{} {:<15} {}",
                if field == selected { "▶" } else { " " },
                field.label(),
                value
            );
            let style = if !field.is_enabled(app.form.mode) {
                Style::default().fg(style::DISABLED_FG)
            } else if field == selected {
                Style::default()
                    .fg(style::SELECTED_FG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let block = Block::default().title(" Input ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Ledger rows with daily and monthly totals in the title.
fn render_ledger(frame: &mut Frame, app: &App, area: Rect) {
    let summary = &app.summary;
    let header = Row::new(["Perangkat", "Watt", "Jam", "Qty", "kWh/hari"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = summary
        .per_entry
        .iter()
        .map(|e| {
            Row::new([
                Cell::from(e.name.clone()),
                Cell::from(format!("{:.0}", e.power_watts)),
                Cell::from(format!("{:.1}", e.hours_per_day)),
                Cell::from(e.quantity.to_string()),
                Cell::from(format!("{:.2}", e.kwh_per_day)),
            ])
        })
        .collect();

    let title = format!(
        " Beban: {:.2} kWh/hari │ {:.1} kWh/bulan │ {} ",
        summary.total_kwh_per_day,
        summary.total_kwh_per_month,
        format_currency(summary.total_cost_per_month)
    );
    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Headline sizing and payback figures.
fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match &app.report {
        Some(r) => {
            let battery = match r.backup_hours {
                Some(h) if r.battery_kwh > 0.0 => format!("{:.1} kWh ({h:.1} jam)", r.battery_kwh),
                _ => "-".to_string(),
            };
            let roi = r
                .payback
                .map_or_else(|| "n/a".to_string(), |p| format!("{:.1} tahun", p.years));
            vec![
                Line::from(format!("Kapasitas:  {:.2} kWp", r.system_kwp)),
                Line::from(format!(
                    "Produksi:   {:.1} kWh/bulan ({:.0}%)",
                    r.production.monthly_kwh,
                    r.solar_fraction_pct()
                )),
                Line::from(format!("Baterai:    {battery}")),
                Line::from(format!("Investasi:  {}", format_currency(r.capex))),
                Line::from(format!(
                    "Hemat:      {}/bulan",
                    format_currency(r.monthly_savings)
                )),
                Line::from(format!("ROI:        {roi}")),
            ]
        }
        None => vec![Line::from("Tambahkan perangkat untuk menghitung sistem.")],
    };
    let block = Block::default().title(" Hasil ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Share of daily energy per ledger entry as text bars.
fn render_distribution(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .summary
        .distribution()
        .iter()
        .map(|s| {
            let filled = ((s.share_pct / 100.0) * BAR_WIDTH as f64).round() as usize;
            Line::from(format!(
                "{:<14.14} {:<width$} {:>5.1}%",
                s.name,
                "█".repeat(filled.min(BAR_WIDTH)),
                s.share_pct,
                width = BAR_WIDTH
            ))
        })
        .collect();
    let block = Block::default().title(" Distribusi ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Cumulative savings against the flat investment line.
fn render_cashflow(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Proyeksi Arus Kas ")
        .borders(Borders::ALL);
    let Some(report) = &app.report else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let savings: Vec<(f64, f64)> = report
        .cashflow
        .iter()
        .map(|p| (f64::from(p.year), p.cumulative_savings))
        .collect();
    let investment: Vec<(f64, f64)> = report
        .cashflow
        .iter()
        .map(|p| (f64::from(p.year), p.investment))
        .collect();

    let y_bounds = style::cashflow_bounds_y(&savings, &investment);
    let x_hi = savings.last().map_or(1.0, |p| p.0).max(2.0);

    let datasets = vec![
        Dataset::default()
            .name("Penghematan")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::SAVINGS_COLOR))
            .data(&savings),
        Dataset::default()
            .name("Investasi")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(style::INVESTMENT_COLOR))
            .data(&investment),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("tahun")
                .bounds([1.0, x_hi])
                .labels(vec!["1".to_string(), format!("{}", x_hi as u32)]),
        )
        .y_axis(
            Axis::default()
                .title("Rp")
                .bounds(y_bounds)
                .labels(vec!["0".to_string(), style::short_currency(y_bounds[1])]),
        );
    frame.render_widget(chart, area);
}

fn render_pros_cons(frame: &mut Frame, app: &App, area: Rect) {
    let pc = crate::solar::select_pros_cons(app.form.mode);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let pros: Vec<Line> = pc
        .pros
        .iter()
        .map(|p| Line::from(format!("+ {}: {}", p.headline, p.detail)))
        .collect();
    let cons: Vec<Line> = pc
        .cons
        .iter()
        .map(|c| Line::from(format!("- {}: {}", c.headline, c.detail)))
        .collect();

    frame.render_widget(
        Paragraph::new(pros)
            .style(Style::default().fg(style::PROS_FG))
            .wrap(Wrap { trim: true })
            .block(Block::default().title(" Kelebihan ").borders(Borders::ALL)),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(cons)
            .style(Style::default().fg(style::CONS_FG))
            .wrap(Wrap { trim: true })
            .block(Block::default().title(" Kekurangan ").borders(Borders::ALL)),
        halves[1],
    );
}

/// Footer with keybinding hints, or the last error.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = match &app.status {
        Some(msg) => Span::styled(format!(" {msg}"), Style::default().fg(style::ERROR_FG)),
        None => Span::styled(
            " q:Quit  ↑/↓:Field  ←/→:Adjust  Enter/a:Add device  x:Reset ledger",
            Style::default().fg(style::FOOTER_FG),
        ),
    };
    frame.render_widget(Paragraph::new(Line::from(footer)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::config::ScenarioConfig;

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 50)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn renders_demo_panels() {
        let app = App::new(ScenarioConfig::demo().build().unwrap());
        let text = screen_text(&app);
        assert!(text.contains("SOLAR-CALC"));
        assert!(text.contains("Kulkas (120W)"));
        assert!(text.contains("Kapasitas:  4.40 kWp"));
    }

    #[test]
    fn renders_placeholder_without_load() {
        let app = App::new(ScenarioConfig::default().build().unwrap());
        let text = screen_text(&app);
        assert!(text.contains("Tambahkan perangkat"));
    }
}
