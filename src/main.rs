//! solar-calc entry point: CLI wiring, scenario loading, and report output.

mod cli;

use std::process;

use tracing_subscriber::EnvFilter;

use cli::{CliOptions, Command};
use solar_calc::config::{Scenario, ScenarioConfig};
use solar_calc::io::export::{export_cashflow_csv, export_ledger_csv};
use solar_calc::reporting::{print_load_summary, print_simulation_report};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the scenario named on the command line and applies overrides.
fn load_scenario(cli: &CliOptions) -> Result<Scenario, Vec<String>> {
    let config = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else {
        ScenarioConfig::from_preset(cli.preset.as_deref().unwrap_or("demo"))
    };
    let mut config = config.map_err(|e| vec![e.to_string()])?;

    if let Some(rate) = cli.tariff {
        config.tariff.rate_per_kwh = rate;
    }

    config
        .build()
        .map_err(|errors| errors.iter().map(ToString::to_string).collect())
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(Command::Help) => {
            cli::print_usage();
            return;
        }
        Ok(Command::Run(opts)) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    #[cfg(feature = "tui")]
    let tui = cli.tui;
    #[cfg(not(feature = "tui"))]
    let tui = false;

    if !tui {
        init_tracing();
    }

    let scenario = match load_scenario(&cli) {
        Ok(s) => s,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    #[cfg(feature = "tui")]
    if tui {
        if let Err(e) = solar_calc::tui::run(scenario) {
            fail(format_args!("TUI crashed: {e}"));
        }
        return;
    }

    let summary = scenario.summary();
    print_load_summary(&summary);

    let report = scenario.report();
    match report {
        Some(ref r) => print_simulation_report(r),
        None => println!("\nAdd at least one device to size a solar system."),
    }

    if let Some(ref path) = cli.ledger_out {
        if let Err(e) = export_ledger_csv(&summary, path) {
            fail(format_args!("failed to write ledger CSV: {e}"));
        }
        eprintln!("Ledger written to {}", path.display());
    }

    if let Some(ref path) = cli.cashflow_out {
        let points = report.as_ref().map(|r| r.cashflow.as_slice()).unwrap_or(&[]);
        if let Err(e) = export_cashflow_csv(points, path) {
            fail(format_args!("failed to write cashflow CSV: {e}"));
        }
        eprintln!("Cashflow written to {}", path.display());
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_calc::api::AppState::new(scenario));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(format_args!("failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(solar_calc::api::serve(state, addr)) {
            fail(format_args!("API server failed: {e}"));
        }
    }
}
