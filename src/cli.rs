use std::path::PathBuf;

/// Default port for `--serve`.
#[cfg(feature = "api")]
pub const DEFAULT_PORT: u16 = 3000;

/// Parsed command-line options.
#[derive(Debug)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub tariff: Option<f64>,
    pub ledger_out: Option<PathBuf>,
    pub cashflow_out: Option<PathBuf>,
    #[cfg(feature = "tui")]
    pub tui: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: u16,
}

/// What the binary should do.
#[derive(Debug)]
pub enum Command {
    Help,
    Run(CliOptions),
}

pub fn parse_args() -> Result<Command, String> {
    parse_args_from(std::env::args().skip(1).collect())
}

pub fn parse_args_from(args: Vec<String>) -> Result<Command, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut preset = None;
    let mut tariff = None;
    let mut ledger_out = None;
    let mut cashflow_out = None;
    #[cfg(feature = "tui")]
    let mut tui = false;
    #[cfg(feature = "api")]
    let mut serve = false;
    #[cfg(feature = "api")]
    let mut port = DEFAULT_PORT;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--tariff" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --tariff (expected a rate per kWh)")?;
                let rate = raw
                    .parse::<f64>()
                    .map_err(|_| format!("--tariff value \"{raw}\" is not a number"))?;
                tariff = Some(rate);
            }
            "--ledger-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --ledger-out (expected a file path)")?;
                ledger_out = Some(PathBuf::from(path));
            }
            "--cashflow-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --cashflow-out (expected a file path)")?;
                cashflow_out = Some(PathBuf::from(path));
            }
            #[cfg(feature = "tui")]
            "--tui" => tui = true,
            #[cfg(feature = "api")]
            "--serve" => serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if scenario.is_some() && preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if scenario.is_none() && preset.is_none() {
        preset = Some("demo".to_string());
    }

    Ok(Command::Run(CliOptions {
        scenario,
        preset,
        tariff,
        ledger_out,
        cashflow_out,
        #[cfg(feature = "tui")]
        tui,
        #[cfg(feature = "api")]
        serve,
        #[cfg(feature = "api")]
        port,
    }))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("solar-calc: household load ledger and rooftop solar calculator");
    eprintln!();
    eprintln!("Usage: solar-calc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (demo, hybrid_home, off_grid_cabin)");
    eprintln!("  --tariff <rate>          Override the price per kWh");
    eprintln!("  --ledger-out <path>      Export the ledger table to CSV");
    eprintln!("  --cashflow-out <path>    Export the cashflow projection to CSV");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Open the interactive calculator");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the report");
        eprintln!("  --port <u16>             API server port (default: {DEFAULT_PORT})");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the demo preset is used.");
}
