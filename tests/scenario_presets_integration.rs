use std::process::Command;

#[derive(Debug)]
struct Headline {
    monthly_production_kwh: f64,
    capex: f64,
}

#[test]
fn scenario_files_run_via_cli_and_produce_distinct_systems() {
    let demo = run_and_parse_headline(&["--scenario", "scenarios/demo.toml"]);
    let hybrid = run_and_parse_headline(&["--scenario", "scenarios/hybrid_home.toml"]);
    let cabin = run_and_parse_headline(&["--scenario", "scenarios/off_grid_cabin.toml"]);

    assert_eq!(demo.capex, 61_600_000.0);
    // 5.5 kWp at the bulk rate plus 5.5 kWh lithium
    assert_eq!(hybrid.capex, 101_750_000.0);
    // 2.7 kWp plus 5.4 kWh lead-acid
    assert_eq!(cabin.capex, 51_300_000.0);

    assert!(
        (demo.monthly_production_kwh - 380.6).abs() < 0.05,
        "unexpected demo production: {:.3}",
        demo.monthly_production_kwh
    );
    assert!(
        hybrid.monthly_production_kwh > cabin.monthly_production_kwh,
        "expected hybrid to out-produce the cabin: hybrid={:.1}, cabin={:.1}",
        hybrid.monthly_production_kwh,
        cabin.monthly_production_kwh
    );
}

#[test]
fn preset_flag_matches_scenario_file() {
    let from_file = run_and_parse_headline(&["--scenario", "scenarios/hybrid_home.toml"]);
    let from_preset = run_and_parse_headline(&["--preset", "hybrid_home"]);
    assert_eq!(from_file.capex, from_preset.capex);
    assert_eq!(
        from_file.monthly_production_kwh,
        from_preset.monthly_production_kwh
    );
}

#[test]
fn tariff_override_changes_the_bill() {
    let stdout = run_ok(&["--preset", "demo", "--tariff", "2000"]);
    let base = run_ok(&["--preset", "demo"]);
    let cost = |out: &str| parse_currency(out, "Monthly cost:");
    assert!(cost(&stdout) > cost(&base));
}

#[test]
fn invalid_input_exits_with_code_1() {
    let cases: [&[&str]; 4] = [
        &["--preset", "nope"],
        &["--scenario", "scenarios/missing.toml"],
        &["--tariff", "-10"],
        &["--scenario", "scenarios/demo.toml", "--preset", "demo"],
    ];
    for args in cases {
        let output = Command::new(env!("CARGO_BIN_EXE_solar-calc"))
            .args(args)
            .output()
            .expect("solar-calc process should run");
        assert_eq!(output.status.code(), Some(1), "args {args:?} should fail");
        assert!(!output.stderr.is_empty());
    }
}

#[test]
fn csv_exports_are_written() {
    let dir = std::env::temp_dir().join(format!("solar-calc-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let ledger = dir.join("ledger.csv");
    let cashflow = dir.join("cashflow.csv");

    run_ok(&[
        "--preset",
        "demo",
        "--ledger-out",
        ledger.to_str().expect("utf-8 path"),
        "--cashflow-out",
        cashflow.to_str().expect("utf-8 path"),
    ]);

    let ledger_csv = std::fs::read_to_string(&ledger).expect("ledger written");
    assert!(ledger_csv.starts_with("device,power_w,hours_per_day,quantity,wh_per_day,kwh_per_day"));
    assert_eq!(ledger_csv.lines().count(), 9);

    let cashflow_csv = std::fs::read_to_string(&cashflow).expect("cashflow written");
    assert!(cashflow_csv.starts_with("year,cumulative_savings,investment"));
    assert_eq!(cashflow_csv.lines().count(), 26);

    let _ = std::fs::remove_dir_all(&dir);
}

fn run_ok(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_solar-calc"))
        .args(args)
        .output()
        .expect("solar-calc process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

fn run_and_parse_headline(args: &[&str]) -> Headline {
    let stdout = run_ok(args);
    Headline {
        monthly_production_kwh: parse_metric(&stdout, "Monthly production:", "kWh"),
        capex: parse_currency(&stdout, "CAPEX:"),
    }
}

fn metric_value<'a>(stdout: &'a str, label: &str) -> &'a str {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    line.split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"))
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let raw = metric_value(stdout, label);
    let value = raw
        .strip_suffix(unit)
        .map(str::trim)
        .unwrap_or_else(|| panic!("missing unit `{unit}` in `{raw}`"));

    value
        .parse::<f64>()
        .unwrap_or_else(|err| panic!("failed to parse `{value}` as f64: {err}"))
}

fn parse_currency(stdout: &str, label: &str) -> f64 {
    let raw = metric_value(stdout, label);
    let digits: String = raw
        .strip_prefix("Rp ")
        .unwrap_or_else(|| panic!("missing currency prefix in `{raw}`"))
        .chars()
        .filter(|c| *c != ',')
        .collect();
    digits
        .parse::<f64>()
        .unwrap_or_else(|err| panic!("failed to parse `{digits}` as f64: {err}"))
}
