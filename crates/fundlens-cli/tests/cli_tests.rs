//! End-to-end tests for the `fundlens` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// FIXTURES
// =============================================================================

const PRICES: &str = "\
Date,AAA,BBB,CCC,FLAT
2025-03-03,10.00,50.00,5.00,10
2025-03-04,10.20,49.00,,10
2025-03-05,10.10,49.50,5.10,10
2025-03-06,10.50,48.00,0,10
2025-03-07,10.60,48.50,5.20,10
";

const HOLDINGS: &str = "\
as_of_date,ticker,shares_held,weight,sector
2025-03-03,AAA,100,,Technology
2025-03-03,BBB,40,,Energy
2025-03-06,AAA,120,,Technology
2025-03-06,BBB,40,,Energy
2025-03-06,CCC,200,,Energy
2025-03-06,DDD,,,
";

const FUND: &str = "\
date,nav
2025-03-03,20.00
2025-03-04,20.10
2025-03-05,20.05
2025-03-06,20.30
2025-03-07,20.40
";

const BENCHMARKS: &str = "\
Date,SPX
2025-02-28,6000
2025-03-03,5940
2025-03-04,5900
2025-03-05,5950
2025-03-06,5980
2025-03-07,6030
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("prices.csv"), PRICES).unwrap();
        fs::write(data.join("holdings.csv"), HOLDINGS).unwrap();
        fs::write(data.join("fund.csv"), FUND).unwrap();
        fs::write(data.join("benchmarks.csv"), BENCHMARKS).unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[data]\nfund_name = \"Test Fund\"\n",
        )
        .unwrap();
        Self { dir }
    }

    fn config(&self) -> std::path::PathBuf {
        self.dir.path().join("config.toml")
    }

    fn data(&self) -> std::path::PathBuf {
        self.dir.path().join("data")
    }

    /// Command with the fixture's config and data directory.
    fn cmd(&self) -> Command {
        let mut cmd = base_cmd(&self.config());
        cmd.arg("--data-dir").arg(self.data());
        cmd
    }
}

fn base_cmd(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fundlens").unwrap();
    cmd.env_remove("FUNDLENS_DATA_DIR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config);
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("fundlens")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("overview"))
        .stdout(predicate::str::contains("contribution"))
        .stdout(predicate::str::contains("sectors"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_missing_data_dir() {
    let fx = Fixture::new();
    base_cmd(&fx.config())
        .arg("overview")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data directory given"));
}

#[test]
fn test_invalid_as_of() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["--as-of", "07/03/2025", "overview"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

// =============================================================================
// ANALYTICS COMMANDS
// =============================================================================

#[test]
fn test_overview() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("overview")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Fund"))
        .stdout(predicate::str::contains("20.4000"))
        .stdout(predicate::str::contains("Sharpe ratio"));
}

#[test]
fn test_overview_as_of_past_date() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["--as-of", "2025-03-05", "overview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20.0500"))
        .stdout(predicate::str::contains("2025-03-05"));
}

#[test]
fn test_returns_json() {
    let fx = Fixture::new();
    let v = json_output(fx.cmd().args(["returns", "--format", "json"]));

    let values = v["returns"]["values"].as_array().unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["period"], "1D");
    let one_day = values[0]["value"].as_f64().unwrap();
    assert!((one_day - (20.40 / 20.30 - 1.0)).abs() < 1e-12);

    let unavailable = v["returns"]["unavailable"].as_array().unwrap();
    assert!(unavailable.iter().any(|p| p == "5D"));
    assert_eq!(v["annualized"]["basis"], "non_annualized");
}

#[test]
fn test_cumulative_for_ticker() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["cumulative", "--since", "2025-03-03", "--ticker", "AAA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AAA"))
        .stdout(predicate::str::contains("6.00"));
}

#[test]
fn test_cumulative_unknown_ticker_warns() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["cumulative", "--since", "ytd", "--ticker", "ZZZ", "--ticker", "BBB"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ZZZ"))
        .stdout(predicate::str::contains("BBB"));
}

#[test]
fn test_risk_flat_series_sharpe_undefined() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["risk", "--ticker", "FLAT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FLAT"))
        .stdout(predicate::str::contains("n/a"));
}

#[test]
fn test_risk_json_marks_undefined_sharpe() {
    let fx = Fixture::new();
    let v = json_output(fx.cmd().args(["risk", "--ticker", "FLAT", "-f", "json"]));
    let flat = &v["metrics"][0];
    assert_eq!(flat["ticker"], "FLAT");
    assert_eq!(flat["metrics"]["sharpe_ratio"]["status"], "undefined");
}

#[test]
fn test_contribution_table() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("contribution")
        .assert()
        .success()
        .stdout(predicate::str::contains("AAA"))
        .stdout(predicate::str::contains("12.00"))
        .stdout(predicate::str::contains("shares based"))
        .stderr(predicate::str::contains("No shares or weight, left out: DDD"));
}

#[test]
fn test_contribution_csv() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["contribution", "--format", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ticker,sector,start_price,end_price,change,impact,contribution"
    );
    assert_eq!(lines.count(), 3);
}

#[test]
fn test_contribution_json_window() {
    let fx = Fixture::new();
    let v = json_output(fx.cmd().args(["contribution", "--window", "since:2025-03-03", "-f", "json"]));

    assert_eq!(v["report"]["label"], "since 2025-03-03");
    assert_eq!(v["report"]["unresolvable"][0], "DDD");
    assert_eq!(v["summary"]["holding_count"], 3);
}

#[test]
fn test_sectors() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("sectors")
        .assert()
        .success()
        .stdout(predicate::str::contains("Energy"))
        .stdout(predicate::str::contains("Technology"))
        .stdout(predicate::str::contains("Value share"))
        .stdout(predicate::str::contains("No holding carries a weight"));
}

#[test]
fn test_sectors_shares_only_allocation_json() {
    let fx = Fixture::new();
    let v = json_output(fx.cmd().args(["sectors", "-f", "json"]));
    let allocation = &v["allocation"];

    assert!(allocation["weight"]["sectors"].as_array().unwrap().is_empty());

    // AAA 120*10.60 = 1272, BBB 40*48.50 + CCC 200*5.20 = 2980
    let by_value = &allocation["market_value"];
    assert_eq!(by_value["basis"], "market_value");
    assert_eq!(by_value["sectors"][0]["sector"], "Energy");
    let energy = by_value["sectors"][0]["weight"].as_f64().unwrap();
    assert!((energy - 2980.0 / 4252.0).abs() < 1e-9);
    assert_eq!(by_value["excluded"][0], "DDD");

    let by_count = &allocation["count"];
    assert_eq!(by_count["sectors"][0]["sector"], "Energy");
    assert_eq!(by_count["sectors"][0]["holding_count"], 2);
    assert!(by_count["excluded"].as_array().unwrap().is_empty());
}

#[test]
fn test_compare_table() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("compare")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Fund (fund)"))
        .stdout(predicate::str::contains("SPX"))
        // SPX week to date from the Feb 28 close: 6030 / 6000
        .stdout(predicate::str::contains("+0.50%"))
        // fund starts inside the week: 20.40 / 20.00
        .stdout(predicate::str::contains("+2.00%"))
        .stdout(predicate::str::contains("since start of 2024"));
}

#[test]
fn test_compare_json() {
    let fx = Fixture::new();
    let v = json_output(fx.cmd().args(["compare", "--since-year", "2025", "-f", "json"]));

    assert_eq!(v["since_year"], 2025);
    assert_eq!(v["fund"]["is_fund"], true);
    let fund_week = v["fund"]["week"].as_f64().unwrap();
    assert!((fund_week - 0.02).abs() < 1e-12);

    let spx = &v["benchmarks"][0];
    assert_eq!(spx["name"], "SPX");
    let day = spx["day"].as_f64().unwrap();
    assert!((day - (6030.0 / 5980.0 - 1.0)).abs() < 1e-12);
    let since = spx["since_year"].as_f64().unwrap();
    assert!((since - 0.005).abs() < 1e-12);
}

#[test]
fn test_compare_as_of_mid_week() {
    let fx = Fixture::new();
    let v = json_output(fx.cmd().args(["--as-of", "2025-03-05", "compare", "-f", "json"]));

    let week = v["benchmarks"][0]["week"].as_f64().unwrap();
    assert!((week - (5950.0 / 6000.0 - 1.0)).abs() < 1e-12);
    // the fund has no NAV before 2024 ends
    let missing = v["fund"]["unavailable"].as_array().unwrap();
    assert!(missing.iter().any(|m| m == "since_year"));
}

#[test]
fn test_compare_without_benchmarks() {
    let fx = Fixture::new();
    fs::remove_file(fx.data().join("benchmarks.csv")).unwrap();
    fx.cmd()
        .arg("compare")
        .assert()
        .success()
        .stdout(predicate::str::contains("No benchmarks loaded"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_path() {
    let fx = Fixture::new();
    base_cmd(&fx.config())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_json() {
    let fx = Fixture::new();
    let v = json_output(base_cmd(&fx.config()).args(["config", "show", "--format", "json"]));

    assert_eq!(v["analytics"]["trading_days_per_year"], 252);
    assert_eq!(v["data"]["fund_name"], "Test Fund");
}

#[test]
fn test_invalid_config_file() {
    let fx = Fixture::new();
    fs::write(fx.config(), "[analytics]\nvar_confidence = 2.0\n").unwrap();
    fx.cmd()
        .arg("overview")
        .assert()
        .failure()
        .stderr(predicate::str::contains("var_confidence"));
}
