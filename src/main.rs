use std::io::Read;
use std::path::Path;

use clap::Parser;

use mealplan_reconciler::cli::{Cli, Command, CommonArgs};
use mealplan_reconciler::config::{EngineConfig, load_config};
use mealplan_reconciler::error::{PlanError, Result};
use mealplan_reconciler::interface::write_csv_file;
use mealplan_reconciler::logging::init_logger;
use mealplan_reconciler::models::{AnomalyReport, DayOptions};
use mealplan_reconciler::pipeline::process_single_day;
use mealplan_reconciler::week::process_week;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.log_json);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Day { common, day } => cmd_day(&common, day),
        Command::Week { common } => cmd_week(&common),
    }
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn engine_config(common: &CommonArgs) -> Result<EngineConfig> {
    let config = match &common.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if !config.is_valid() {
        return Err(PlanError::InvalidInput(format!(
            "engine configuration is inconsistent:\n{}",
            config.display()
        )));
    }
    tracing::debug!(config = %config.display(), "engine configuration");
    Ok(config)
}

fn validate(common: &CommonArgs) -> Result<()> {
    if common.calories < 0.0 || common.min_qty < 0.0 {
        return Err(PlanError::InvalidInput(
            "calories and --min-qty must be non-negative".to_string(),
        ));
    }
    Ok(())
}

fn report_anomalies(anomalies: &[&AnomalyReport]) -> Result<()> {
    if !anomalies.is_empty() {
        eprintln!("{}", serde_json::to_string_pretty(anomalies)?);
    }
    Ok(())
}

/// Reconcile a single day.
fn cmd_day(common: &CommonArgs, day: Option<u32>) -> Result<()> {
    validate(common)?;
    let config = engine_config(common)?;
    let text = read_input(common.input.as_deref())?;
    let options = DayOptions {
        expected_day: day,
        min_quantity: common.min_qty,
    };

    let outcome = process_single_day(&text, &common.targets(), &options, &config);
    println!("{}", outcome.text);

    if let (Some(path), Some(plan)) = (&common.csv, &outcome.plan) {
        write_csv_file(path, std::slice::from_ref(plan))?;
    }

    if let Some(anomaly) = &outcome.anomaly {
        eprintln!("{}", serde_json::to_string_pretty(anomaly)?);
    }
    Ok(())
}

/// Reconcile every day of a multi-day plan.
fn cmd_week(common: &CommonArgs) -> Result<()> {
    validate(common)?;
    let config = engine_config(common)?;
    let text = read_input(common.input.as_deref())?;
    let options = DayOptions {
        expected_day: None,
        min_quantity: common.min_qty,
    };

    let outcomes = process_week(&text, &common.targets(), &options, &config);
    if outcomes.is_empty() {
        return Err(PlanError::InvalidInput("no day text found".to_string()));
    }

    let days: Vec<&str> = outcomes.iter().map(|o| o.text.as_str()).collect();
    println!("{}", days.join("\n\n"));

    if let Some(path) = &common.csv {
        let plans: Vec<_> = outcomes.iter().filter_map(|o| o.plan.clone()).collect();
        write_csv_file(path, &plans)?;
    }

    let anomalies: Vec<&AnomalyReport> = outcomes.iter().filter_map(|o| o.anomaly.as_ref()).collect();
    report_anomalies(&anomalies)
}
