//! `ruleflow`: validate a user registration and print a report.
//!
//! Exit codes: 0 when the registration is valid, 1 when it is not, 130 when
//! the run was cancelled (Ctrl-C or `--timeout`).

mod config;
mod registration;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ruleflow_core::{Cancelled, CancellationToken, Pipeline};
use tracing_subscriber::EnvFilter;

use crate::config::RuleSetConfig;
use crate::registration::{assemble, Registration};
use crate::report::{render, ReportFormat};

#[derive(Parser, Debug)]
#[command(name = "ruleflow", version, about = "Validate a user registration with a rule pipeline")]
struct Cli {
    /// Email to validate (overrides --input)
    #[arg(long)]
    email: Option<String>,

    /// Password to validate (overrides --input)
    #[arg(long)]
    password: Option<String>,

    /// Registration record to validate (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Rule set to apply (YAML or JSON); defaults to the built-in registration rules
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Cancel validation after this long (e.g. "500ms", "2s")
    #[arg(long, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Log rule dispatch at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registration(cli: &Cli) -> anyhow::Result<Registration> {
    let mut registration = match &cli.input {
        Some(path) => Registration::from_file(path)
            .with_context(|| format!("Failed to load registration from {}", path.display()))?,
        None => Registration::default(),
    };

    if let Some(email) = &cli.email {
        registration.email = Some(email.clone());
    }
    if let Some(password) = &cli.password {
        registration.password = Some(password.clone());
    }

    Ok(registration)
}

fn load_rules(cli: &Cli) -> anyhow::Result<RuleSetConfig> {
    match &cli.rules {
        Some(path) => RuleSetConfig::from_file(path)
            .with_context(|| format!("Failed to load rule set from {}", path.display())),
        None => Ok(RuleSetConfig::default()),
    }
}

/// Cancel `cancel` on Ctrl-C, and after `timeout` if one is given.
fn spawn_cancel_triggers(cancel: &CancellationToken, timeout: Option<Duration>) {
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, cancelling validation");
            token.cancel();
        }
    });

    if let Some(timeout) = timeout {
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            tracing::warn!(timeout = ?timeout, "Validation timed out, cancelling");
            token.cancel();
        });
    }
}

/// How a validation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Valid,
    Invalid,
    Cancelled,
}

impl Verdict {
    fn exit_code(self) -> u8 {
        match self {
            Verdict::Valid => 0,
            Verdict::Invalid => 1,
            Verdict::Cancelled => 130,
        }
    }
}

/// Run the pipeline and render the report. A cancelled run has no report.
async fn execute(
    pipeline: &Pipeline<Registration>,
    registration: &Registration,
    format: ReportFormat,
    cancel: &CancellationToken,
) -> anyhow::Result<(Verdict, Option<String>)> {
    match pipeline.run(registration, cancel).await {
        Ok(result) => {
            let report = render(&result, format).context("Failed to render report")?;
            let verdict = if result.is_success() {
                Verdict::Valid
            } else {
                Verdict::Invalid
            };
            Ok((verdict, Some(report)))
        }
        Err(Cancelled) => Ok((Verdict::Cancelled, None)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rules = load_rules(&cli)?;
    let pipeline = assemble(&rules).context("Failed to assemble validation pipeline")?;
    let registration = load_registration(&cli)?;
    tracing::debug!(rules = pipeline.len(), "Pipeline ready");

    let cancel = CancellationToken::new();
    spawn_cancel_triggers(&cancel, cli.timeout);

    let (verdict, report) = execute(&pipeline, &registration, cli.format, &cancel).await?;
    match report {
        Some(report) => print!("{}", report),
        None => eprintln!("Validation cancelled before completion"),
    }

    Ok(ExitCode::from(verdict.exit_code()))
}
