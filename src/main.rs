use std::{env, fs, process::ExitCode};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use profilenorm::{AppConfig, BatchInput, load_config_from_file, run_batch};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: profilenorm <input.json> [config.yaml]";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "profilenorm=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "profilenorm_failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let Some(input_path) = args.next() else {
        bail!(USAGE);
    };
    let config = match args.next() {
        Some(path) => load_config_from_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => AppConfig::default(),
    };
    if args.next().is_some() {
        bail!(USAGE);
    }

    let raw = fs::read_to_string(&input_path)
        .with_context(|| format!("reading input from {input_path}"))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing JSON in {input_path}"))?;

    let input = BatchInput::from_value(value)?;
    let report = run_batch(input, &config.batch, &config.normalize, Utc::now())?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
