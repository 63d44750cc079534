//! Plays one seeded battle unattended and prints the report as JSON.
use std::sync::Arc;

use anyhow::Result;
use raid_content::{ContentFactory, builtin_catalog, builtin_config};
use raid_runtime::{SimConfig, run_simulation};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let sim = SimConfig::from_env();

    let (catalog, config) = match &sim.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            (factory.load_catalog()?, factory.load_config()?)
        }
        None => (builtin_catalog()?, builtin_config()?),
    };

    let report = run_simulation(Arc::new(catalog), config, &sim)?;
    match &report.outcome {
        Some(outcome) => tracing::info!(
            result = %outcome.result,
            actions = report.actions,
            turns = report.turns,
            "battle finished"
        ),
        None => tracing::warn!(actions = report.actions, "battle hit the action cap"),
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
