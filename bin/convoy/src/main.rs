//! convoy is a CLI tool that deploys the contract suite in order onto a
//! target environment.

mod cli;
mod config;
mod plan;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use convoy_migrate::{DeploymentRegistry, Environment, LocalChain};

use cli::Cli;
use config::EnvironmentFile;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    // If requested, write a default environment file and exit.
    if let Some(path) = &cli.write_env {
        EnvironmentFile::default().save_to_file(Path::new(path))?;
        return Ok(());
    }

    let env_file = if let Some(config_path) = &cli.config {
        EnvironmentFile::load_from_file(Path::new(config_path))?
    } else {
        EnvironmentFile::default()
    };

    // An explicit --network overrides the environment file's label.
    let network = match &cli.network {
        Some(network) => network.to_string(),
        None => env_file.network.clone(),
    };

    let chain = Arc::new(LocalChain::new());
    let env = Environment::new(network, env_file.accounts, chain.clone(), chain.clone());

    let runner = plan::standard_plan(cli.skip_wiring);
    tracing::info!(
        network = %env.network,
        steps = runner.steps().len(),
        accounts = env.accounts.len(),
        "Starting migration run..."
    );

    match runner.run(&env).await {
        Ok(registry) => {
            tracing::info!("✓ Migration complete!");
            print_registry(&registry);
            Ok(())
        }
        Err(failure) => {
            tracing::error!(step = failure.step, "Migration halted; partial progress below");
            print_registry(&failure.registry);
            Err(failure).context("Migration run halted")
        }
    }
}

/// Print the unit/identifier table for a (possibly partial) registry.
fn print_registry(registry: &DeploymentRegistry) {
    if registry.is_empty() {
        return;
    }

    let mut table = comfy_table::Table::new();
    table.set_header(vec!["Unit", "Identifier"]);
    for (unit, identifier) in registry.iter() {
        table.add_row(vec![unit.clone(), identifier.to_string()]);
    }
    println!("{table}");
}
