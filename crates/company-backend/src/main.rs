//! # wire-backend
//!
//! Starts the local module hosts, deploys the company backend, and wires it.
//!
//! ```bash
//! RUST_LOG=info wire-backend                            # deploy, wire, report
//! wire-backend --grant-role --runs 2                    # grant through the board, run twice
//! wire-backend --skip-deploy Treasury --json            # rehearse a missing module
//! wire-backend --config wiring.yaml                     # settings from YAML
//! ```
//!
//! Exits with status 1 when the last run did not complete its wiring.

use anyhow::Context;
use clap::Parser;
use company_backend::lifecycle::CompanySystem;
use module_host::tracing::setup_tracing;
use module_wiring::{Address, ModuleName, Orchestrator, WiringConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "wire-backend",
    about = "Deploy the company backend locally and wire module addresses"
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, env = "WIRING_CONFIG")]
    config: Option<PathBuf>,

    /// Leave a module undeployed (repeatable)
    #[arg(long = "skip-deploy", value_name = "MODULE")]
    skip_deploy: Vec<ModuleName>,

    /// Grant the bootstrap role before wiring: proposed by the deployer, approved by a
    /// separate board member
    #[arg(long)]
    grant_role: bool,

    /// Bootstrap holder (defaults to the local finance director account)
    #[arg(long)]
    holder: Option<Address>,

    /// Number of wiring runs
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,

    /// Print the deployment and every report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    setup_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => WiringConfig::load(path)?,
        None => WiringConfig::default(),
    }
    .with_env()?;

    let system = CompanySystem::start();
    let deployment = system
        .deploy(&cli.skip_deploy)
        .await
        .context("deployment failed")?;

    let operator = config.operator.unwrap_or(system.accounts.deployer);
    let holder = cli
        .holder
        .or(config.bootstrap.holder)
        .unwrap_or(system.accounts.finance_director);
    config.operator = Some(operator);
    config.bootstrap.holder = Some(holder);

    if cli.grant_role {
        match deployment.deployed.get(&config.bootstrap.role_module) {
            Some(role_management) => system
                .grant_role_with_independent_approver(
                    *role_management,
                    &config.bootstrap.role,
                    holder,
                )
                .await
                .context("granting the bootstrap role")?,
            None => warn!(
                module = %config.bootstrap.role_module,
                "Role module not deployed, cannot grant"
            ),
        }
    }

    let orchestrator = Orchestrator::from_config(Arc::new(system.resolver()), &config)?;
    let mut reports = Vec::new();
    for run in 1..=cli.runs {
        info!(run, "Starting wiring run");
        let report = orchestrator.run(operator).await;
        if !cli.json {
            println!("Run {}/{}", run, cli.runs);
            print!("{}", report.summary());
        }
        reports.push(report);
    }
    drop(orchestrator);

    if cli.json {
        let output = serde_json::json!({
            "accounts": system.accounts,
            "deployment": deployment,
            "runs": reports,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    system.shutdown().await?;

    let succeeded = reports.last().is_some_and(|report| report.succeeded());
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
