use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rowbench::report::ScenarioReport;
use rowbench::{Admin, BenchConfig, Cli, LocalStore, RemoteStore, Runner, StoreClient, TimingBatch};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.into_config()?;
    let admin = Admin::from_config(&config)?;

    if config.embedded {
        tracing::info!("running against an in-process store");
        run_scenarios(LocalStore::new(), admin, config).await
    } else {
        let client = RemoteStore::connect(config.host.clone()).await?;
        run_scenarios(client, admin, config).await
    }
}

async fn run_scenarios<C: StoreClient>(client: C, admin: Admin, config: BenchConfig) -> Result<()> {
    let scenarios = config.scenarios.clone();
    let rows = config.rows;
    let json = config.json;

    let mut timings = if json {
        TimingBatch::quiet()
    } else {
        TimingBatch::new()
    };
    let mut runner = Runner::new(client, admin, config);

    for scenario in scenarios {
        if !json {
            println!("\n{scenario}");
        }
        let outcome = runner.run(scenario, &mut timings).await?;
        let report = ScenarioReport::new(scenario, rows, timings.drain_batch(), outcome);
        if json {
            println!("{}", report.to_json()?);
        } else {
            print!("{}", report.summary());
        }
    }

    Ok(())
}
