use clap::Parser;
use shardsim::cli::Cli;
use shardsim::simulation::Simulation;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let _log_guard = shardsim_sink::logging::init(&cli.log_dir)?;

    info!(
        input = %cli.input.display(),
        shard_count = cli.shard_count,
        block_size = cli.block_size,
        "starting simulation"
    );

    let ingested = Simulation::new(cli).run().await?;

    info!(ingested, "simulation complete");
    Ok(())
}
