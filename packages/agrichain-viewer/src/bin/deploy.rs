//! Deploys `FoodTraceabilityLite` once and prints its address.

use agrichain_viewer::deploy::{deploy, Artifact};
use agrichain_viewer::rpc::NodeClient;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "agrichain-deploy", about = "Deploy FoodTraceabilityLite to an Ethereum dev node")]
struct Args {
    /// Compiled contract artifact (Hardhat JSON with a `bytecode` field).
    #[arg(long, default_value = "hardhat/artifacts/contracts/ft2.sol/FoodTraceabilityLite.json")]
    artifact: PathBuf,

    /// Node JSON-RPC endpoint; the first unlocked account pays for deployment.
    #[arg(long, env = "ETH_RPC_URL", default_value = "http://127.0.0.1:8545")]
    rpc_url: String,

    /// Receipt polling interval while waiting for the deployment to be mined.
    #[arg(long, default_value_t = 500)]
    poll_interval_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Deployment failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<(), agrichain_viewer::Error> {
    let artifact = Artifact::load(&args.artifact)?;
    let client = NodeClient::connect(
        &args.rpc_url,
        None,
        Some(Duration::from_millis(args.poll_interval_ms)),
    )?;
    info!(artifact = %args.artifact.display(), rpc = %args.rpc_url, "Deploying {}", artifact.name());

    let address = deploy(&client, artifact.bytecode.clone()).await?;

    println!("{} deployed to: {address}", artifact.name());
    Ok(())
}
