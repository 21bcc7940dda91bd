use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voxbridge::Config;
use voxbridge::api::{ApiServer, ApiState};

/// Voxbridge - multimodal chat relay between mobile clients and Google AI services
#[derive(Parser)]
#[command(name = "voxbridge", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3001")]
    port: u16,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,voxbridge=info",
        1 => "info,voxbridge=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Missing credentials are a startup failure, never a per-request one
    let config = Config::from_env()?;
    tracing::info!(model = %config.gemini_model, port = cli.port, "starting relay");

    let state = ApiState::from_config(&config)?;
    ApiServer::new(state, cli.port).run().await?;

    Ok(())
}
