use agrispray::{
    cmd::{CtlArgs, ctl, probe},
    context::AppContextBuilder,
    http_server,
};
use clap::{Args, Parser, Subcommand};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding `app.yaml`.
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serves the dashboard and the command API.
    Run(RunArgs),
    /// Runs the read commands once and prints what the gateway would serve.
    Probe,
    /// Drives a running gateway from the terminal.
    Ctl(CtlArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Overrides `server.listen_address`.
    #[arg(long)]
    listen_address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_server(cli.config_dir, args).await?,
        Commands::Probe => probe::execute(cli.config_dir).await?,
        Commands::Ctl(args) => ctl::execute(args).await?,
    }

    Ok(())
}

async fn run_server(
    config_dir: Option<String>,
    args: RunArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = AppContextBuilder::new(config_dir);
    if let Some(address) = args.listen_address {
        builder = builder.listen_address(address);
    }
    let context = builder.build()?;
    let shutdown_timeout = context.config.server.shutdown_timeout;

    let cancellation_token = CancellationToken::new();
    let mut server = tokio::spawn(http_server::run_server_from_config(
        context.config.clone(),
        context.gateway.clone(),
        context.metrics.clone(),
        cancellation_token.clone(),
    ));

    tokio::select! {
        result = &mut server => {
            // The server only returns on its own when it failed to start.
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    cancellation_token.cancel();
    match tokio::time::timeout(shutdown_timeout, server).await {
        Ok(result) => result??,
        Err(_) => tracing::warn!(
            timeout = ?shutdown_timeout,
            "Requests still in flight after shutdown timeout, exiting anyway."
        ),
    }
    tracing::info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to register SIGTERM handler.");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT (Ctrl+C) received, initiating graceful shutdown."),
        _ = terminate => tracing::info!("SIGTERM received, initiating graceful shutdown."),
    }
}
