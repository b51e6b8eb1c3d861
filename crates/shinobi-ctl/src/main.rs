mod telemetry;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use shinobi_api::{MotionOutcome, ShinobiClient, ShinobiConfig};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "shinobi-ctl",
    about = "Query monitors and videos on a Shinobi server, or trigger motion events"
)]
struct Cli {
    /// Config file (JSON, or YAML for .yaml/.yml).
    #[arg(long, env = "SHINOBI_CONFIG", default_value = "shinobi.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the monitors of a group.
    Monitors { group: String },
    /// List the started monitors of a group.
    StartedMonitors { group: String },
    /// List the videos of a group.
    Videos { group: String },
    /// List the videos of one monitor.
    Video {
        group: String,
        id: String,
        /// Raw query string, e.g. `limit=5`.
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Send a motion event for the camera with this IP address.
    Trigger { ip: String },
    /// Print the configured cameras without contacting the server.
    Cameras,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let cli = Cli::parse();
    let config = ShinobiConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let client = ShinobiClient::new(config)?;
    let body = run(&client, cli.command).await?;

    println!("{body}");
    Ok(())
}

/// Execute one subcommand and return the text to print.
async fn run(client: &ShinobiClient, command: Commands) -> Result<String> {
    let body = match command {
        Commands::Monitors { group } => client.get_monitors(&group).await?,
        Commands::StartedMonitors { group } => client.get_started_monitors(&group).await?,
        Commands::Videos { group } => client.get_videos(&group).await?,
        Commands::Video { group, id, query } => {
            client.get_videos_by_id(&group, &id, &query).await?
        }
        Commands::Trigger { ip } => match client.trigger_motion(&ip).await? {
            MotionOutcome::Triggered(body) => {
                info!(%ip, "motion triggered");
                body
            }
            MotionOutcome::CameraNotFound => bail!("no camera configured with ip {ip}"),
        },
        Commands::Cameras => serde_json::to_string_pretty(&client.config().cameras)?,
    };
    Ok(body)
}
