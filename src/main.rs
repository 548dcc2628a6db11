//! Posture Dashboard CLI
//!
//! Renders the trigger dashboard from a captured event stream, and writes
//! the default configuration file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use posture_dashboard::config::{generate_default_config, Config, LoggingConfig};
use posture_dashboard::dashboard::{Clock, DashboardClient, FixedClock, SystemClock};
use posture_dashboard::render::TextSurface;
use posture_dashboard::stream::{forward, run_consumer, Dispatcher, ReplaySource};

#[derive(Parser)]
#[command(name = "posture-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live trigger dashboard for the posture monitor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard from a captured stream (one JSON frame per line)
    Replay {
        /// Path to the capture file
        file: PathBuf,
        /// Treat this date (YYYY-MM-DD) as today instead of the wall clock
        #[arg(long)]
        today: Option<String>,
        /// Print the dashboard after every frame, not only at the end
        #[arg(short, long)]
        follow: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), std::io::stderr)?;
    init_logging(&config.logging);

    match cli.command {
        Commands::Replay {
            file,
            today,
            follow,
        } => replay(&config, file, today, follow).await,
        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

/// Load the config under a bootstrap subscriber, so messages emitted while
/// searching and parsing are not lost before `init_logging` runs.
fn load_config<W>(path: Option<&Path>, writer: W) -> anyhow::Result<Config>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(bootstrap, || match path {
        Some(path) => Ok(Config::load_with_env(path)?),
        None => Ok(Config::load_default()),
    })
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("posture_dashboard={}", logging.level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries the rendered dashboard
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn replay(
    config: &Config,
    file: PathBuf,
    today: Option<String>,
    follow: bool,
) -> anyhow::Result<()> {
    let clock: Box<dyn Clock + Send> = match today {
        Some(day) => Box::new(
            FixedClock::parse(&day).with_context(|| format!("invalid --today {:?}", day))?,
        ),
        None => Box::new(SystemClock::new(config.display.day_boundary)),
    };
    tracing::info!(today = %clock.today_key(), "Rendering dashboard");

    let source = ReplaySource::open(&file)
        .await
        .with_context(|| format!("opening capture {:?}", file))?;

    let (tx, rx) = mpsc::channel(config.stream.channel_capacity.max(1));
    let producer = tokio::spawn(forward(source, tx));

    let client = DashboardClient::new(TextSurface::new(config.display.bar_width), clock);
    let dispatcher = run_consumer(rx, Dispatcher::new(client), |d| {
        if follow {
            println!("{}", d.client().surface().render());
            println!("{}", "-".repeat(40));
        }
    })
    .await;

    let forwarded = producer.await??;
    let stats = dispatcher.stats();
    tracing::info!(
        frames = forwarded,
        snapshots = stats.snapshots,
        warnings = stats.warnings,
        rejected_frames = stats.rejected_frames,
        rejected_events = stats.rejected_events,
        "Replay complete"
    );

    if !follow {
        print!("{}", dispatcher.client().surface().render());
    }
    Ok(())
}
