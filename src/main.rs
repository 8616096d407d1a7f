use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use soundcloud_roulette::config::{CONFIG_FILE, Config};
use soundcloud_roulette::{AppState, build_router, embed};

#[derive(Parser, Debug)]
#[command(name = "soundcloud-roulette")]
#[command(about = "Serve random public SoundCloud tracks")]
#[command(version)]
struct Args {
    /// Config file, overridden by ROULETTE_* environment variables
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Address to listen on
    #[arg(short, long)]
    bind: Option<String>,

    /// Find a single track, print it and exit instead of serving
    #[arg(long)]
    once: bool,
}

/// `RUST_LOG` as given, or `info` when unset or unparsable.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let args = Args::parse();
    let mut config = match Config::get_config(&args.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Error reading {}: {e}", args.config.display());
            return Err(e);
        }
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let state = AppState::new(&config)?;
    info!(
        "Starting soundcloud-roulette v{}, saving findings to {}",
        env!("CARGO_PKG_VERSION"),
        config.findings_file.display()
    );

    if args.once {
        let mut rng = StdRng::from_os_rng();
        let finding = state.discover(&mut rng).await?;
        println!("{}", serde_json::to_string_pretty(&finding)?);
        println!("{}", embed::player_iframe(&finding.url));
        return Ok(());
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("Listening on http://{}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
