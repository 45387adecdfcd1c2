//! promptcraft - local prompt builder with remote prompt enhancement

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use promptcraft::config::{Config, ConfigOptions};
use promptcraft::enhancer::{FormServer, PromptEnhancer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "promptcraft")]
#[command(about = "Build multi-level AI prompts in the browser and enhance them remotely")]
struct Args {
    /// First port to try for the Web UI
    #[arg(long)]
    port: Option<u16>,

    /// Timeout for each enhancement request, in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Model used for enhancement
    #[arg(long)]
    model: Option<String>,

    /// Directory for saved prompt exports
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Do not open a browser window on start
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = Config::from_env(ConfigOptions {
        model: args.model,
        timeout_secs: args.timeout,
        max_tokens: None,
        port: args.port,
        export_dir: args.export_dir,
        no_browser: args.no_browser,
    })?;

    info!("Starting promptcraft (model: {})", config.model);

    let enhancer = Arc::new(PromptEnhancer::new(config.clone())?);
    let server = FormServer::new(enhancer);

    let port = match server.start().await {
        Ok(port) => port,
        Err(e) => {
            error!("Server error: {}", e);
            std::process::exit(1);
        }
    };

    let url = format!("http://localhost:{}/", port);
    if config.no_browser {
        info!("Open in browser: {}", url);
    } else {
        open_browser(&url);
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    Ok(())
}

fn open_browser(url: &str) {
    if let Err(e) = open::that(url) {
        warn!("Could not auto-open browser: {}, URL: {}", e, url);
        info!("Please manually open: {}", url);
    }
}
