use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use freeimage_uploader::config::{self, Config};
use freeimage_uploader::uploader::HostClient;

#[derive(Parser)]
#[command(name = "freeimage-upload")]
#[command(about = "Upload an image to freeimage.host and print its viewer URL")]
#[command(version)]
struct Cli {
    /// Image file to upload
    file: PathBuf,

    /// Target width for oversized images
    #[arg(long)]
    width: Option<u32>,

    /// JPEG quality used when downscaling (1-100)
    #[arg(long)]
    quality: Option<u8>,

    /// Upload the original bytes even when they exceed the resize threshold
    #[arg(long)]
    no_resize: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config().context("failed to load configuration")?;
    apply_overrides(&mut config, &cli);

    // Initialize logging
    let level = config
        .log_level
        .parse()
        .unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::info!("Starting freeimage-upload");

    config::validate_config(&config).context("invalid configuration")?;
    let api_key = config::resolve_api_key(&config)?;

    let payload = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let client = HostClient::new(config, api_key)?;

    match client.upload(payload).await {
        Ok(uploaded) => {
            println!("{}", uploaded.viewer_url);
            Ok(())
        }
        Err(e) => {
            log::error!("Upload failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(width) = cli.width {
        config.target_width = width;
    }
    if let Some(quality) = cli.quality {
        config.jpeg_quality = quality;
    }
    if cli.no_resize {
        // Threshold no payload can reach
        config.resize_threshold_bytes = u64::MAX;
    }
}
