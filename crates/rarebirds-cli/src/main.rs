mod run;
mod snapshot;

use std::path::PathBuf;

use clap::Parser;
use rarebirds_core::{AppConfig, MAX_DAYS_BACK};
use rarebirds_ebird::EbirdClient;
use rarebirds_wiki::WikiClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rarebirds")]
#[command(about = "Snapshot recent notable bird sightings for a region")]
struct Cli {
    /// Where to write the JSON snapshot.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Lookback window in days.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DAYS_BACK)))]
    days_back: Option<u32>,

    /// eBird region code, e.g. `US-NY`.
    #[arg(long)]
    region_code: Option<String>,

    /// Display name stored in the snapshot.
    #[arg(long)]
    region_name: Option<String>,

    /// Skip Wikipedia image lookups.
    #[arg(long)]
    no_images: bool,
}

impl Cli {
    fn apply(self, config: &mut AppConfig) {
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(days_back) = self.days_back {
            config.days_back = days_back;
        }
        if let Some(region_code) = self.region_code {
            config.region_code = region_code;
        }
        if let Some(region_name) = self.region_name {
            config.region_name = region_name;
        }
        if self.no_images {
            config.image_limit = 0;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = rarebirds_core::load_app_config()?;
    cli.apply(&mut config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.uses_placeholder_key() {
        tracing::warn!("EBIRD_API_KEY is not set; eBird will reject the placeholder key");
    }
    tracing::debug!(?config, "configuration loaded");

    let ebird = EbirdClient::with_base_url(
        &config.ebird_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.ebird_base_url,
    )?;
    let wiki = WikiClient::with_base_url(
        config.image_timeout_secs,
        &config.user_agent,
        &config.wiki_base_url,
    )?;

    let summary = run::run_pipeline(&config, &ebird, &wiki).await?;
    tracing::info!(
        raw = summary.raw_observations,
        species = summary.total_species,
        observations = summary.total_observations,
        images = summary.images_found,
        path = %summary.output_path.display(),
        "run complete"
    );

    Ok(())
}
