//! The fetch → aggregate → enrich → write pipeline.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use rarebirds_core::{process_observations, summarize, AppConfig, Snapshot};
use rarebirds_ebird::EbirdClient;

use crate::snapshot::{enrich_with_images, write_snapshot, ImageLookup};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub raw_observations: usize,
    pub total_species: usize,
    pub total_observations: usize,
    pub images_found: usize,
    pub output_path: PathBuf,
}

/// Runs one full snapshot cycle.
///
/// A fetch failure aborts before anything touches the output file. Image
/// lookups never fail the run.
///
/// # Errors
///
/// Returns an error if the eBird request fails or the snapshot cannot be
/// written.
pub(crate) async fn run_pipeline<L: ImageLookup>(
    config: &AppConfig,
    ebird: &EbirdClient,
    images: &L,
) -> anyhow::Result<RunSummary> {
    println!(
        "Fetching notable bird observations for {}...",
        config.region_code
    );

    let raw = ebird
        .recent_notable(&config.region_code, config.days_back)
        .await
        .with_context(|| {
            format!(
                "failed to fetch notable observations for {}",
                config.region_code
            )
        })?;
    println!("Retrieved {} raw observations", raw.len());

    let mut groups = process_observations(&raw);
    let (total_species, total_observations) = summarize(&groups);
    println!("Found {total_species} unique species with {total_observations} unique observations");

    let images_found = enrich_with_images(
        &mut groups,
        images,
        config.image_limit,
        Duration::from_millis(config.image_delay_ms),
    )
    .await;
    tracing::info!(
        attempted = config.image_limit.min(groups.len()),
        found = images_found,
        "image enrichment complete"
    );

    let snapshot = Snapshot::new(
        Utc::now(),
        &config.region_name,
        &config.region_code,
        config.days_back,
        groups,
    );
    write_snapshot(&config.output_path, &snapshot)?;
    println!("Data saved to {}", config.output_path.display());

    Ok(RunSummary {
        raw_observations: raw.len(),
        total_species,
        total_observations,
        images_found,
        output_path: config.output_path.clone(),
    })
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
