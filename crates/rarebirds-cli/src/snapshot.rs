//! Image enrichment and snapshot persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rarebirds_core::{Snapshot, SpeciesGroup};
use rarebirds_wiki::WikiClient;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SnapshotError {
    #[error("failed to write snapshot to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Something that can find a picture for a species by common name.
pub(crate) trait ImageLookup {
    async fn lookup_image(&self, common_name: &str) -> Option<String>;
}

impl ImageLookup for WikiClient {
    async fn lookup_image(&self, common_name: &str) -> Option<String> {
        WikiClient::lookup_image(self, common_name).await
    }
}

/// Attaches images to the first `limit` groups, which must already be in
/// rarity order. Sleeps `delay` between consecutive lookups.
///
/// Groups past `limit` are left untouched so they serialize without an
/// `imageUrl` field. Returns how many lookups found an image.
pub(crate) async fn enrich_with_images<L: ImageLookup>(
    groups: &mut [SpeciesGroup],
    lookup: &L,
    limit: usize,
    delay: Duration,
) -> usize {
    let mut found = 0usize;

    for (idx, group) in groups.iter_mut().take(limit).enumerate() {
        if idx > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let image = lookup.lookup_image(&group.com_name).await;
        if image.is_some() {
            found += 1;
        } else {
            tracing::info!(
                species = %group.com_name,
                rank = group.rarity_rank,
                "no image found"
            );
        }
        group.image_url = Some(image);
    }

    found
}

/// Writes `snapshot` as 2-space-indented JSON, replacing any existing file.
///
/// The parent directory is created when missing. Non-ASCII text is written
/// as-is.
///
/// # Errors
///
/// Returns [`SnapshotError`] if serialization or any filesystem step fails.
pub(crate) fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let io_err = |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let rendered = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, rendered).map_err(io_err)?;

    tracing::debug!(path = %path.display(), species = snapshot.total_species, "snapshot written");
    Ok(())
}
