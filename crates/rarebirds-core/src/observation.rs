//! Observation records and the snapshot document built from them.
//!
//! [`Observation`] mirrors the eBird wire shape, where every field may be
//! absent. [`Sighting`] and [`SpeciesGroup`] are the normalized forms written
//! into the [`Snapshot`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_SPECIES_CODE: &str = "unknown";
pub const UNKNOWN_COMMON_NAME: &str = "Unknown";
pub const UNKNOWN_LOCATION: &str = "Unknown location";
pub const ANONYMOUS_OBSERVER: &str = "Anonymous";

/// A single notable observation as returned by the eBird API.
///
/// Extra fields in the payload (`locId`, `obsValid`, `obsReviewed`, ...) are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub species_code: Option<String>,
    pub com_name: Option<String>,
    pub sci_name: Option<String>,
    pub loc_name: Option<String>,
    /// Local observation time, `"YYYY-MM-DD HH:MM"` or `"YYYY-MM-DD"`.
    pub obs_dt: Option<String>,
    pub how_many: Option<u32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub sub_id: Option<String>,
    pub user_display_name: Option<String>,
}

/// One deduplicated sighting inside a [`SpeciesGroup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    pub loc_name: String,
    pub obs_dt: String,
    pub how_many: u32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub sub_id: String,
    pub user_display_name: String,
}

impl Sighting {
    /// Normalizes a raw observation, filling the documented defaults.
    #[must_use]
    pub fn from_observation(obs: &Observation) -> Self {
        Self {
            loc_name: obs
                .loc_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            obs_dt: obs.obs_dt.clone().unwrap_or_default(),
            how_many: obs.how_many.unwrap_or(1),
            lat: obs.lat,
            lng: obs.lng,
            sub_id: obs.sub_id.clone().unwrap_or_default(),
            user_display_name: obs
                .user_display_name
                .clone()
                .unwrap_or_else(|| ANONYMOUS_OBSERVER.to_string()),
        }
    }
}

/// All sightings of one species, with its rarity rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesGroup {
    pub com_name: String,
    pub sci_name: String,
    pub species_code: String,
    /// Newest first.
    pub observations: Vec<Sighting>,
    pub total_observations: usize,
    /// 1 is the rarest species in the snapshot.
    pub rarity_rank: usize,
    /// `None` means no lookup was attempted and the field is omitted.
    /// `Some(None)` means the lookup found nothing and serializes as `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
}

impl SpeciesGroup {
    #[must_use]
    pub fn new(species_code: String, com_name: String, sci_name: String) -> Self {
        Self {
            com_name,
            sci_name,
            species_code,
            observations: Vec::new(),
            total_observations: 0,
            rarity_rank: 0,
            image_url: None,
        }
    }

    /// Expands the group back into raw observations, one per sighting.
    #[must_use]
    pub fn to_observations(&self) -> Vec<Observation> {
        self.observations
            .iter()
            .map(|s| Observation {
                species_code: Some(self.species_code.clone()),
                com_name: Some(self.com_name.clone()),
                sci_name: Some(self.sci_name.clone()),
                loc_name: Some(s.loc_name.clone()),
                obs_dt: Some(s.obs_dt.clone()),
                how_many: Some(s.how_many),
                lat: s.lat,
                lng: s.lng,
                sub_id: Some(s.sub_id.clone()),
                user_display_name: Some(s.user_display_name.clone()),
            })
            .collect()
    }
}

/// The document persisted to disk after each run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub last_updated: String,
    pub region: String,
    pub region_code: String,
    pub days_back: u32,
    pub total_species: usize,
    pub total_observations: usize,
    pub species: Vec<SpeciesGroup>,
}

impl Snapshot {
    /// Builds the envelope, computing both totals from `species`.
    #[must_use]
    pub fn new(
        generated_at: DateTime<Utc>,
        region: &str,
        region_code: &str,
        days_back: u32,
        species: Vec<SpeciesGroup>,
    ) -> Self {
        let (total_species, total_observations) = crate::aggregate::summarize(&species);
        Self {
            last_updated: format_timestamp(generated_at),
            region: region.to_string(),
            region_code: region_code.to_string(),
            days_back,
            total_species,
            total_observations,
            species,
        }
    }
}

/// Formats a UTC instant as ISO-8601 with microseconds and a `Z` suffix.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
