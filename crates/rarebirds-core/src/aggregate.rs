//! Deduplication, grouping, and rarity ranking of notable observations.

use std::collections::{HashMap, HashSet};

use crate::observation::{
    Observation, Sighting, SpeciesGroup, UNKNOWN_COMMON_NAME, UNKNOWN_SPECIES_CODE,
};

/// Groups raw observations by species and ranks the species by rarity.
///
/// 1. Drops repeats of the same `(speciesCode, subId)` pair; the first one
///    seen wins.
/// 2. Groups the survivors by species code. Names come from the first
///    observation of each species.
/// 3. Sorts each group's sightings newest first (by the date string).
/// 4. Sorts groups by ascending sighting count, then common name, and assigns
///    `rarity_rank` from 1.
///
/// Empty input yields an empty list.
#[must_use]
pub fn process_observations(observations: &[Observation]) -> Vec<SpeciesGroup> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut groups: HashMap<String, SpeciesGroup> = HashMap::new();

    for obs in observations {
        let species_code = obs
            .species_code
            .clone()
            .unwrap_or_else(|| UNKNOWN_SPECIES_CODE.to_string());
        let sub_id = obs.sub_id.clone().unwrap_or_default();

        if !seen.insert((species_code.clone(), sub_id)) {
            tracing::trace!(species_code = %species_code, "duplicate observation skipped");
            continue;
        }

        groups
            .entry(species_code.clone())
            .or_insert_with(|| {
                SpeciesGroup::new(
                    species_code,
                    obs.com_name
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_COMMON_NAME.to_string()),
                    obs.sci_name.clone().unwrap_or_default(),
                )
            })
            .observations
            .push(Sighting::from_observation(obs));
    }

    let mut ranked: Vec<SpeciesGroup> = groups
        .into_values()
        .map(|mut group| {
            group.observations.sort_by(|a, b| b.obs_dt.cmp(&a.obs_dt));
            group.total_observations = group.observations.len();
            group
        })
        .collect();

    // Species code only breaks ties between distinct species sharing a name,
    // keeping the output independent of hash order.
    ranked.sort_by(|a, b| {
        a.total_observations
            .cmp(&b.total_observations)
            .then_with(|| a.com_name.cmp(&b.com_name))
            .then_with(|| a.species_code.cmp(&b.species_code))
    });

    for (idx, group) in ranked.iter_mut().enumerate() {
        group.rarity_rank = idx + 1;
    }

    ranked
}

/// Returns `(total_species, total_observations)` for a ranked list.
#[must_use]
pub fn summarize(groups: &[SpeciesGroup]) -> (usize, usize) {
    let observations = groups.iter().map(|g| g.total_observations).sum();
    (groups.len(), observations)
}
