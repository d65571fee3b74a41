pub mod boundaries;
pub mod demographics;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::config::Settings;
use crate::models::{AreaRecord, Result, ScorerError};
use crate::scoring::{validate_schema, ATTRIBUTES};

/// The session's immutable area table, built once at startup.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    pub areas: Vec<AreaRecord>,
    pub loaded_at: DateTime<Utc>,
}

/// Load boundaries and demographics and left-join them on the padded tract
/// code. Allow-listed areas missing from the demographics table are kept
/// with an empty attribute map; an allow-list that matches nothing fails
/// with `EmptyInput`.
pub fn load_working_set(settings: &Settings) -> Result<WorkingSet> {
    let data = &settings.data;

    let boundaries = boundaries::load_boundaries(
        Path::new(&data.boundaries_path),
        &data.state_fips,
        &data.county_fips,
        &data.allow_list,
    )?;
    let table = demographics::load_demographics(Path::new(&data.demographics_path))?;

    let mut areas = Vec::with_capacity(boundaries.len());
    for feature in boundaries {
        let id = match &feature.block_group {
            Some(bg) => format!("{}-{}", feature.tract, bg),
            None => feature.tract.clone(),
        };
        let attributes = match table.get(&feature.tract) {
            Some(attributes) => attributes.clone(),
            None => {
                warn!(tract = %feature.tract, "no demographics row for allow-listed tract");
                BTreeMap::new()
            }
        };
        areas.push(AreaRecord {
            id,
            name: feature.name,
            attributes,
            rings: feature.rings,
        });
    }

    if areas.is_empty() {
        return Err(ScorerError::EmptyInput);
    }

    info!(areas = areas.len(), "working set loaded");
    Ok(WorkingSet {
        areas,
        loaded_at: Utc::now(),
    })
}

/// Startup schema validation: every scored attribute must appear in at
/// least one area. A configured column missing from the input table is a
/// fatal configuration error, not a per-submission one.
pub fn validate_working_set(set: &WorkingSet) -> Result<()> {
    validate_schema(&set.areas, &ATTRIBUTES)
}
