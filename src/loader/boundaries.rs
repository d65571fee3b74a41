use geojson::{FeatureCollection, GeoJson, JsonObject, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::models::{pad_code, AllowList, Result, Ring};

pub const TRACT_CODE_WIDTH: usize = 6;
const STATE_CODE_WIDTH: usize = 2;
const COUNTY_CODE_WIDTH: usize = 3;

/// One boundary geometry kept after the county and allow-list filters.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    pub tract: String,
    pub block_group: Option<String>,
    pub name: Option<String>,
    pub rings: Vec<Ring>,
}

/// Read a tract or block-group boundary file, keep the configured county,
/// and apply the allow-list. Features without a tract code are skipped with
/// a warning rather than failing the load.
pub fn load_boundaries(
    path: &Path,
    state_fips: &str,
    county_fips: &str,
    allow_list: &AllowList,
) -> Result<Vec<BoundaryFeature>> {
    let raw = fs::read_to_string(path)?;
    let geojson: GeoJson = raw.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;

    let mut kept = Vec::new();
    for feature in collection.features {
        let Some(properties) = feature.properties.as_ref() else {
            continue;
        };

        if prop_code(properties, "STATEFP", STATE_CODE_WIDTH).as_deref() != Some(state_fips)
            || prop_code(properties, "COUNTYFP", COUNTY_CODE_WIDTH).as_deref() != Some(county_fips)
        {
            continue;
        }

        let Some(tract) = prop_code(properties, "TRACTCE", TRACT_CODE_WIDTH) else {
            warn!("boundary feature without a TRACTCE property, skipping");
            continue;
        };
        let block_group = prop_code(properties, "BLKGRPCE", 1);

        if !allow_list.selects(&tract, block_group.as_deref()) {
            continue;
        }

        kept.push(BoundaryFeature {
            tract,
            block_group,
            name: properties
                .get("NAMELSAD")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            rings: extract_rings(feature.geometry.as_ref()),
        });
    }

    debug!(kept = kept.len(), "boundary features after filtering");
    Ok(kept)
}

/// Census codes arrive as strings or bare numbers depending on the export;
/// either way they are zero-padded before comparison.
fn prop_code(properties: &JsonObject, key: &str, width: usize) -> Option<String> {
    match properties.get(key)? {
        serde_json::Value::String(s) => Some(pad_code(s, width)),
        serde_json::Value::Number(n) => Some(pad_code(&n.to_string(), width)),
        _ => None,
    }
}

fn extract_rings(geometry: Option<&geojson::Geometry>) -> Vec<Ring> {
    match geometry.map(|g| &g.value) {
        Some(Value::Polygon(polygon)) => outer_ring(polygon).into_iter().collect(),
        Some(Value::MultiPolygon(polygons)) => {
            polygons.iter().filter_map(|p| outer_ring(p)).collect()
        }
        _ => Vec::new(),
    }
}

fn outer_ring(polygon: &[Vec<Vec<f64>>]) -> Option<Ring> {
    let exterior = polygon.first()?;
    Some(
        exterior
            .iter()
            .filter_map(|position| Some((*position.first()?, *position.get(1)?)))
            .collect(),
    )
}
