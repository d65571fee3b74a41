use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use crate::models::{pad_code, Result, ScorerError};
use crate::scoring::ATTRIBUTES;

use super::boundaries::TRACT_CODE_WIDTH;

/// Key column joining the demographics table to the boundary file.
pub const TRACT_COLUMN: &str = "tract";

/// Attribute values per zero-padded tract code.
pub type AttributeTable = BTreeMap<String, BTreeMap<String, f64>>;

/// Read the demographics CSV. Cells that are empty or unparseable are
/// skipped with a warning; a column absent from the header entirely is left
/// for startup schema validation to reject.
pub fn load_demographics(path: &Path) -> Result<AttributeTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let tract_index = headers
        .iter()
        .position(|h| h == TRACT_COLUMN)
        .ok_or_else(|| {
            ScorerError::Config(format!(
                "demographics table has no {:?} key column",
                TRACT_COLUMN
            ))
        })?;

    let columns: Vec<(usize, &str)> = ATTRIBUTES
        .iter()
        .filter_map(|attribute| {
            headers
                .iter()
                .position(|h| h == *attribute)
                .map(|index| (index, *attribute))
        })
        .collect();

    let mut table = AttributeTable::new();
    for record in reader.records() {
        let record = record?;
        let Some(tract_raw) = record.get(tract_index) else {
            continue;
        };
        let tract = pad_code(tract_raw, TRACT_CODE_WIDTH);

        let mut attributes = BTreeMap::new();
        for (index, attribute) in &columns {
            let Some(cell) = record.get(*index).map(str::trim) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            match cell.parse::<f64>() {
                Ok(value) => {
                    attributes.insert((*attribute).to_string(), value);
                }
                Err(_) => {
                    warn!(%tract, attribute = *attribute, cell, "unparseable attribute value, skipping");
                }
            }
        }
        table.insert(tract, attributes);
    }

    Ok(table)
}
