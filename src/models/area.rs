use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One polygon ring in (longitude, latitude) order.
pub type Ring = Vec<(f64, f64)>;

/// Marker selecting every block group of a tract in the allow-list.
pub const BLOCK_GROUP_WILDCARD: &str = "*";

/// One geographic unit of the working set, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    /// Zero-padded tract code, optionally suffixed with a block-group digit.
    pub id: String,
    pub name: Option<String>,
    /// Raw attribute values keyed by demographics column name.
    pub attributes: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rings: Vec<Ring>,
}

impl AreaRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            attributes: BTreeMap::new(),
            rings: Vec::new(),
        }
    }
}

/// An area plus its derived importance score. All original fields are
/// preserved; the score is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArea {
    pub id: String,
    pub name: Option<String>,
    pub attributes: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rings: Vec<Ring>,
    pub score: f64,
}

impl ScoredArea {
    pub fn from_area(area: &AreaRecord, score: f64) -> Self {
        Self {
            id: area.id.clone(),
            name: area.name.clone(),
            attributes: area.attributes.clone(),
            rings: area.rings.clone(),
            score,
        }
    }
}

/// The fixed set of area identifiers the tool restricts itself to: tract
/// code mapped to the block groups wanted from it, with `"*"` selecting all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList(pub BTreeMap<String, Vec<String>>);

impl AllowList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a boundary feature belongs to the working set. Features with
    /// no block-group code (tract-level inputs) match on the tract alone.
    pub fn selects(&self, tract: &str, block_group: Option<&str>) -> bool {
        match (self.0.get(tract), block_group) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(groups), Some(bg)) => groups
                .iter()
                .any(|g| g == BLOCK_GROUP_WILDCARD || g == bg),
        }
    }
}

/// Zero-pad a numeric code so it compares against the Census zero-padded
/// key scheme (e.g. tract "505" becomes "000505").
pub fn pad_code(raw: &str, width: usize) -> String {
    format!("{:0>width$}", raw.trim(), width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list(entries: &[(&str, &[&str])]) -> AllowList {
        AllowList(
            entries
                .iter()
                .map(|(tract, groups)| {
                    (
                        (*tract).to_string(),
                        groups.iter().map(|g| (*g).to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_pad_code() {
        assert_eq!(pad_code("505", 6), "000505");
        assert_eq!(pad_code(" 600 ", 6), "000600");
        assert_eq!(pad_code("001104", 6), "001104");
        assert_eq!(pad_code("1234567", 6), "1234567");
    }

    #[test]
    fn test_allow_list_tract_and_block_group() {
        let list = allow_list(&[("000505", &["2"]), ("000600", &["*"])]);

        assert!(list.selects("000505", Some("2")));
        assert!(!list.selects("000505", Some("1")));
        assert!(list.selects("000600", Some("1")));
        assert!(list.selects("000600", Some("4")));
        assert!(!list.selects("000700", Some("2")));
    }

    #[test]
    fn test_allow_list_tract_level_input() {
        let list = allow_list(&[("000505", &["2"])]);

        // Tract-level boundary files carry no block-group code.
        assert!(list.selects("000505", None));
        assert!(!list.selects("000506", None));
    }

    #[test]
    fn test_scored_area_preserves_fields() {
        let mut area = AreaRecord::new("000600");
        area.name = Some("Census Tract 6".to_string());
        area.attributes.insert("population".to_string(), 1200.0);

        let scored = ScoredArea::from_area(&area, 0.42);
        assert_eq!(scored.id, area.id);
        assert_eq!(scored.name, area.name);
        assert_eq!(scored.attributes, area.attributes);
        assert_eq!(scored.score, 0.42);
    }
}
