use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::models::AllowList;
use crate::scoring::{ImportanceWeights, ScalingPolicy};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub data: DataSettings,
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    pub boundaries_path: String,
    pub demographics_path: String,
    pub state_fips: String,
    pub county_fips: String,
    pub allow_list: AllowList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub weights: ImportanceWeights,
    pub scaling: ScalingPreset,
}

/// The two scaling conventions, as configuration presets of one policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingPreset {
    /// Every attribute min-max scaled into [0, 1].
    Unit,
    /// Population and income scaled into [0, 100], percentages passed through.
    Percent,
}

impl ScalingPreset {
    pub fn policy(self) -> ScalingPolicy {
        match self {
            Self::Unit => ScalingPolicy::unit_range(),
            Self::Percent => ScalingPolicy::percent_range(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Canvass Scorer".to_string(),
                log_level: "info".to_string(),
            },
            data: DataSettings {
                boundaries_path: "data/tracts.geojson".to_string(),
                demographics_path: "data/tracts_df.csv".to_string(),
                // Larimer County, Colorado
                state_fips: "08".to_string(),
                county_fips: "069".to_string(),
                allow_list: default_allow_list(),
            },
            scoring: ScoringSettings {
                weights: ImportanceWeights::default(),
                scaling: ScalingPreset::Unit,
            },
        }
    }
}

fn default_allow_list() -> AllowList {
    let targets = [
        ("000505", vec!["2"]),             // Tract 5.05, BG 2
        ("000504", vec!["1"]),             // Tract 5.04, BG 1
        ("000600", vec!["*"]),             // Tract 6, all BGs
        ("000700", vec!["2"]),             // Tract 7, BG 2
        ("000901", vec!["1", "3", "4"]),   // Tract 9.01, BGs 1, 3, 4
        ("001104", vec!["*"]),             // Tract 11.04, all BGs
        ("001110", vec!["*"]),             // Tract 11.10, all BGs
        ("001111", vec!["*"]),             // Tract 11.11, all BGs
    ];
    AllowList(
        targets
            .into_iter()
            .map(|(tract, groups)| {
                (
                    tract.to_string(),
                    groups.into_iter().map(str::to_string).collect::<Vec<_>>(),
                )
            })
            .collect::<BTreeMap<_, _>>(),
    )
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CANVASS_SCORER"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Err(e) = self.scoring.weights.validate() {
            return Err(e.to_string());
        }

        if self.data.allow_list.is_empty() {
            return Err("Allow-list must name at least one tract".to_string());
        }

        for (label, code) in [
            ("state_fips", &self.data.state_fips),
            ("county_fips", &self.data.county_fips),
        ] {
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(format!("{} must be a numeric FIPS code, got {:?}", label, code));
            }
        }

        Ok(())
    }
}
