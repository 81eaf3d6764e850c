//! Session schema definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full state captured by one history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub configurations: Configurations,
    pub alloy_store: AlloyStore,
    #[serde(default = "Utc::now")]
    pub captured_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn new(configurations: Configurations, alloy_store: AlloyStore) -> Self {
        Self {
            configurations,
            alloy_store,
            captured_at: Utc::now(),
        }
    }

    /// Equal configuration and alloys, whatever the capture times.
    pub fn same_content(&self, other: &SessionSnapshot) -> bool {
        self.configurations == other.configurations && self.alloy_store == other.alloy_store
    }

    /// Same content, fresh capture time.
    pub fn recaptured(&self) -> Self {
        Self {
            captured_at: Utc::now(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Li98,
    Kirkaldy83,
}

/// Simulation configuration sent alongside the alloy.
///
/// Temperatures are in degrees Celsius, the cooling rate in °C/s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Configurations {
    #[serde(default)]
    pub method: Method,
    /// ASTM grain size number.
    pub grain_size: f64,
    /// Percent transformed marking the start of a transformation curve.
    pub nucleation_start: f64,
    /// Percent transformed marking the finish of a transformation curve.
    pub nucleation_finish: f64,
    #[serde(default = "default_true")]
    pub auto_calculate_ms: bool,
    #[serde(default)]
    pub ms_temp: f64,
    #[serde(default)]
    pub ms_rate_param: f64,
    #[serde(default = "default_true")]
    pub auto_calculate_bs: bool,
    #[serde(default)]
    pub bs_temp: f64,
    #[serde(default = "default_true")]
    pub auto_calculate_ae: bool,
    #[serde(default)]
    pub ae1_temp: f64,
    #[serde(default)]
    pub ae3_temp: f64,
    #[serde(default = "default_true")]
    pub auto_calculate_xfe: bool,
    /// Equilibrium ferrite fraction, 0..=1.
    #[serde(default)]
    pub xfe_value: f64,
    #[serde(default)]
    pub cf_value: f64,
    #[serde(default)]
    pub ceut_value: f64,
    pub start_temp: f64,
    pub cct_cooling_rate: f64,
}

fn default_true() -> bool {
    true
}

impl Default for Configurations {
    fn default() -> Self {
        Self {
            method: Method::Li98,
            grain_size: 8.0,
            nucleation_start: 1.0,
            nucleation_finish: 99.9,
            auto_calculate_ms: true,
            ms_temp: 0.0,
            ms_rate_param: 0.0,
            auto_calculate_bs: true,
            bs_temp: 0.0,
            auto_calculate_ae: true,
            ae1_temp: 0.0,
            ae3_temp: 0.0,
            auto_calculate_xfe: true,
            xfe_value: 0.0,
            cf_value: 0.0,
            ceut_value: 0.0,
            start_temp: 900.0,
            cct_cooling_rate: 10.0,
        }
    }
}

/// One alloying element and its weight percent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    pub symbol: String,
    pub weight: f64,
}

impl Element {
    pub fn new(symbol: impl Into<String>, weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Alloy {
    pub name: String,
    #[serde(default)]
    pub compositions: Vec<Element>,
}

impl Alloy {
    /// Weight percent of `symbol` (0.0 if absent).
    pub fn weight_of(&self, symbol: &str) -> f64 {
        self.compositions
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.weight)
            .unwrap_or(0.0)
    }

    pub fn total_weight(&self) -> f64 {
        self.compositions.iter().map(|e| e.weight).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlloyOption {
    #[default]
    Single,
    /// Parent metal diluted into a weld metal.
    Mix,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AlloyStore {
    #[serde(default)]
    pub alloy_option: AlloyOption,
    pub parent: Alloy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weld: Option<Alloy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix: Option<Alloy>,
    /// Percent of weld metal in the mix.
    #[serde(default)]
    pub dilution: f64,
}
