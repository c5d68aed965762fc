//! Per-request report configuration.

use crate::error::PhppResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the CO2e view is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Co2eMethod {
    /// Energy end uses mapped to fuels, scaled by TFA and multiplied by the
    /// region's emission factors
    #[default]
    FuelRollup,
    /// The template's own kg CO2e block converted to tons
    Precomputed,
}

/// Settings threaded explicitly through report assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Annual CO2e limit appended to the CO2e view
    pub co2e_limit_tons_yr: f64,
    /// Envelope assemblies left out of the variant inputs
    pub omitted_assemblies: Vec<String>,
    pub co2e_method: Co2eMethod,
    /// Credit solar PV against net source energy
    pub solar_credit: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            co2e_limit_tons_yr: 5.0,
            omitted_assemblies: Vec::new(),
            co2e_method: Co2eMethod::default(),
            solar_credit: false,
        }
    }
}

impl ReportConfig {
    pub fn from_yaml_str(yaml: &str) -> PhppResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> PhppResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    #[must_use]
    pub fn with_co2e_limit(mut self, limit: f64) -> Self {
        self.co2e_limit_tons_yr = limit;
        self
    }

    #[must_use]
    pub fn with_omitted_assemblies(mut self, names: Vec<String>) -> Self {
        self.omitted_assemblies = names;
        self
    }

    /// True when `name` is on the omitted list
    #[must_use]
    pub fn is_omitted(&self, name: &str) -> bool {
        self.omitted_assemblies.iter().any(|o| o == name)
    }
}
