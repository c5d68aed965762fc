//! Region CO2e emission factors, converted to tons CO2e per kWh.

use crate::error::{PhppError, PhppResult};
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// kWh per kBtu
const KWH_PER_KBTU: f64 = 0.293_071_111;
/// Metric tonnes per pound
const TONS_PER_LB: f64 = 0.000_453_6;
/// MWh per kWh
const MWH_PER_KWH: f64 = 0.001;

/// Fuel tags used by the energy end-use map and the reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Electric,
    NaturalGas,
    FuelOilNo2,
    FuelOilNo4,
    Wood,
    SolarThermal,
}

impl FuelType {
    /// Key used for the fuel in the reference data
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FuelType::Electric => "ELECTRIC",
            FuelType::NaturalGas => "NATURAL_GAS",
            FuelType::FuelOilNo2 => "FUEL_OIL_NO2",
            FuelType::FuelOilNo4 => "FUEL_OIL_NO4",
            FuelType::Wood => "WOOD",
            FuelType::SolarThermal => "SOLAR_THERMAL",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Units a reference factor may be stated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorUnit {
    TonsPerKwh,
    LbsPerMwh,
    TonsPerKbtu,
}

impl FactorUnit {
    /// Convert a value in this unit to tons CO2e per kWh.
    #[must_use]
    pub fn to_tons_per_kwh(self, value: f64) -> f64 {
        match self {
            FactorUnit::TonsPerKwh => value,
            FactorUnit::LbsPerMwh => value * TONS_PER_LB * MWH_PER_KWH,
            FactorUnit::TonsPerKbtu => 1.0 / ((1.0 / value) * KWH_PER_KBTU),
        }
    }
}

impl FromStr for FactorUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tons_co2_per_kWh" | "tons/kWh" => Ok(FactorUnit::TonsPerKwh),
            "lbs_co2_per_MWh" | "lbs/MWh" => Ok(FactorUnit::LbsPerMwh),
            "tons_co2_per_kBtu" | "tons/kBtu" => Ok(FactorUnit::TonsPerKbtu),
            other => Err(other.to_string()),
        }
    }
}

/// A factor as persisted in the reference file.
#[derive(Debug, Clone, Deserialize)]
struct RawFactor {
    unit: String,
    value: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct RawRegion {
    fuels: IndexMap<String, RawFactor>,
}

/// One converted factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factor {
    /// tons CO2e per kWh
    pub value: f64,
    pub source_unit: FactorUnit,
}

/// Fuel factors of a single region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFactors {
    region: String,
    fuels: IndexMap<String, Factor>,
}

impl RegionFactors {
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// tons CO2e per kWh for `fuel`
    pub fn factor(&self, fuel: FuelType) -> PhppResult<f64> {
        self.fuels
            .get(fuel.key())
            .map(|f| f.value)
            .ok_or_else(|| PhppError::MissingFactor {
                region: self.region.clone(),
                fuel: fuel.key().to_string(),
            })
    }

    /// All fuels with their converted factors, in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Factor)> {
        self.fuels.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// All regions of a reference file, every factor already converted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionFactorTable {
    regions: IndexMap<String, RegionFactors>,
}

impl RegionFactorTable {
    /// Parse `{region: {fuels: {FUEL: {unit, value}}}}`.
    ///
    /// Any unit tag outside the three known ones fails the whole load.
    pub fn from_json_str(json: &str) -> PhppResult<Self> {
        let raw: IndexMap<String, RawRegion> = serde_json::from_str(json)?;
        let mut regions = IndexMap::with_capacity(raw.len());
        for (region, entry) in raw {
            let mut fuels = IndexMap::with_capacity(entry.fuels.len());
            for (fuel, factor) in entry.fuels {
                let unit = factor.unit.parse::<FactorUnit>().map_err(|unit| {
                    PhppError::UnsupportedUnit {
                        region: region.clone(),
                        fuel: fuel.clone(),
                        unit,
                    }
                })?;
                fuels.insert(
                    fuel,
                    Factor {
                        value: unit.to_tons_per_kwh(factor.value),
                        source_unit: unit,
                    },
                );
            }
            regions.insert(
                region.clone(),
                RegionFactors {
                    region,
                    fuels,
                },
            );
        }
        debug!(regions = regions.len(), "parsed CO2e factor table");
        Ok(Self { regions })
    }

    /// Read and parse a reference file; a missing file is an error of its own.
    pub fn from_json_file(path: impl AsRef<Path>) -> PhppResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PhppError::FactorFileNotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&json)?;
        info!(path = %path.display(), regions = table.regions.len(), "loaded CO2e factors");
        Ok(table)
    }

    /// Factors for `name`
    pub fn region(&self, name: &str) -> PhppResult<&RegionFactors> {
        self.regions
            .get(name)
            .ok_or_else(|| PhppError::UnknownRegion(name.to_string()))
    }

    /// Region names in file order
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}

/// Process-wide cache of one reference file.
///
/// The file is read on first use; later calls share the same table.
#[derive(Debug)]
pub struct FactorCache {
    path: PathBuf,
    table: OnceCell<Arc<RegionFactorTable>>,
}

impl FactorCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded table, reading the file if this is the first call
    pub fn get(&self) -> PhppResult<Arc<RegionFactorTable>> {
        self.table
            .get_or_try_init(|| RegionFactorTable::from_json_file(&self.path).map(Arc::new))
            .cloned()
    }

    /// Factors for one region of the cached table
    pub fn region(&self, name: &str) -> PhppResult<RegionFactors> {
        Ok(self.get()?.region(name)?.clone())
    }
}
