//! Template layout contracts.
//!
//! Every worksheet row number the pipeline reads is declared here, once per
//! template version. Views never compute row numbers; they look them up in
//! the [`TemplateSchema`] carried by the dataset.

use crate::error::{PhppError, PhppResult};
use phpp_sheet::{ColumnSpan, Window};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive span of worksheet row numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub first: usize,
    pub last: usize,
}

impl RowSpan {
    pub const fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        (self.first..=self.last).contains(&row)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }
}

/// Where a raw table lives in the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet: &'static str,
    /// 0-based worksheet row of the header
    pub header_row: usize,
    /// Inclusive column letters, e.g. `C:K`
    pub columns: &'static str,
    pub row_limit: Option<usize>,
}

impl SheetLayout {
    /// The calamine window for this layout
    pub fn window(&self) -> PhppResult<Window> {
        Ok(Window {
            header_row: self.header_row,
            columns: ColumnSpan::parse(self.columns)?,
            row_limit: self.row_limit,
        })
    }

    /// Same layout with an explicit number of data rows
    #[must_use]
    pub fn with_rows(self, rows: usize) -> Self {
        Self {
            row_limit: Some(rows),
            ..self
        }
    }

    /// 1-based worksheet row number of the first data row
    #[must_use]
    pub fn first_data_row_number(&self) -> usize {
        self.header_row + 2
    }
}

/// The room ventilation table and how its length is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VentLayout {
    pub table: SheetLayout,
    /// Column scanned for the end-of-table marker
    pub sentinel_column: &'static str,
    pub sentinel: &'static str,
    /// Room count used when the marker is absent
    pub fallback_rows: usize,
    /// Labels given to the window's columns, left to right
    pub column_labels: [&'static str; 19],
}

/// Climate block column roles (0-based within the window).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateLayout {
    pub table: SheetLayout,
    pub units_column: usize,
    pub label_column: usize,
    pub first_month_column: usize,
}

/// Row numbers on the Variants sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainRows {
    pub final_energy_heating: RowSpan,
    pub final_energy_cooling: RowSpan,
    pub final_energy_dhw: RowSpan,

    pub building_data: RowSpan,
    pub tfa: usize,
    pub net_volume: usize,
    pub exterior_surface: usize,
    pub window_areas: RowSpan,

    pub r_values: RowSpan,
    pub envelope: RowSpan,
    pub q50: usize,
    pub systems: RowSpan,
    pub duct_length: usize,
    pub duct_insulation: usize,

    pub cert_limits: RowSpan,
    pub cert_heating_demand: usize,
    pub cert_cooling_demand_total: usize,
    pub cert_cooling_demand: usize,
    pub cert_heating_load: usize,
    pub cert_cooling_load: usize,
    pub cert_primary_energy_renewable: usize,
    pub cert_source_energy: usize,

    pub heating_losses: RowSpan,
    pub heating_gains: RowSpan,
    pub cooling_losses: RowSpan,
    pub cooling_gains: RowSpan,

    pub site_energy: RowSpan,
    pub site_energy_consumption: RowSpan,
    pub source_energy: RowSpan,
    pub solar_pv: usize,
    pub primary_energy_renewable: RowSpan,
    pub primary_energy_renewable_consumption: RowSpan,

    pub heating_demand_phius: usize,
    pub heating_demand: usize,
    pub cooling_demand: usize,
    pub heating_load: usize,
    pub cooling_load: usize,

    pub airtightness: RowSpan,
    pub surfaces: RowSpan,
    pub certification: usize,
    pub peak_loads: RowSpan,
    pub co2e_precomputed: RowSpan,
}

/// Complete layout contract for one template version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSchema {
    pub version: TemplateVersion,
    pub variants: SheetLayout,
    /// Worksheet row number of the first raw data row
    pub main_row_offset: usize,
    /// Row repeating the column numbers beneath the header
    pub main_duplicate_header_row: usize,
    /// Positions (in the raw window) of the active-variant selector columns
    pub selector_columns: [usize; 2],
    pub climate: ClimateLayout,
    pub vent: VentLayout,
    pub rows: MainRows,
}

/// Supported template versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemplateVersion {
    #[default]
    #[serde(rename = "phpp-10")]
    Phpp10,
}

impl TemplateVersion {
    /// The layout contract for this version
    #[must_use]
    pub fn schema(self) -> &'static TemplateSchema {
        match self {
            TemplateVersion::Phpp10 => &PHPP_10,
        }
    }
}

impl fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateVersion::Phpp10 => write!(f, "phpp-10"),
        }
    }
}

impl FromStr for TemplateVersion {
    type Err = PhppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phpp-10" | "phpp10" | "10" => Ok(TemplateVersion::Phpp10),
            other => Err(PhppError::structural(format!(
                "unsupported template version '{other}'"
            ))),
        }
    }
}

const END_OF_ROOMS_MARKER: &str =
    "Additional rows: please select full rows above, and copy and insert them multiple times.";

const ROOM_COLUMNS: [&str; 19] = [
    "Amount",
    "Room name",
    "Allocation to Vent Unit",
    "Area",
    "Clear height",
    "Room Vol.",
    "V_Supply",
    "V_Extract",
    "V_Transmission",
    "Room ACH",
    "Utilisation h/d",
    "Utiliztion d/wk",
    "Holidays d/yr",
    "Reduction Factor 1",
    "Operation Factor 1",
    "Reduction Factor 2",
    "Operation Factor 2",
    "Reduction Factor 3",
    "Operation Factor 3",
];

static PHPP_10: TemplateSchema = TemplateSchema {
    version: TemplateVersion::Phpp10,
    variants: SheetLayout {
        sheet: "Variants",
        header_row: 7,
        columns: "C:K",
        row_limit: None,
    },
    main_row_offset: 9,
    main_duplicate_header_row: 9,
    // Two selector columns sit side by side at position 2; the second one
    // shifts into that position once the first is removed.
    selector_columns: [2, 2],
    climate: ClimateLayout {
        table: SheetLayout {
            sheet: "Climate",
            header_row: 22,
            columns: "C:P",
            row_limit: Some(10),
        },
        units_column: 0,
        label_column: 1,
        first_month_column: 2,
    },
    vent: VentLayout {
        table: SheetLayout {
            sheet: "Addl vent",
            header_row: 52,
            columns: "D:V",
            row_limit: None,
        },
        sentinel_column: "D",
        sentinel: END_OF_ROOMS_MARKER,
        fallback_rows: 33,
        column_labels: ROOM_COLUMNS,
    },
    rows: MainRows {
        final_energy_heating: RowSpan::new(26, 31),
        final_energy_cooling: RowSpan::new(34, 37),
        final_energy_dhw: RowSpan::new(38, 43),

        building_data: RowSpan::new(278, 286),
        tfa: 278,
        net_volume: 280,
        exterior_surface: 281,
        window_areas: RowSpan::new(282, 286),

        r_values: RowSpan::new(289, 298),
        envelope: RowSpan::new(289, 301),
        q50: 301,
        systems: RowSpan::new(304, 312),
        duct_length: 308,
        duct_insulation: 309,

        cert_limits: RowSpan::new(317, 325),
        cert_heating_demand: 317,
        cert_cooling_demand_total: 318,
        cert_cooling_demand: 320,
        cert_heating_load: 321,
        cert_cooling_load: 322,
        cert_primary_energy_renewable: 324,
        cert_source_energy: 325,

        heating_losses: RowSpan::new(328, 342),
        heating_gains: RowSpan::new(343, 349),
        cooling_losses: RowSpan::new(350, 364),
        cooling_gains: RowSpan::new(365, 371),

        site_energy: RowSpan::new(374, 389),
        site_energy_consumption: RowSpan::new(374, 388),
        source_energy: RowSpan::new(391, 405),
        solar_pv: 406,
        primary_energy_renewable: RowSpan::new(408, 423),
        primary_energy_renewable_consumption: RowSpan::new(408, 422),

        heating_demand_phius: 425,
        heating_demand: 426,
        cooling_demand: 428,
        heating_load: 429,
        cooling_load: 430,

        airtightness: RowSpan::new(436, 442),
        surfaces: RowSpan::new(446, 457),
        certification: 459,
        peak_loads: RowSpan::new(463, 465),
        co2e_precomputed: RowSpan::new(467, 472),
    },
};
