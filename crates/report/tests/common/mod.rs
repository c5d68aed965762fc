//! A small normalised dataset with two variants, `A` (100 m²) and `B` (120 m²).
#![allow(dead_code)]

use phpp_core::reader::{Detection, RoomCount};
use phpp_core::{
    NormalizedDataset, RegionFactorTable, RegionFactors, TemplateVersion, DATATYPE, MONTHS, UNITS,
};
use phpp_sheet::{CellValue, Row, Table};

pub const VARIANTS: [&str; 2] = ["A", "B"];

/// Round factors so expected tons are easy to compute by hand.
pub const FACTORS: &str = r#"{
    "TEST": {
        "fuels": {
            "ELECTRIC": {"unit": "tons_co2_per_kWh", "value": 0.001},
            "NATURAL_GAS": {"unit": "tons_co2_per_kWh", "value": 0.002},
            "FUEL_OIL_NO2": {"unit": "tons_co2_per_kWh", "value": 0.003},
            "WOOD": {"unit": "tons_co2_per_kWh", "value": 0.0},
            "SOLAR_THERMAL": {"unit": "tons_co2_per_kWh", "value": 0.0}
        }
    }
}"#;

fn row(number: usize, label: &str, unit: &str, a: impl Into<CellValue>, b: impl Into<CellValue>) -> Row {
    Row::at(number, vec![label.into(), unit.into(), a.into(), b.into()])
}

fn blank(number: usize) -> Row {
    Row::at(number, vec![CellValue::Null; 4])
}

pub fn main_table() -> Table {
    let null = || CellValue::Null;
    let rows = vec![
        // Final energy, per m²
        row(26, "Natural gas / RE gas", "kWh/m2", 2.0, 1.0),
        blank(27),
        row(34, "Electricity cooling (HP)", "kWh/m2", 1.0, 0.5),
        row(38, "Electricity (heat pump)", "kWh/m2", 1.5, 2.0),
        // Building
        row(278, "Treated floor area", "m2", 100.0, 120.0),
        row(280, "Vn50", "m3", 250.0, 300.0),
        row(281, "Exterior surface area", "m2", 200.0, 240.0),
        row(282, "North windows", "m2", 5.0, 6.0),
        blank(283),
        row(284, "South windows", "m2", 10.0, 12.0),
        // Envelope
        row(289, "Generic_Exterior_Wall", "hr-ft2-F/Btu", 40.0, 45.0),
        row(290, "Roof", "hr-ft2-F/Btu", 60.0, 60.0),
        row(291, "Slab", "hr-ft2-F/Btu", 20.0, null()),
        row(292, "Floor", "hr-ft2-F/Btu", 30.0, 30.0),
        row(301, "Envelope q50", "m3/hm2", 0.6, 0.5),
        // Systems
        row(304, "Ventilation unit", "-", "ERV-1", "ERV-2"),
        row(308, "Duct length", "m", 2.0, 2.0),
        row(309, "Duct insulation", "mm", 25.4, 50.8),
        // Certification limits, per m²
        row(317, "Heating demand", "kWh/m2", 10.0, 10.0),
        row(318, "Cooling demand total", "kWh/m2", 12.0, 12.0),
        row(320, "Cooling demand", "kWh/m2", 5.0, 5.0),
        row(321, "Heating load", "W/m2", "-", 8.0),
        row(322, "Cooling load", "W/m2", 6.0, 6.0),
        row(324, "PER", "kWh/m2", 30.0, 30.0),
        row(325, "Source energy", "kWh/m2", 38.0, 38.0),
        // Detailed balances
        row(328, "Transmission losses", "kWh", 800.0, 700.0),
        row(343, "Solar gains", "kWh", 300.0, null()),
        row(350, "Cooling transmission", "kWh", 100.0, 90.0),
        row(365, "Cooling solar load", "kWh", 200.0, 180.0),
        // Site energy, annual; the first three repeat final energy × TFA
        row(374, "Heating", "kWh", 200.0, 120.0),
        row(375, "Cooling", "kWh", 100.0, 60.0),
        row(376, "DHW", "kWh", 150.0, 240.0),
        row(377, "Dishwashing", "kWh", 50.0, 60.0),
        row(378, "PHI Lighting", "kWh", 80.0, 90.0),
        row(389, "Solar PV", "kWh", -100.0, -100.0),
        // Source energy
        row(391, "Heating", "kWh", 400.0, 300.0),
        row(392, "MEL", "kWh", 600.0, null()),
        row(406, "Solar PV", "kWh", 100.0, 50.0),
        // Renewable primary energy
        row(408, "Heating", "kWh", 300.0, 250.0),
        row(409, "MEL", "kWh", 200.0, 200.0),
        // Demand and load, per m²
        row(425, "Heating demand Phius", "kWh/m2", 10.0, 20.0),
        row(426, "Heating demand", "kWh/m2", 11.0, 12.0),
        row(428, "Cooling demand", "kWh/m2", 4.0, 3.0),
        row(429, "Heating load", "W/m2", 7.0, 6.0),
        row(430, "Cooling load", "W/m2", 5.0, 4.0),
        // Airtightness
        row(436, "n50", "1/h", 0.6, 0.5),
        row(437, "Vn50", "m3", 250.0, 300.0),
        // Surfaces
        row(446, "North_-_01ud-Generic_Exterior_Wall", "m2", "11-40", "11-45"),
        row(447, "Roof_-_02ud-Roof", "m2", "3-60", "3-60"),
        row(448, "Unfinished", "m2", null(), null()),
        row(459, "Certification", "-", "Passed", "Failed"),
        row(463, "Peak heating load", "W", 3000.0, 2800.0),
        row(467, "CO2e heating", "kg/yr", 1000.0, 2000.0),
    ];
    Table::from_rows(vec![DATATYPE, UNITS, VARIANTS[0], VARIANTS[1]], rows).unwrap()
}

fn monthly(number: usize, label: &str, unit: &str, value: f64) -> Row {
    let mut cells = vec![CellValue::from(label), CellValue::from(unit)];
    cells.extend(MONTHS.iter().map(|_| CellValue::Float(value)));
    Row::at(number, cells)
}

pub fn climate_table() -> Table {
    let mut columns = vec![DATATYPE, UNITS];
    columns.extend(MONTHS);
    Table::from_rows(
        columns,
        vec![
            monthly(24, "Exterior temperature", "°C", 100.0),
            monthly(25, "Radiation North", "kWh/m2", 10.763_910_42),
            monthly(26, "Radiation East", "kWh/m2", 21.527_820_84),
            monthly(27, "Radiation South", "kWh/m2", 0.0),
            monthly(28, "Radiation West", "kWh/m2", 0.0),
            monthly(29, "Horizontal radiation", "kWh/m2", 0.0),
            monthly(30, "Dew point temperature", "°C", 0.0),
            monthly(31, "Sky temperature", "°C", -40.0),
        ],
    )
    .unwrap()
}

/// name, area, height, volume, supply, extract, transfer
fn room(number: usize, name: Option<&str>, geometry: [f64; 3], flows: [f64; 4]) -> Row {
    let [area, height, volume] = geometry;
    let [supply, extract, transfer, ach] = flows;
    let mut cells = vec![
        CellValue::Float(1.0),
        name.map_or(CellValue::Null, CellValue::from),
        CellValue::Float(1.0),
        area.into(),
        height.into(),
        volume.into(),
        supply.into(),
        extract.into(),
        transfer.into(),
        ach.into(),
        24.0.into(),
        7.0.into(),
        0.0.into(),
    ];
    // Reduction and operation factors for the three fan speeds
    for (reduction, operation) in [(1.0, 0.2), (0.5, 0.5), (0.25, 0.3)] {
        cells.push(CellValue::Float(reduction));
        cells.push(CellValue::Float(operation));
    }
    Row::at(number, cells)
}

pub fn vent_table() -> Table {
    let layout = TemplateVersion::Phpp10.schema().vent;
    Table::from_rows(
        layout.column_labels.to_vec(),
        vec![
            room(54, Some("Kitchen"), [20.0, 2.5, 50.0], [0.0, 60.0, 0.0, 1.2]),
            room(55, Some("Living"), [30.0, 2.5, 75.0], [80.0, 0.0, 0.0, 1.1]),
            room(56, None, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0]),
            room(57, Some("Bath"), [6.0, 2.4, 14.4], [0.0, 40.0, 0.0, 2.8]),
        ],
    )
    .unwrap()
}

pub fn dataset() -> NormalizedDataset {
    NormalizedDataset::from_tables(
        main_table(),
        climate_table(),
        vent_table(),
        RoomCount {
            rows: 4,
            detection: Detection::Sentinel { offset: 6 },
        },
        Vec::new(),
        TemplateVersion::Phpp10.schema(),
    )
    .unwrap()
}

pub fn factors() -> RegionFactors {
    RegionFactorTable::from_json_str(FACTORS)
        .unwrap()
        .region("TEST")
        .unwrap()
        .clone()
}

/// Numeric value of a cell, panicking with context when absent.
pub fn number(table: &Table, row: usize, column: &str) -> f64 {
    table
        .cell(row, column)
        .unwrap_or_else(|e| panic!("row {row} column {column}: {e}"))
        .number()
        .unwrap_or_else(|| panic!("row {row} column {column} is not a number"))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
