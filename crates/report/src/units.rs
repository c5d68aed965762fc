//! Re-basing SI values to US customary units.

use phpp_core::ID_COLUMNS;
use phpp_sheet::{CellValue, Row};

/// ft² per m²
pub const FT2_PER_M2: f64 = 10.763_910_42;
/// ft³ per m³
pub const FT3_PER_M3: f64 = 35.314_666_72;
/// ft per m
pub const FT_PER_M: f64 = 3.280_839_895;
/// cfm per m³/h
pub const CFM_PER_M3H: f64 = 0.588_577_779;
/// cfm/ft² per m³/(h·m²)
pub const CFM_FT2_PER_M3H_M2: f64 = 0.054_680_665;
/// inches per mm
pub const IN_PER_MM: f64 = 0.039_370_079;

/// A conversion with the unit label it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebase {
    /// m² to ft²
    Area,
    /// m³ to ft³
    Volume,
    /// m to ft
    Length,
    /// mm to inches
    Thickness,
    /// m³/h to cfm
    Flow,
    /// Envelope leakage, m³/(h·m²) to cfm/ft²
    Leakage,
    /// Per m² to per ft² (kWh/m² to kWh/ft²)
    PerArea,
    /// °C to °F
    Temperature,
}

impl Rebase {
    /// Convert one value
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rebase::Area => value * FT2_PER_M2,
            Rebase::Volume => value * FT3_PER_M3,
            Rebase::Length => value * FT_PER_M,
            Rebase::Thickness => value * IN_PER_MM,
            Rebase::Flow => value * CFM_PER_M3H,
            Rebase::Leakage => value * CFM_FT2_PER_M3H_M2,
            Rebase::PerArea => value / FT2_PER_M2,
            Rebase::Temperature => value * (9.0 / 5.0) + 32.0,
        }
    }

    /// Unit label of converted values
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Rebase::Area => "ft2",
            Rebase::Volume => "ft3",
            Rebase::Length => "ft",
            Rebase::Thickness => "inches",
            Rebase::Flow => "cfm",
            Rebase::Leakage => "cfm/ft2",
            Rebase::PerArea => "kWh/ft2",
            Rebase::Temperature => "°F",
        }
    }

    /// Convert a numeric cell; text, blanks and `-` pass through
    #[must_use]
    pub fn cell(self, cell: &CellValue) -> CellValue {
        match cell.number() {
            Some(v) => CellValue::Float(self.apply(v)),
            None => cell.clone(),
        }
    }

    /// Convert every value cell of a `Datatype`, `Units`, values row and swap
    /// its unit label. `label` replaces the datatype when given.
    #[must_use]
    pub fn row(self, row: &Row, label: Option<&str>) -> Row {
        let mut cells = Vec::with_capacity(row.cells.len());
        cells.push(label.map_or_else(|| row.cells[0].clone(), CellValue::from));
        cells.push(CellValue::from(self.unit()));
        cells.extend(row.cells.iter().skip(ID_COLUMNS).map(|c| self.cell(c)));
        Row {
            number: row.number,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!((Rebase::Area.apply(1.0) - 10.763_910_42).abs() < 1e-12);
        assert!((Rebase::Volume.apply(2.0) - 70.629_333_44).abs() < 1e-9);
        assert_eq!(Rebase::Temperature.apply(100.0), 212.0);
        assert_eq!(Rebase::Temperature.apply(-40.0), -40.0);
        assert!((Rebase::PerArea.apply(10.763_910_42) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_swaps_unit_in_lockstep() {
        let row = Row::at(
            278,
            vec!["TFA".into(), "m2".into(), 100.0.into(), "-".into(), CellValue::Null],
        );
        let converted = Rebase::Area.row(&row, Some("Floor Area*"));
        assert_eq!(converted.number, Some(278));
        assert_eq!(converted.cells[0], CellValue::from("Floor Area*"));
        assert_eq!(converted.cells[1], CellValue::from("ft2"));
        assert!((converted.cells[2].number().unwrap() - 1076.391_042).abs() < 1e-9);
        assert_eq!(converted.cells[3], CellValue::from("-"));
        assert_eq!(converted.cells[4], CellValue::Null);
    }
}
