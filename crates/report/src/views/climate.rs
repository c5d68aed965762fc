//! Monthly climate rows in customary units.

use super::single;
use crate::registry::ReportContext;
use crate::units::Rebase;
use crate::view::ReportView;
use phpp_core::{NormalizedDataset, PhppError, PhppResult};
use phpp_sheet::Table;

const RADIATION: [(&str, &str); 5] = [
    ("Radiation North", "North"),
    ("Radiation East", "East"),
    ("Radiation South", "South"),
    ("Radiation West", "West"),
    ("Horizontal radiation", "Horizontal"),
];

const TEMPERATURES: [&str; 3] = [
    "Exterior temperature",
    "Dew point temperature",
    "Sky temperature",
];

/// Climate rows found by label, converted, and optionally renamed.
fn converted(
    climate: &Table,
    rows: impl IntoIterator<Item = (&'static str, Option<&'static str>)>,
    rebase: Rebase,
) -> PhppResult<Table> {
    let out = rows
        .into_iter()
        .map(|(label, rename)| {
            climate
                .find_by_label(0, label)
                .map(|row| rebase.row(row, rename))
                .ok_or_else(|| PhppError::structural(format!("climate table has no '{label}' row")))
        })
        .collect::<PhppResult<Vec<_>>>()?;
    Ok(Table::from_rows(climate.columns().to_vec(), out)?)
}

/// Monthly solar radiation per orientation in kWh/ft².
pub fn radiation(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let table = converted(
        dataset.climate(),
        RADIATION.iter().map(|&(label, name)| (label, Some(name))),
        Rebase::PerArea,
    )?;
    single("climate_radiation", table)
}

/// Monthly exterior, dew point and sky temperatures in °F.
pub fn temperatures(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let table = converted(
        dataset.climate(),
        TEMPERATURES.iter().map(|&label| (label, None)),
        Rebase::Temperature,
    )?;
    single("climate_temps", table)
}
