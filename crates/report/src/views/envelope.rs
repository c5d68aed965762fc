//! Airtightness and envelope assemblies.
//!
//! Surface rows carry `<group>-<value>` strings in their variant cells and
//! template-decorated assembly names such as `01ud-Exterior_Wall`. They are
//! split into a group number, an exposure class and a clean name.

use super::single;
use crate::registry::ReportContext;
use crate::slice::non_blank_block;
use crate::view::ReportView;
use once_cell::sync::Lazy;
use phpp_core::{NormalizedDataset, PhppResult, DATATYPE, ID_COLUMNS, UNITS};
use phpp_sheet::{CellValue, Row, Table};
use regex::Regex;
use std::collections::HashSet;

const GROUP_NUM: &str = "GroupNum";
const EXPOSURE: &str = "Exposure";

/// Thermal bridge groups treated as exposure class B
const EXPOSURE_B_GROUPS: [i64; 3] = [9, 11, 17];

static USER_DEFINED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\d+UD-").expect("literal pattern"));

/// Airtightness rows.
pub fn airflow(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let span = dataset.schema().rows.airtightness;
    single(
        "envelope_airflow",
        dataset.main().rows_between(span.first, span.last),
    )
}

/// Group number: the text before the first `-` of the last column.
fn group_number(cell: &CellValue) -> CellValue {
    match cell.text() {
        Some(s) => CellValue::from(s.split('-').next().unwrap_or_default()),
        None => CellValue::Null,
    }
}

fn exposure(group: &CellValue) -> CellValue {
    match group.text().and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(g) if EXPOSURE_B_GROUPS.contains(&g) => CellValue::from("B"),
        Some(_) => CellValue::from("A"),
        None => CellValue::Null,
    }
}

/// Clean surface name: the part after `_-_`, upper-cased, with any
/// `<digits>UD-` prefix dropped and underscores as spaces.
fn surface_name(cell: &CellValue) -> CellValue {
    let Some(raw) = cell.text() else {
        return cell.clone();
    };
    let name = match raw.split("_-_").nth(1) {
        Some(part) => part.replace('_', " "),
        None => raw.to_string(),
    }
    .to_uppercase();
    match USER_DEFINED_PREFIX.find(&name) {
        Some(m) => CellValue::from(name[m.end()..].replace('_', " ")),
        None => CellValue::from(name),
    }
}

/// The value half of a `<group>-<value>` cell.
fn surface_value(cell: &CellValue) -> CellValue {
    match cell.text().and_then(|s| s.split('-').nth(1)) {
        Some(value) => CellValue::from(value),
        None => cell.clone(),
    }
}

fn assembly_name(cell: &CellValue) -> CellValue {
    match cell.text() {
        Some(s) => CellValue::from(s.to_uppercase().replace('_', " ")),
        None => cell.clone(),
    }
}

/// Complete surface rows, reshaped with group and exposure columns.
fn surfaces(dataset: &NormalizedDataset) -> PhppResult<Table> {
    let span = dataset.schema().rows.surfaces;
    let main = dataset.main();

    let mut columns = vec![
        DATATYPE.to_string(),
        UNITS.to_string(),
        GROUP_NUM.to_string(),
        EXPOSURE.to_string(),
    ];
    columns.extend(dataset.variant_names().iter().cloned());

    let mut table = Table::new(columns);
    for row in main.rows_between(span.first, span.last).rows() {
        if row.has_blank() {
            continue;
        }
        let group = row.cells.last().map_or(CellValue::Null, group_number);
        let class = exposure(&group);
        let mut cells = vec![surface_name(&row.cells[0]), row.cells[1].clone(), group, class];
        cells.extend(row.cells.iter().skip(ID_COLUMNS).map(surface_value));
        table.push(Row {
            number: row.number,
            cells,
        })?;
    }
    Ok(table)
}

/// Envelope surfaces with group number and exposure class.
pub fn surface_r_values(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    single("envelope_rValues", surfaces(dataset)?)
}

/// R-values of the assemblies the surfaces actually use.
pub fn assembly_r_values(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let surfaces = surfaces(dataset)?;
    let used: HashSet<String> = surfaces
        .column_values(0)
        .filter_map(|c| c.text().map(str::to_uppercase))
        .collect();

    let span = dataset.schema().rows.r_values;
    let assemblies = non_blank_block(dataset.main(), span)
        .filter_rows(|row| !row.has_blank())
        .map_rows(|row| {
            let mut cells = row.cells.clone();
            cells[0] = assembly_name(&row.cells[0]);
            Row {
                number: row.number,
                cells,
            }
        })?
        .filter_rows(|row| row.cells[0].text().is_some_and(|name| used.contains(name)));

    single("envelope_srfcValues", assemblies)
}
