//! Attributes computed from the normalised main table: treated floor area,
//! variant names and absolute certification limits.

use crate::error::{PhppError, PhppResult};
use crate::normalize::{DATATYPE, ID_COLUMNS, UNITS};
use crate::schema::TemplateSchema;
use indexmap::IndexMap;
use phpp_sheet::{CellValue, Row, Table};

/// One number per variant, keyed by variant column label in sheet order.
pub type VariantValues = IndexMap<String, f64>;

/// Per-area unit suffixes removed when a value is scaled to an absolute.
const PER_AREA_SUFFIXES: [&str; 2] = ["/m2", "/m²"];

/// Multiply a per-area intensity by a floor area.
///
/// Every intensity-to-absolute conversion in the crate goes through here so
/// the same inputs always give bit-identical outputs.
#[inline]
#[must_use]
pub fn scale_by_area(intensity: f64, area: f64) -> f64 {
    intensity * area
}

/// Scale a numeric cell by `area`; anything else passes through unchanged.
#[must_use]
pub fn scale_cell(cell: &CellValue, area: f64) -> CellValue {
    match cell.number() {
        Some(v) => CellValue::Float(scale_by_area(v, area)),
        None => cell.clone(),
    }
}

/// Remove the per-area suffix from a unit label (`kWh/m2` becomes `kWh`).
#[must_use]
pub fn strip_per_area(unit: &CellValue) -> CellValue {
    match unit {
        CellValue::String(s) => {
            let mut out = s.clone();
            for suffix in PER_AREA_SUFFIXES {
                out = out.replace(suffix, "");
            }
            CellValue::String(out)
        }
        other => other.clone(),
    }
}

/// Variant column labels in sheet order.
pub fn variant_names(main: &Table) -> PhppResult<Vec<String>> {
    let names: Vec<String> = main.columns().iter().skip(ID_COLUMNS).cloned().collect();
    if names.is_empty() {
        return Err(PhppError::structural("main table has no variant columns"));
    }
    Ok(names)
}

/// Treated floor area of every variant, read from the TFA row.
///
/// A variant whose TFA cell is not a number fails with
/// [`PhppError::StructuralMismatch`] instead of scaling its rows by NaN.
pub fn treated_floor_area(main: &Table, schema: &TemplateSchema) -> PhppResult<VariantValues> {
    let row = main
        .row(schema.rows.tfa)
        .map_err(|_| PhppError::structural(format!("main table has no TFA row {}", schema.rows.tfa)))?;

    variant_names(main)?
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let cell = &row.cells[ID_COLUMNS + i];
            let area = cell.number().ok_or_else(|| {
                PhppError::structural(format!(
                    "TFA of variant '{name}' is not a number (found '{cell}')"
                ))
            })?;
            Ok((name, area))
        })
        .collect()
}

/// Scale every variant cell of `row` by that variant's area, stripping the
/// per-area suffix from the unit label.
///
/// Cells are matched to areas by column label, never by position.
pub fn scale_row(row: &Row, columns: &[String], areas: &VariantValues) -> PhppResult<Row> {
    let cells = row
        .cells
        .iter()
        .zip(columns)
        .enumerate()
        .map(|(i, (cell, column))| {
            if i == 1 {
                return Ok(strip_per_area(cell));
            }
            if i < ID_COLUMNS {
                return Ok(cell.clone());
            }
            let area = areas.get(column).ok_or_else(|| {
                PhppError::structural(format!("no floor area for variant '{column}'"))
            })?;
            Ok(scale_cell(cell, *area))
        })
        .collect::<PhppResult<Vec<_>>>()?;
    Ok(Row {
        number: row.number,
        cells,
    })
}

/// Absolute certification limits: the per-area limit block with `-` read as
/// zero (EnerPHit and similar paths leave some limits blank), scaled by each
/// variant's floor area.
pub fn certification_limits(
    main: &Table,
    areas: &VariantValues,
    schema: &TemplateSchema,
) -> PhppResult<Table> {
    let span = schema.rows.cert_limits;
    let specific = main.rows_between(span.first, span.last);
    if specific.is_empty() {
        return Err(PhppError::structural(format!(
            "main table has no certification limit rows {}..={}",
            span.first, span.last
        )));
    }

    let columns = specific.columns().to_vec();
    let rows = specific
        .rows()
        .iter()
        .map(|row| {
            let zero_filled = Row {
                number: row.number,
                cells: row
                    .cells
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        if i >= ID_COLUMNS && c.is_sentinel() {
                            CellValue::Float(0.0)
                        } else {
                            c.clone()
                        }
                    })
                    .collect(),
            };
            scale_row(&zero_filled, &columns, areas)
        })
        .collect::<PhppResult<Vec<_>>>()?;

    debug_assert_eq!(columns[0], DATATYPE);
    debug_assert_eq!(columns[1], UNITS);
    Ok(Table::from_rows(columns, rows)?)
}
