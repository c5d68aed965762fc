//! Source, site and renewable primary energy.

use super::single;
use crate::registry::ReportContext;
use crate::slice::{non_blank_block, require_row, with_limit_row};
use crate::view::ReportView;
use phpp_core::{NormalizedDataset, PhppResult, ID_COLUMNS};
use phpp_sheet::{CellValue, Row, Table};
use tracing::debug;

/// Source energy credited per kWh of PV yield
const PV_SOURCE_FACTOR: f64 = 1.8;

/// Coerce every variant cell to a number, blanks and text to zero.
fn numeric_values(block: &Table) -> PhppResult<Table> {
    Ok(block.map_rows(|row| Row {
        number: row.number,
        cells: row
            .cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i < ID_COLUMNS {
                    c.clone()
                } else {
                    CellValue::Float(c.number().unwrap_or(0.0))
                }
            })
            .collect(),
    })?)
}

/// Reduce each end use by its share of the variant total times the source
/// energy of the variant's PV yield.
fn credit_solar(block: &Table, solar: &Row) -> PhppResult<Table> {
    let totals: Vec<f64> = (ID_COLUMNS..block.col_count())
        .map(|i| block.column_values(i).filter_map(CellValue::number).sum())
        .collect();
    let credits: Vec<f64> = (ID_COLUMNS..block.col_count())
        .map(|i| solar.cells[i].number().unwrap_or(0.0) * PV_SOURCE_FACTOR)
        .collect();

    Ok(block.map_rows(|row| {
        let mut cells = row.cells.clone();
        for (k, cell) in cells.iter_mut().enumerate().skip(ID_COLUMNS) {
            let j = k - ID_COLUMNS;
            let value = cell.number().unwrap_or(0.0);
            let share = if totals[j] == 0.0 { 0.0 } else { value / totals[j] };
            *cell = CellValue::Float(value - share * credits[j]);
        }
        Row {
            number: row.number,
            cells,
        }
    })?)
}

/// Phius net source energy by end use with the source energy limit.
///
/// The PV credit is applied only when the request enables it.
pub fn net_source_energy(
    dataset: &NormalizedDataset,
    context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    let block = numeric_values(&non_blank_block(dataset.main(), rows.source_energy))?;
    let block = if context.config.solar_credit {
        let solar = require_row(dataset.main(), rows.solar_pv, "main")?;
        debug!("crediting PV yield against source energy");
        credit_solar(&block, solar)?
    } else {
        block
    };
    single(
        "Phius_net_source_energy",
        with_limit_row(block, dataset.cert_limits(), rows.cert_source_energy)?,
    )
}

/// Site energy by end use, PV yield last.
pub fn site_energy(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    single("energy_Site", non_blank_block(dataset.main(), rows.site_energy))
}

/// Renewable primary energy by end use with the PER limit.
pub fn primary_energy_renewable(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    let block = non_blank_block(dataset.main(), rows.primary_energy_renewable);
    single(
        "energy_PER",
        with_limit_row(block, dataset.cert_limits(), rows.cert_primary_energy_renewable)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpp_core::{DATATYPE, UNITS};

    #[test]
    fn test_credit_solar_by_share() {
        let block = Table::from_rows(
            vec![DATATYPE, UNITS, "A"],
            vec![
                Row::at(391, vec!["Heating".into(), "kWh".into(), 300.0.into()]),
                Row::at(392, vec!["MEL".into(), "kWh".into(), 700.0.into()]),
            ],
        )
        .unwrap();
        let solar = Row::at(406, vec!["Solar PV".into(), "kWh".into(), 100.0.into()]);

        let credited = credit_solar(&block, &solar).unwrap();
        // 180 kWh of source energy shared 30/70
        assert!((credited.cell(391, "A").unwrap().number().unwrap() - 246.0).abs() < 1e-9);
        assert!((credited.cell(392, "A").unwrap().number().unwrap() - 574.0).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_values_fills_blanks() {
        let block = Table::from_rows(
            vec![DATATYPE, UNITS, "A"],
            vec![Row::at(391, vec!["Heating".into(), CellValue::Null, CellValue::Null])],
        )
        .unwrap();
        let filled = numeric_values(&block).unwrap();
        assert_eq!(filled.cell(391, "A").unwrap(), &CellValue::Float(0.0));
        assert_eq!(filled.cell(391, UNITS).unwrap(), &CellValue::Null);
    }
}
