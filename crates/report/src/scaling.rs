//! Intensity to absolute scaling.
//!
//! Per-area rows become annual totals by multiplying each variant cell by that
//! variant's treated floor area. The per-area suffix leaves the unit label in
//! the same step.

use crate::slice::{pick_rows, with_limit_row};
use phpp_core::{scale_row, NormalizedDataset, PhppResult};
use phpp_sheet::Table;

/// Rows of the main table scaled from per-area to absolute values.
pub fn scale_rows(dataset: &NormalizedDataset, rows: &[usize]) -> PhppResult<Table> {
    let picked = pick_rows(dataset.main(), rows)?;
    let columns = picked.columns().to_vec();
    let scaled = picked
        .rows()
        .iter()
        .map(|row| scale_row(row, &columns, dataset.tfa()))
        .collect::<PhppResult<Vec<_>>>()?;
    Ok(Table::from_rows(columns, scaled)?)
}

/// [`scale_rows`] followed by an absolute certification limit row.
pub fn scale_rows_with_limit(
    dataset: &NormalizedDataset,
    rows: &[usize],
    limit: Option<usize>,
) -> PhppResult<Table> {
    let table = scale_rows(dataset, rows)?;
    match limit {
        Some(number) => with_limit_row(table, dataset.cert_limits(), number),
        None => Ok(table),
    }
}
