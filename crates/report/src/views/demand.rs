//! Annual heating and cooling demand and peak loads against their limits.

use super::single;
use crate::registry::ReportContext;
use crate::scaling::scale_rows_with_limit;
use crate::view::ReportView;
use phpp_core::{NormalizedDataset, PhppResult};

/// Heating and cooling demand together, with the heating demand limit.
pub fn heat_and_cool(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    single(
        "demand_HeatAndCool",
        scale_rows_with_limit(
            dataset,
            &[rows.heating_demand, rows.cooling_demand],
            Some(rows.cert_heating_demand),
        )?,
    )
}

pub fn phius_heating_demand(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    single(
        "demand_Phius_heating",
        scale_rows_with_limit(dataset, &[rows.heating_demand_phius], Some(rows.cert_heating_demand))?,
    )
}

pub fn phius_cooling_demand(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    single(
        "demand_Phius_cooling",
        scale_rows_with_limit(dataset, &[rows.cooling_demand], Some(rows.cert_cooling_demand))?,
    )
}

pub fn phius_heating_load(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    single(
        "load_Phius_heating",
        scale_rows_with_limit(dataset, &[rows.heating_load], Some(rows.cert_heating_load))?,
    )
}

pub fn phius_cooling_load(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    single(
        "load_Phius_cooling",
        scale_rows_with_limit(dataset, &[rows.cooling_load], Some(rows.cert_cooling_load))?,
    )
}
