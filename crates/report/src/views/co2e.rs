//! Annual CO2e emissions against the configured limit.
//!
//! Two definitions exist and the request picks one: a rollup of energy end
//! uses through the region's fuel factors, or the template's own kg CO2e
//! block converted to tons.

use super::single;
use crate::fuel::{categorized_end_uses, co2e_rollup, Category};
use crate::registry::ReportContext;
use crate::slice::{id_columns_and, labelled_row, non_blank_block};
use crate::view::ReportView;
use indexmap::IndexMap;
use phpp_core::{Co2eMethod, NormalizedDataset, PhppResult};
use phpp_sheet::{CellValue, Row, Table};

const TONS_PER_YEAR: &str = "tons CO2/yr";
const LIMIT_LABEL: &str = "IPCC Limit";
const TONS_PER_KG: f64 = 0.001;

fn limit_row(dataset: &NormalizedDataset, context: &ReportContext<'_>) -> Row {
    labelled_row(
        LIMIT_LABEL,
        TONS_PER_YEAR,
        dataset
            .variant_names()
            .iter()
            .map(|_| CellValue::Float(context.config.co2e_limit_tons_yr)),
    )
}

/// Heating, cooling and DHW totals, then each miscellaneous electric use,
/// then the limit.
pub fn fuel_rollup(
    dataset: &NormalizedDataset,
    context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let variants = dataset.variant_names();
    let uses = categorized_end_uses(dataset)?;
    let rollup = co2e_rollup(&uses, variants, context.factors)?;

    let values = |tons: &IndexMap<String, f64>| {
        variants
            .iter()
            .map(|v| CellValue::Float(tons.get(v).copied().unwrap_or(0.0)))
            .collect::<Vec<_>>()
    };

    let mut table = Table::new(id_columns_and(variants));
    for category in [Category::SpaceHeating, Category::SpaceCooling, Category::Dhw] {
        if let Some(tons) = rollup.totals.get(&category) {
            table.push(labelled_row(category.label(), TONS_PER_YEAR, values(tons)))?;
        }
    }
    for (label, tons) in &rollup.mel {
        table.push(labelled_row(label, TONS_PER_YEAR, values(tons)))?;
    }
    table.push(limit_row(dataset, context))?;
    single("energy_TonsCO2", table)
}

/// The template's kg CO2e rows in tons, then the limit.
pub fn precomputed(
    dataset: &NormalizedDataset,
    context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    let block = non_blank_block(dataset.main(), rows.co2e_precomputed);
    let mut table = block.map_rows(|row| {
        let cells = row
            .cells
            .iter()
            .enumerate()
            .map(|(i, c)| match i {
                0 => c.clone(),
                1 => c
                    .text()
                    .map_or_else(|| c.clone(), |u| CellValue::from(u.replace("kg", "tons"))),
                _ => c
                    .number()
                    .map_or_else(|| c.clone(), |v| CellValue::Float(v * TONS_PER_KG)),
            })
            .collect();
        Row {
            number: row.number,
            cells,
        }
    })?;
    table.push(limit_row(dataset, context))?;
    single("energy_TonsCO2", table)
}

/// The CO2e view selected by the request's [`Co2eMethod`].
pub fn tons_co2(
    dataset: &NormalizedDataset,
    context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    match context.config.co2e_method {
        Co2eMethod::FuelRollup => fuel_rollup(dataset, context),
        Co2eMethod::Precomputed => precomputed(dataset, context),
    }
}
