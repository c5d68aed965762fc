//! Per-variant heating and cooling demand broken into losses and gains.

use crate::registry::ReportContext;
use crate::slice::{non_blank_block, require_row};
use crate::view::{sanitize_file_name, ReportView};
use phpp_core::{NormalizedDataset, PhppResult, RowSpan, DATATYPE, ID_COLUMNS, UNITS};
use phpp_sheet::{CellValue, Row, Table};

const LOSSES: &str = "Losses";
const GAINS: &str = "Gains";

/// One balance per variant: losses and gains rows, then the limit.
struct Balance<'a> {
    file_prefix: &'a str,
    limit_label: &'a str,
    losses: RowSpan,
    gains: RowSpan,
    limit_row: usize,
}

fn value_or_zero(cell: &CellValue) -> CellValue {
    if cell.is_blank() {
        CellValue::Float(0.0)
    } else {
        cell.clone()
    }
}

fn balance_views(dataset: &NormalizedDataset, balance: &Balance<'_>) -> PhppResult<Vec<ReportView>> {
    let main = dataset.main();
    let losses = non_blank_block(main, balance.losses);
    let gains = non_blank_block(main, balance.gains);
    let limit = require_row(dataset.cert_limits(), balance.limit_row, "certification limits")?;
    let zero = CellValue::Float(0.0);

    dataset
        .variant_names()
        .iter()
        .enumerate()
        .map(|(i, variant)| {
            let col = ID_COLUMNS + i;
            let mut table = Table::new(vec![DATATYPE, UNITS, LOSSES, GAINS]);
            for row in losses.rows() {
                table.push(Row {
                    number: row.number,
                    cells: vec![
                        row.cells[0].clone(),
                        row.cells[1].clone(),
                        value_or_zero(&row.cells[col]),
                        zero.clone(),
                    ],
                })?;
            }
            for row in gains.rows() {
                table.push(Row {
                    number: row.number,
                    cells: vec![
                        row.cells[0].clone(),
                        row.cells[1].clone(),
                        zero.clone(),
                        value_or_zero(&row.cells[col]),
                    ],
                })?;
            }
            let limit_value = limit.cells[col].clone();
            table.push(Row::derived(vec![
                CellValue::from(balance.limit_label),
                CellValue::from("kWh"),
                limit_value.clone(),
                limit_value,
            ]))?;

            let name = sanitize_file_name(&format!("{}_{variant}", balance.file_prefix));
            ReportView::new(name, table)
        })
        .collect()
}

/// `heating_demand_<variant>` for every variant.
pub fn heating_demand(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    balance_views(
        dataset,
        &Balance {
            file_prefix: "heating_demand",
            limit_label: "Heating Demand Limit",
            losses: rows.heating_losses,
            gains: rows.heating_gains,
            limit_row: rows.cert_heating_demand,
        },
    )
}

/// `cooling_demand_<variant>` for every variant.
pub fn cooling_demand(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    balance_views(
        dataset,
        &Balance {
            file_prefix: "cooling_demand",
            limit_label: "Cooling Demand Limit",
            losses: rows.cooling_losses,
            gains: rows.cooling_gains,
            limit_row: rows.cert_cooling_demand_total,
        },
    )
}
