//! The variant comparison table: envelope, systems and key results.

use super::single;
use crate::registry::ReportContext;
use crate::slice::{break_row, labelled_row, require_row, variant_totals};
use crate::units::Rebase;
use crate::view::ReportView;
use phpp_core::{scale_cell, NormalizedDataset, PhppResult, ReportConfig, ID_COLUMNS};
use phpp_sheet::{CellValue, Row, Table};

const KWH_PER_YEAR: &str = "kWh/yr";

/// Assembly label as shown in the table: underscores become spaces and the
/// `Generic ` prefix goes.
fn assembly_label(cell: &CellValue) -> CellValue {
    match cell.text() {
        Some(s) => CellValue::from(s.replace('_', " ").replace("Generic ", "")),
        None => cell.clone(),
    }
}

fn envelope_rows(dataset: &NormalizedDataset, config: &ReportConfig) -> Vec<Row> {
    let rows = &dataset.schema().rows;
    dataset
        .main()
        .rows_between(rows.envelope.first, rows.envelope.last)
        .rows()
        .iter()
        .filter_map(|row| {
            let mut cells = row.cells.clone();
            cells[0] = assembly_label(&row.cells[0]);
            if cells[0].text().is_some_and(|name| config.is_omitted(name)) {
                return None;
            }
            let mut row = Row {
                number: row.number,
                cells,
            };
            if row.number == Some(rows.q50) {
                row = Rebase::Leakage.row(&row, Some("Envelope Air Leakage Rate (q50)"));
            }
            (!row.has_blank()).then_some(row)
        })
        .collect()
}

fn system_rows(dataset: &NormalizedDataset) -> Vec<Row> {
    let rows = &dataset.schema().rows;
    dataset
        .main()
        .rows_between(rows.systems.first, rows.systems.last)
        .rows()
        .iter()
        .map(|row| match row.number {
            Some(n) if n == rows.duct_length => {
                Rebase::Length.row(row, Some("Cold Air Duct Length (ea)"))
            }
            Some(n) if n == rows.duct_insulation => {
                Rebase::Thickness.row(row, Some("Cold Air Duct Insulation Thickness"))
            }
            _ => row.clone(),
        })
        .collect()
}

fn total_row(dataset: &NormalizedDataset, label: &str, first: usize, last: usize) -> Row {
    let block = dataset.main().rows_between(first, last);
    labelled_row(
        label,
        KWH_PER_YEAR,
        variant_totals(&block).into_iter().map(CellValue::Float),
    )
}

/// The per-area demand at `number` scaled to an annual total by TFA.
fn annual_demand_row(dataset: &NormalizedDataset, label: &str, number: usize) -> PhppResult<Row> {
    let row = require_row(dataset.main(), number, "main")?;
    let columns = dataset.main().columns();
    let values = columns
        .iter()
        .zip(&row.cells)
        .skip(ID_COLUMNS)
        .map(|(variant, cell)| match dataset.tfa().get(variant) {
            Some(area) => scale_cell(cell, *area),
            None => CellValue::Null,
        });
    Ok(labelled_row(label, KWH_PER_YEAR, values))
}

fn result_rows(dataset: &NormalizedDataset) -> PhppResult<Vec<Row>> {
    let rows = &dataset.schema().rows;
    let main = dataset.main();
    let pe = rows.source_energy;
    let per = rows.primary_energy_renewable_consumption;
    let site = rows.site_energy_consumption;

    let mut out = vec![
        require_row(main, rows.certification, "main")?.clone(),
        total_row(dataset, "Total Primary Energy", pe.first, pe.last),
        total_row(dataset, "Total Primary Energy Renewable", per.first, per.last),
        total_row(dataset, "Total Site Energy", site.first, site.last),
        annual_demand_row(dataset, "Heat Demand", rows.heating_demand_phius)?,
        require_row(main, rows.heating_demand_phius, "main")?.clone(),
        annual_demand_row(dataset, "Cooling Demand", rows.cooling_demand)?,
        require_row(main, rows.cooling_demand, "main")?.clone(),
    ];
    out.extend(
        main.rows_between(rows.peak_loads.first, rows.peak_loads.last)
            .rows()
            .iter()
            .cloned(),
    );
    Ok(out)
}

/// ENVELOPE, SYSTEMS and RESULTS sections, one column per variant.
///
/// Omitted assemblies and incomplete envelope rows are left out; leakage,
/// duct length and duct insulation are shown in customary units.
pub fn variant_inputs(
    dataset: &NormalizedDataset,
    context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let columns = dataset.main().columns().to_vec();
    let width = columns.len();

    let mut rows = vec![break_row("ENVELOPE", width)];
    rows.extend(envelope_rows(dataset, context.config));
    rows.push(break_row("SYSTEMS", width));
    rows.extend(system_rows(dataset));
    rows.push(break_row("RESULTS", width));
    rows.extend(result_rows(dataset)?);

    single("variant_inputs", Table::from_rows(columns, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_label() {
        assert_eq!(
            assembly_label(&"Generic_Exterior_Wall".into()),
            CellValue::from("Exterior Wall")
        );
        assert_eq!(assembly_label(&CellValue::Null), CellValue::Null);
    }
}
