//! Basic building geometry in customary units.

use super::single;
use crate::registry::ReportContext;
use crate::slice::{labelled_row, non_blank_block, require_row};
use crate::units::Rebase;
use crate::view::ReportView;
use phpp_core::{NormalizedDataset, PhppResult, ID_COLUMNS};
use phpp_sheet::{CellValue, Row, Table};

/// Ratio unit label
const DIMENSIONLESS: &str = "-";

/// Per-variant `numerator / denominator`; blank where either side is not a
/// number or the denominator is zero.
fn ratio_row(label: &str, numerator: &Row, denominator: &Row) -> Row {
    let values = numerator
        .cells
        .iter()
        .zip(&denominator.cells)
        .skip(ID_COLUMNS)
        .map(|(n, d)| match (n.number(), d.number()) {
            (Some(n), Some(d)) if d != 0.0 => CellValue::Float(n / d),
            _ => CellValue::Null,
        });
    labelled_row(label, DIMENSIONLESS, values)
}

/// Floor area, net volume, exterior surface, their ratios and window area by
/// orientation.
pub fn building_data(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let rows = &dataset.schema().rows;
    let main = dataset.main();

    let floor = Rebase::Area.row(require_row(main, rows.tfa, "main")?, Some("Floor Area*"));
    let volume = Rebase::Volume.row(
        require_row(main, rows.net_volume, "main")?,
        Some("Interior Net Volume"),
    );
    let surface = Rebase::Area.row(require_row(main, rows.exterior_surface, "main")?, None);

    let surface_ratio = ratio_row("Ext. Surface Area / Floor Area Ratio", &surface, &floor);
    let volume_ratio = ratio_row("Floor Area / Volume Ratio", &floor, &volume);

    let mut out = vec![floor, volume, surface, surface_ratio, volume_ratio];
    out.extend(
        non_blank_block(main, rows.window_areas)
            .rows()
            .iter()
            .map(|row| Rebase::Area.row(row, None)),
    );

    single("bldg_data", Table::from_rows(main.columns().to_vec(), out)?)
}
