//! Room-by-room ventilation airflow.

use super::single;
use crate::registry::ReportContext;
use crate::slice::id_columns_and;
use crate::units::Rebase;
use crate::view::ReportView;
use phpp_core::{NormalizedDataset, PhppResult};
use phpp_sheet::{CellValue, Row, Table, SENTINEL_DASH};

const ROOM_NAME: &str = "Room name";
const TOTALS: &str = "Totals";

/// Supply, extract and transfer columns with their short labels
const FLOWS: [(&str, &str); 3] = [
    ("V_Supply", "V_Sup"),
    ("V_Extract", "V_Eta"),
    ("V_Transmission", "V_Trans"),
];

/// Fan speeds and the reduction factor column that scales each
const SPEEDS: [(&str, &str); 3] = [
    ("High", "Reduction Factor 1"),
    ("Med", "Reduction Factor 2"),
    ("Low", "Reduction Factor 3"),
];

/// One output row: a value per room.
struct Quantity {
    label: String,
    unit: &'static str,
    values: Vec<Option<f64>>,
    totalled: bool,
}

impl Quantity {
    fn into_row(self) -> Row {
        let total = if self.totalled {
            CellValue::Float(self.values.iter().flatten().sum())
        } else {
            CellValue::Null
        };
        let mut cells = vec![CellValue::from(self.label), CellValue::from(self.unit)];
        cells.extend(self.values.into_iter().map(|v| match v {
            Some(v) if v == 0.0 => CellValue::from(SENTINEL_DASH),
            Some(v) => CellValue::Float(v),
            None => CellValue::Null,
        }));
        cells.push(total);
        Row::derived(cells)
    }
}

/// Volume, area, height and every fan speed's flows per room, rooms sorted by
/// name, with a totals column.
pub fn room_airflows(
    dataset: &NormalizedDataset,
    _context: &ReportContext<'_>,
) -> PhppResult<Vec<ReportView>> {
    let vent = dataset.vent();
    let name_col = vent.column_index(ROOM_NAME)?;

    let mut rooms: Vec<&Row> = vent
        .rows()
        .iter()
        .filter(|row| !row.cells[name_col].is_blank())
        .collect();
    rooms.sort_by_key(|row| row.cells[name_col].as_str());

    let column = |label: &str| -> PhppResult<Vec<Option<f64>>> {
        let i = vent.column_index(label)?;
        Ok(rooms.iter().map(|row| row.cells[i].number()).collect())
    };
    let rebased = |rebase: Rebase, values: Vec<Option<f64>>| -> Vec<Option<f64>> {
        values.into_iter().map(|v| v.map(|v| rebase.apply(v))).collect()
    };

    let mut quantities = vec![
        Quantity {
            label: "Room Vol.".to_string(),
            unit: Rebase::Volume.unit(),
            values: rebased(Rebase::Volume, column("Room Vol.")?),
            totalled: true,
        },
        Quantity {
            label: "Room Area".to_string(),
            unit: Rebase::Area.unit(),
            values: rebased(Rebase::Area, column("Area")?),
            totalled: true,
        },
        Quantity {
            label: "Room Height".to_string(),
            unit: Rebase::Length.unit(),
            values: rebased(Rebase::Length, column("Clear height")?),
            totalled: false,
        },
    ];

    for (speed, factor_label) in SPEEDS {
        let factors = column(factor_label)?;
        for (flow_label, short) in FLOWS {
            let flows = column(flow_label)?
                .into_iter()
                .zip(&factors)
                .map(|(v, f)| Some(v? * (*f)?))
                .collect();
            quantities.push(Quantity {
                label: format!("{short}_{speed}"),
                unit: Rebase::Flow.unit(),
                values: rebased(Rebase::Flow, flows),
                totalled: true,
            });
        }
    }

    let mut names: Vec<String> = rooms
        .iter()
        .map(|row| row.cells[name_col].as_str())
        .collect();
    names.push(TOTALS.to_string());

    let table = Table::from_rows(
        id_columns_and(&names),
        quantities.into_iter().map(Quantity::into_row).collect(),
    )?;
    single("room_airflows", table)
}
