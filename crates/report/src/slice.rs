//! Row selection on dataset tables.

use phpp_core::{PhppError, PhppResult, RowSpan, DATATYPE, ID_COLUMNS, UNITS};
use phpp_sheet::{CellValue, Row, Table};

/// The row numbered `number`, or a structural error naming `table`.
pub fn require_row<'a>(source: &'a Table, number: usize, table: &str) -> PhppResult<&'a Row> {
    source
        .row(number)
        .map_err(|_| PhppError::structural(format!("{table} table has no row {number}")))
}

/// The listed rows, in the given order.
pub fn pick_rows(source: &Table, numbers: &[usize]) -> PhppResult<Table> {
    let rows = numbers
        .iter()
        .map(|&n| require_row(source, n, "main").cloned())
        .collect::<PhppResult<Vec<_>>>()?;
    Ok(Table::from_rows(source.columns().to_vec(), rows)?)
}

/// The rows of an inclusive span that are not entirely blank.
#[must_use]
pub fn non_blank_block(source: &Table, span: RowSpan) -> Table {
    source
        .rows_between(span.first, span.last)
        .filter_rows(|r| !r.is_blank())
}

/// Row `number` of `source` rearranged to `columns`, matching by label.
pub fn aligned_row(source: &Table, number: usize, columns: &[String]) -> PhppResult<Row> {
    let row = require_row(source, number, "certification limits")?;
    let cells = columns
        .iter()
        .map(|c| {
            let i = source.column_index(c).map_err(|_| {
                PhppError::structural(format!("row {number} has no '{c}' column"))
            })?;
            Ok(row.cells[i].clone())
        })
        .collect::<PhppResult<Vec<_>>>()?;
    Ok(Row {
        number: row.number,
        cells,
    })
}

/// Append row `number` of the certification limits to `table`.
pub fn with_limit_row(mut table: Table, limits: &Table, number: usize) -> PhppResult<Table> {
    let row = aligned_row(limits, number, &table.columns().to_vec())?;
    table.push(row)?;
    Ok(table)
}

/// A section heading: the label in `Datatype`, everything else blank.
#[must_use]
pub fn break_row(label: &str, width: usize) -> Row {
    let mut cells = vec![CellValue::Null; width];
    cells[0] = CellValue::from(label);
    Row::derived(cells)
}

/// A derived row with label, unit and one value per variant.
#[must_use]
pub fn labelled_row(label: &str, unit: &str, values: impl IntoIterator<Item = CellValue>) -> Row {
    let mut cells = vec![CellValue::from(label), CellValue::from(unit)];
    cells.extend(values);
    Row::derived(cells)
}

/// Sum of the numeric cells of every variant column, blanks ignored.
#[must_use]
pub fn variant_totals(block: &Table) -> Vec<f64> {
    (ID_COLUMNS..block.col_count())
        .map(|i| block.column_values(i).filter_map(CellValue::number).sum())
        .collect()
}

/// Column labels `Datatype`, `Units` followed by `names`.
#[must_use]
pub fn id_columns_and(names: &[String]) -> Vec<String> {
    let mut columns = vec![DATATYPE.to_string(), UNITS.to_string()];
    columns.extend(names.iter().cloned());
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_rows(
            vec![DATATYPE, UNITS, "A", "B"],
            vec![
                Row::at(1, vec!["x".into(), "kWh".into(), 1.0.into(), CellValue::Null]),
                Row::at(2, vec![CellValue::Null; 4]),
                Row::at(3, vec!["y".into(), "kWh".into(), 2.0.into(), 5.0.into()]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_pick_rows_keeps_order_and_fails_loudly() {
        let picked = pick_rows(&table(), &[3, 1]).unwrap();
        assert_eq!(picked.rows()[0].number, Some(3));
        assert!(matches!(
            pick_rows(&table(), &[4]),
            Err(PhppError::StructuralMismatch(_))
        ));
    }

    #[test]
    fn test_block_and_totals() {
        let block = non_blank_block(&table(), RowSpan::new(1, 3));
        assert_eq!(block.row_count(), 2);
        assert_eq!(variant_totals(&block), vec![3.0, 5.0]);
    }

    #[test]
    fn test_aligned_row_matches_labels() {
        let columns = vec![DATATYPE.to_string(), UNITS.to_string(), "B".to_string(), "A".to_string()];
        let row = aligned_row(&table(), 3, &columns).unwrap();
        assert_eq!(row.cells[2], CellValue::Float(5.0));
        assert_eq!(row.cells[3], CellValue::Float(2.0));
    }
}
