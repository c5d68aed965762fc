//! Cleaning of the raw Variants window into the row-number indexed main table.

use crate::error::{PhppError, PhppResult};
use crate::schema::TemplateSchema;
use phpp_sheet::{CellValue, Table};
use tracing::debug;

/// Label of the first column of every dataset table.
pub const DATATYPE: &str = "Datatype";
/// Label of the second column of every dataset table.
pub const UNITS: &str = "Units";

/// Columns before the first variant column.
pub const ID_COLUMNS: usize = 2;

/// Variant columns need at least this many values to be kept.
const MIN_VARIANT_VALUES: usize = 2;

/// Trim a datatype label and replace commas (the CSV delimiter) with spaces.
#[must_use]
pub fn clean_label(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::String(s) => CellValue::String(s.trim().replace(',', " ")),
        other => other.clone(),
    }
}

/// True when the table already has the `Datatype`, `Units` leading columns.
#[must_use]
pub fn is_normalized(table: &Table) -> bool {
    let cols = table.columns();
    cols.len() >= ID_COLUMNS && cols[0] == DATATYPE && cols[1] == UNITS
}

fn drop_unused_variants(table: &Table) -> Table {
    let keep: Vec<bool> = (0..table.col_count())
        .map(|i| i < ID_COLUMNS || table.non_blank_count(i) >= MIN_VARIANT_VALUES)
        .collect();
    table.retain_column_indices(|i| keep[i])
}

fn finish(table: &Table) -> PhppResult<Table> {
    let table = drop_unused_variants(table);
    Ok(table.map_column(0, clean_label)?)
}

/// Normalise the raw main table.
///
/// Drops the active-variant selector columns, labels the identifier columns
/// `Datatype` and `Units`, renumbers rows to worksheet row numbers, removes
/// the duplicated header row, drops variant columns with fewer than two
/// values and cleans the datatype labels. Applying it to an already
/// normalised table returns that table unchanged.
pub fn normalize(raw: &Table, schema: &TemplateSchema) -> PhppResult<Table> {
    if is_normalized(raw) {
        return finish(raw);
    }

    if raw.col_count() < ID_COLUMNS + schema.selector_columns.len() {
        return Err(PhppError::structural(format!(
            "'{}' window has {} columns, expected at least {}",
            schema.variants.sheet,
            raw.col_count(),
            ID_COLUMNS + schema.selector_columns.len()
        )));
    }

    let mut table = raw.clone();
    for &position in &schema.selector_columns {
        table = table.without_column_at(position)?;
    }

    let table = table
        .with_column_name(1, UNITS)?
        .renumbered(schema.main_row_offset)
        .without_row(schema.main_duplicate_header_row)
        .with_column_name(0, DATATYPE)?;

    let table = finish(&table)?;
    debug!(
        rows = table.row_count(),
        variants = table.col_count() - ID_COLUMNS,
        "normalised main table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TemplateVersion;
    use phpp_sheet::Row;

    fn raw() -> Table {
        let n = CellValue::Null;
        Table::from_rows(
            vec!["Unnamed: 0", "Select active", "Active", "Unnamed: 3", "Base", "Better", "Unused"],
            vec![
                Row::at(0, vec![n.clone(), n.clone(), "1".into(), "2".into(), 3.0.into(), 4.0.into(), 5.0.into()]),
                Row::at(1, vec![" Heating, total ".into(), "kWh".into(), "x".into(), n.clone(), 1.0.into(), 2.0.into(), n.clone()]),
                Row::at(2, vec!["TFA".into(), "m2".into(), n.clone(), n.clone(), 100.0.into(), 120.0.into(), n.clone()]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_layout() {
        let schema = TemplateVersion::Phpp10.schema();
        let table = normalize(&raw(), schema).unwrap();

        assert_eq!(
            table.columns(),
            &["Datatype".to_string(), "Units".to_string(), "Base".to_string(), "Better".to_string()]
        );
        // Row 9 repeated the header and is gone; the rest line up with the sheet
        let numbers: Vec<_> = table.rows().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![Some(10), Some(11)]);
        assert_eq!(table.cell(10, DATATYPE).unwrap(), &CellValue::from("Heating  total"));
        assert_eq!(table.cell(11, "Better").unwrap(), &CellValue::Float(120.0));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let schema = TemplateVersion::Phpp10.schema();
        let once = normalize(&raw(), schema).unwrap();
        let twice = normalize(&once, schema).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_too_narrow_window() {
        let schema = TemplateVersion::Phpp10.schema();
        let narrow = Table::new(vec!["a", "b", "c"]);
        assert!(matches!(
            normalize(&narrow, schema),
            Err(PhppError::StructuralMismatch(_))
        ));
    }

    #[test]
    fn test_clean_label() {
        assert_eq!(clean_label(&"a,b ".into()), CellValue::from("a b"));
        assert_eq!(clean_label(&CellValue::Float(1.0)), CellValue::Float(1.0));
    }
}
