use crate::cell::CellValue;
use crate::error::{Result, SheetError};

/// One table row: its cells plus the worksheet row number it came from.
///
/// Rows synthesised during a transformation (totals, limits, section
/// breaks) carry no row number.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub number: Option<usize>,
    pub cells: Vec<CellValue>,
}

impl Row {
    /// A row read from the worksheet at `number`
    #[must_use]
    pub fn at(number: usize, cells: Vec<CellValue>) -> Self {
        Row {
            number: Some(number),
            cells,
        }
    }

    /// A derived row with no worksheet origin
    #[must_use]
    pub fn derived(cells: Vec<CellValue>) -> Self {
        Row {
            number: None,
            cells,
        }
    }

    /// True when every cell is blank
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_blank)
    }

    /// True when any cell is blank
    #[must_use]
    pub fn has_blank(&self) -> bool {
        self.cells.iter().any(CellValue::is_blank)
    }
}

/// A 2-D table with labelled columns whose rows remember their worksheet row
/// number (non-sequential and gap-bearing once sliced).
///
/// All transformations return a new table; the receiver is never mutated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given column labels
    #[must_use]
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Table {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from labels and rows, checking every row's width
    pub fn from_rows<S: Into<String>>(columns: Vec<S>, rows: Vec<Row>) -> Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }

    /// Append a row
    pub fn push(&mut self, row: Row) -> Result<()> {
        if row.cells.len() != self.columns.len() {
            return Err(SheetError::LengthMismatch {
                expected: self.columns.len(),
                actual: row.cells.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append every row of `other`; both tables must have the same width
    pub fn extend(&mut self, other: &Table) -> Result<()> {
        for row in &other.rows {
            self.push(row.clone())?;
        }
        Ok(())
    }

    /// Column labels in order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by label
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| SheetError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Row with the given worksheet row number
    pub fn row(&self, number: usize) -> Result<&Row> {
        self.rows
            .iter()
            .find(|r| r.number == Some(number))
            .ok_or(SheetError::RowNotFound { row: number })
    }

    /// Cell at a worksheet row number and column label
    pub fn cell(&self, number: usize, column: &str) -> Result<&CellValue> {
        let col = self.column_index(column)?;
        Ok(&self.row(number)?.cells[col])
    }

    /// All values of the column at `index`, top to bottom
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |r| r.cells.get(index))
    }

    /// Count of non-blank cells in the column at `index`
    #[must_use]
    pub fn non_blank_count(&self, index: usize) -> usize {
        self.column_values(index).filter(|c| !c.is_blank()).count()
    }

    /// Rows whose number falls within `first..=last`, in table order
    #[must_use]
    pub fn rows_between(&self, first: usize, last: usize) -> Table {
        self.filter_rows(|r| r.number.is_some_and(|n| (first..=last).contains(&n)))
    }

    /// Keep the rows matching `predicate`
    #[must_use]
    pub fn filter_rows<F>(&self, predicate: F) -> Table
    where
        F: Fn(&Row) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    /// Drop the row with the given worksheet number (no-op when absent)
    #[must_use]
    pub fn without_row(&self, number: usize) -> Table {
        self.filter_rows(|r| r.number != Some(number))
    }

    /// Renumber rows so the first row becomes `first` and the rest follow sequentially
    #[must_use]
    pub fn renumbered(&self, first: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .enumerate()
                .map(|(i, r)| Row::at(first + i, r.cells.clone()))
                .collect(),
        }
    }

    /// Remove the column at `index`
    pub fn without_column_at(&self, index: usize) -> Result<Table> {
        if index >= self.columns.len() {
            return Err(SheetError::ColumnNotFound {
                name: format!("#{index}"),
            });
        }
        Ok(self.retain_column_indices(|i| i != index))
    }

    /// Keep the columns whose index satisfies `keep`
    #[must_use]
    pub fn retain_column_indices<F>(&self, keep: F) -> Table
    where
        F: Fn(usize) -> bool,
    {
        let kept: Vec<usize> = (0..self.columns.len()).filter(|&i| keep(i)).collect();
        Table {
            columns: kept.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| Row {
                    number: r.number,
                    cells: kept.iter().map(|&i| r.cells[i].clone()).collect(),
                })
                .collect(),
        }
    }

    /// Rename the column at `index`
    pub fn with_column_name(&self, index: usize, name: &str) -> Result<Table> {
        if index >= self.columns.len() {
            return Err(SheetError::ColumnNotFound {
                name: format!("#{index}"),
            });
        }
        let mut table = self.clone();
        table.columns[index] = name.to_string();
        Ok(table)
    }

    /// Apply `f` to every cell in the column at `index`
    pub fn map_column<F>(&self, index: usize, f: F) -> Result<Table>
    where
        F: Fn(&CellValue) -> CellValue,
    {
        if index >= self.columns.len() {
            return Err(SheetError::ColumnNotFound {
                name: format!("#{index}"),
            });
        }
        let mut table = self.clone();
        for row in &mut table.rows {
            row.cells[index] = f(&row.cells[index]);
        }
        Ok(table)
    }

    /// Apply `f` to every row, producing a table with the same labels
    pub fn map_rows<F>(&self, f: F) -> Result<Table>
    where
        F: Fn(&Row) -> Row,
    {
        Table::from_rows(self.columns.clone(), self.rows.iter().map(f).collect())
    }

    /// Find the first row whose cell in column `index` holds `label`
    #[must_use]
    pub fn find_by_label(&self, index: usize, label: &str) -> Option<&Row> {
        self.rows
            .iter()
            .find(|r| r.cells.get(index).and_then(CellValue::text) == Some(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["Datatype", "Units", "A"],
            vec![
                Row::at(10, vec!["x".into(), "m2".into(), 1.0.into()]),
                Row::at(12, vec!["y".into(), "m2".into(), CellValue::Null]),
                Row::at(15, vec![CellValue::Null, CellValue::Null, CellValue::Null]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rows_between_keeps_numbers() {
        let t = sample().rows_between(11, 15);
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.rows()[0].number, Some(12));
        assert!(t.row(10).is_err());
    }

    #[test]
    fn test_push_checks_width() {
        let mut t = sample();
        let err = t.push(Row::derived(vec![CellValue::Null])).unwrap_err();
        assert!(matches!(err, SheetError::LengthMismatch { expected: 3, actual: 1 }));
    }

    #[test]
    fn test_column_operations() {
        let t = sample();
        let t2 = t.without_column_at(1).unwrap();
        assert_eq!(t2.columns(), &["Datatype".to_string(), "A".to_string()]);
        assert_eq!(t2.non_blank_count(1), 1);
        // The source table is untouched
        assert_eq!(t.col_count(), 3);

        let renamed = t.with_column_name(2, "Variant").unwrap();
        assert_eq!(renamed.cell(10, "Variant").unwrap(), &CellValue::Float(1.0));
    }

    #[test]
    fn test_renumbered_and_blank_rows() {
        let t = sample().renumbered(9);
        let numbers: Vec<_> = t.rows().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![Some(9), Some(10), Some(11)]);
        assert!(t.rows()[2].is_blank());
        assert!(t.rows()[1].has_blank());
        assert!(t.find_by_label(0, "y").is_some());
    }
}
