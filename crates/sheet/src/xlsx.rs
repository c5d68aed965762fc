use crate::a1_notation::ColumnSpan;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::table::{Row, Table};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

/// A fixed rectangular region of a worksheet: a header row and the rows
/// beneath it, over an inclusive column span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// 0-based worksheet row holding the column labels
    pub header_row: usize,
    /// Columns to read
    pub columns: ColumnSpan,
    /// Number of data rows; `None` reads to the end of the used range
    pub row_limit: Option<usize>,
}

impl Window {
    /// 1-based worksheet row number of the first data row
    #[must_use]
    pub fn first_data_row_number(&self) -> usize {
        self.header_row + 2
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Label a header cell the way dataframe readers do: blank headers become
/// `Unnamed: <n>` and repeated labels get a `.1`, `.2`, ... suffix.
fn header_labels(cells: &[CellValue]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = if cell.is_blank() {
                format!("Unnamed: {i}")
            } else {
                cell.as_str().trim().to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let label = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            label
        })
        .collect()
}

/// A worksheet's used range, addressed with absolute 0-based coordinates
pub struct SheetRange {
    range: Range<Data>,
}

impl SheetRange {
    /// Cell at an absolute position; positions outside the used range are null
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> CellValue {
        self.range
            .get_value((row as u32, col as u32))
            .map_or(CellValue::Null, data_to_cell_value)
    }

    /// Absolute index of the last used row, if the sheet has any cells
    #[must_use]
    pub fn last_row(&self) -> Option<usize> {
        self.range.end().map(|(r, _)| r as usize)
    }

    /// Read a window as a table. Rows are numbered 0, 1, 2, ... from the first
    /// row beneath the header.
    pub fn window(&self, window: &Window) -> Result<Table> {
        let header: Vec<CellValue> = window
            .columns
            .indices()
            .map(|c| self.cell(window.header_row, c))
            .collect();
        let mut table = Table::new(header_labels(&header));

        let first = window.header_row + 1;
        let end = match (window.row_limit, self.last_row()) {
            (Some(n), _) => first + n,
            (None, Some(last)) => (last + 1).max(first),
            (None, None) => first,
        };

        for (position, row) in (first..end).enumerate() {
            let cells: Vec<CellValue> = window.columns.indices().map(|c| self.cell(row, c)).collect();
            table.push(Row::at(position, cells))?;
        }

        debug!(
            header_row = window.header_row,
            rows = table.row_count(),
            cols = table.col_count(),
            "read worksheet window"
        );
        Ok(table)
    }

    /// Values of one column from the row beneath `header_row` to the end of the
    /// used range
    #[must_use]
    pub fn column_below(&self, header_row: usize, col: usize) -> Vec<CellValue> {
        let Some(last) = self.last_row() else {
            return Vec::new();
        };
        (header_row + 1..=last).map(|r| self.cell(r, col)).collect()
    }
}

/// An opened xlsx workbook
pub struct Workbook<RS: Read + Seek> {
    inner: Xlsx<RS>,
}

impl Workbook<BufReader<File>> {
    /// Open a workbook from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner: Xlsx<BufReader<File>> = open_workbook(path.as_ref())?;
        Ok(Workbook { inner })
    }
}

impl Workbook<Cursor<Vec<u8>>> {
    /// Open a workbook from an in-memory byte buffer (e.g. an uploaded file)
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl<RS: Read + Seek> Workbook<RS> {
    /// Open a workbook from any seekable reader
    pub fn from_reader(reader: RS) -> Result<Self> {
        let inner = Xlsx::new(reader)?;
        Ok(Workbook { inner })
    }

    /// Sheet names in workbook order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    /// Check whether a sheet exists
    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }

    /// Load the used range of a sheet
    pub fn sheet(&mut self, name: &str) -> Result<SheetRange> {
        if !self.has_sheet(name) {
            return Err(SheetError::SheetNotFound {
                name: name.to_string(),
            });
        }
        let range = self.inner.worksheet_range(name)?;
        Ok(SheetRange { range })
    }
}
