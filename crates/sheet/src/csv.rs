use crate::cell::CellValue;
use crate::error::Result;
use crate::table::Table;
use std::io::Write;

/// CSV writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Text of one CSV field. Whole-number floats keep their `.0` so float
/// columns read the same as a dataframe export; integers stay bare.
fn csv_field(cell: &CellValue) -> String {
    match cell {
        CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
        other => other.as_str(),
    }
}

impl Table {
    /// Write the table as CSV: one header row of column labels, then the rows.
    ///
    /// Row numbers are not written.
    pub fn write_csv<W: Write>(&self, writer: W, options: &CsvOptions) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .from_writer(writer);

        csv_writer.write_record(self.columns())?;
        for row in self.rows() {
            let record: Vec<String> = row.cells.iter().map(csv_field).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Convert the table to a CSV string
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer, &CsvOptions::default())?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
