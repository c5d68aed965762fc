//! Tabular building blocks for phpp-report
//!
//! Provides the cell value type, a row-number indexed [`Table`], column-letter
//! parsing, calamine-backed reads of fixed worksheet windows, and CSV output.
//!
//! # Examples
//!
//! ```
//! use phpp_sheet::{CellValue, Row, Table};
//!
//! let table = Table::from_rows(
//!     vec!["Datatype", "Units", "Base"],
//!     vec![Row::at(278, vec!["TFA".into(), "m2".into(), 120.0.into()])],
//! )
//! .unwrap();
//!
//! assert_eq!(table.cell(278, "Base").unwrap(), &CellValue::Float(120.0));
//! assert_eq!(table.to_csv_string().unwrap(), "Datatype,Units,Base\nTFA,m2,120.0\n");
//! ```

mod a1_notation;
mod cell;
mod csv;
mod error;
mod table;
mod xlsx;

/// Re-export column letter helpers.
pub use a1_notation::{parse_column_letters, ColumnSpan};
/// Re-export cell value type.
pub use cell::{CellValue, SENTINEL_DASH};
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export table types.
pub use table::{Row, Table};
/// Re-export workbook types.
pub use xlsx::{SheetRange, Window, Workbook};
