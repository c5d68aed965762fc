use phpp_core::{PhppError, PhppResult, DATATYPE, UNITS};
use phpp_sheet::Table;

/// One generated report table, before serialisation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub base_name: String,
    pub table: Table,
}

impl ReportView {
    /// Create a view, checking the leading `Datatype`, `Units` columns.
    pub fn new(base_name: impl Into<String>, table: Table) -> PhppResult<Self> {
        let base_name = base_name.into();
        let cols = table.columns();
        if cols.len() < 2 || cols[0] != DATATYPE || cols[1] != UNITS {
            return Err(PhppError::structural(format!(
                "view '{base_name}' must start with {DATATYPE},{UNITS} columns, found {cols:?}"
            )));
        }
        Ok(Self { base_name, table })
    }

    /// Serialise to CSV text
    pub fn to_file(&self) -> PhppResult<ReportFile> {
        Ok(ReportFile {
            base_name: self.base_name.clone(),
            csv: self.table.to_csv_string()?,
        })
    }
}

/// One output file: a base name and its CSV text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub base_name: String,
    pub csv: String,
}

impl ReportFile {
    /// `<base>.csv`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.base_name)
    }
}

/// Make a variant name safe to use as a file name.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}
