//! Error types for phpp-report.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for phpp-report operations.
pub type PhppResult<T> = Result<T, PhppError>;

/// Errors that abort a request.
#[derive(Debug, Error)]
pub enum PhppError {
    /// An expected sheet, row, column or header is absent from the workbook.
    #[error("Structural mismatch: {0}")]
    StructuralMismatch(String),

    /// A reference-data factor uses a unit tag with no known conversion.
    #[error("Unsupported unit '{unit}' for fuel {fuel} in region {region}")]
    UnsupportedUnit {
        region: String,
        fuel: String,
        unit: String,
    },

    /// An energy end-use label has no fuel entry.
    #[error("No fuel mapping for end-use '{label}'")]
    MissingFuelMapping { label: String },

    /// The dataset uses a fuel the region's factor table does not list.
    #[error("Region {region} has no CO2e factor for fuel {fuel}")]
    MissingFactor { region: String, fuel: String },

    /// The requested region is not in the reference data.
    #[error("Unknown CO2e region: {0}")]
    UnknownRegion(String),

    /// No report view is registered under this name.
    #[error("Unknown report view: {0}")]
    UnknownView(String),

    /// The reference-data file does not exist.
    #[error("CO2e factor file not found: {}", .0.display())]
    FactorFileNotFound(PathBuf),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Workbook or table error.
    #[error(transparent)]
    Sheet(#[from] phpp_sheet::SheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PhppError {
    /// Create a structural mismatch error.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::StructuralMismatch(message.into())
    }
}

/// Non-fatal conditions noticed while reading a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A dynamic size could not be detected; a fixed default was used instead.
    DegradedDetection {
        sheet: String,
        what: String,
        fallback: usize,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::DegradedDetection {
                sheet,
                what,
                fallback,
            } => write!(
                f,
                "could not detect {what} on sheet '{sheet}', using default of {fallback}"
            ),
        }
    }
}
