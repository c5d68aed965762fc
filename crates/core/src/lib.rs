//! # phpp-core
//!
//! Extraction half of the PHPP report pipeline.
//!
//! This crate provides:
//! - The versioned template layout contract
//! - Workbook region reading and main table normalisation
//! - Derived attributes (TFA, variant names, certification limits)
//! - CO2e reference factors and their process-wide cache
//! - Error types and per-request configuration

/// Per-request configuration.
pub mod config;
/// The normalised dataset.
pub mod dataset;
/// TFA, variant names and certification limits.
pub mod derived;
/// Error types and result aliases.
pub mod error;
/// CO2e emission factors.
pub mod factors;
/// Main table normalisation.
pub mod normalize;
/// Workbook region extraction.
pub mod reader;
/// Template layout contracts.
pub mod schema;

pub use config::{Co2eMethod, ReportConfig};
pub use dataset::{load_dataset, NormalizedDataset, MONTHS};
pub use derived::{scale_by_area, scale_cell, scale_row, strip_per_area, VariantValues};
pub use error::{Diagnostic, PhppError, PhppResult};
pub use factors::{FactorCache, FactorUnit, FuelType, RegionFactorTable, RegionFactors};
pub use normalize::{DATATYPE, ID_COLUMNS, UNITS};
pub use schema::{RowSpan, TemplateSchema, TemplateVersion};

/// Extensions accepted at the upload boundary.
const SUPPORTED_UPLOAD_EXTENSIONS: [&str; 1] = ["xlsx"];

/// True when `file_name` carries an extension the reader accepts.
#[must_use]
pub fn is_supported_upload(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_UPLOAD_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
}
