//! # phpp-report
//!
//! Report half of the PHPP pipeline: turns a [`NormalizedDataset`] into the
//! set of CSV report files.
//!
//! ```no_run
//! use phpp_core::{load_dataset, FactorCache, ReportConfig, TemplateVersion};
//! use phpp_report::build_report;
//! use phpp_sheet::Workbook;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut workbook = Workbook::open("project.xlsx")?;
//! let dataset = load_dataset(&mut workbook, TemplateVersion::Phpp10.schema())?;
//! let factors = FactorCache::new("data/co2e_region_factors.json").region("CAMX")?;
//! for file in build_report(&dataset, &ReportConfig::default(), &factors)? {
//!     println!("{}", file.file_name());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`NormalizedDataset`]: phpp_core::NormalizedDataset

/// Report assembly.
pub mod assembler;
/// Fuel categorisation and CO2e rollup.
pub mod fuel;
/// Named views.
pub mod registry;
pub mod scaling;
pub mod slice;
/// SI to customary unit conversion.
pub mod units;
pub mod view;
pub mod views;

pub use assembler::{build_report, ReportAssembler};
pub use fuel::{categorized_end_uses, co2e_rollup, fuel_for, Category, Co2eRollup, EndUse};
pub use registry::{ReportContext, ViewFn, ViewRegistry};
pub use units::Rebase;
pub use view::{sanitize_file_name, ReportFile, ReportView};
