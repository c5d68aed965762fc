//! Runs every registered view over one dataset.

use crate::registry::{ReportContext, ViewRegistry};
use crate::view::ReportFile;
use phpp_core::{NormalizedDataset, PhppResult, RegionFactors, ReportConfig};
use tracing::{debug, info};

/// Produces the complete set of report files for a dataset.
///
/// Views run in registry order. The first failing view aborts the build;
/// no partial report is returned.
pub struct ReportAssembler {
    registry: ViewRegistry,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportAssembler {
    /// An assembler over the standard views
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ViewRegistry::standard())
    }

    #[must_use]
    pub fn with_registry(registry: ViewRegistry) -> Self {
        Self { registry }
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Generate and serialise every view.
    pub fn build(
        &self,
        dataset: &NormalizedDataset,
        config: &ReportConfig,
        factors: &RegionFactors,
    ) -> PhppResult<Vec<ReportFile>> {
        let context = ReportContext { config, factors };
        let mut files = Vec::new();
        for (name, view) in self.registry.iter() {
            let views = view(dataset, &context)?;
            debug!(view = name, tables = views.len(), "view generated");
            for v in views {
                files.push(v.to_file()?);
            }
        }
        info!(
            files = files.len(),
            variants = dataset.variant_names().len(),
            region = factors.region(),
            "report assembled"
        );
        Ok(files)
    }
}

/// Build the standard report.
pub fn build_report(
    dataset: &NormalizedDataset,
    config: &ReportConfig,
    factors: &RegionFactors,
) -> PhppResult<Vec<ReportFile>> {
    ReportAssembler::new().build(dataset, config, factors)
}
