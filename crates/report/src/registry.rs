//! Named report views.

use crate::view::ReportView;
use crate::views;
use indexmap::IndexMap;
use phpp_core::{NormalizedDataset, PhppError, PhppResult, RegionFactors, ReportConfig};

/// Per-request inputs every view may read.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub config: &'a ReportConfig,
    pub factors: &'a RegionFactors,
}

/// A view generator: a pure function of the dataset and the request context.
pub type ViewFn = fn(&NormalizedDataset, &ReportContext<'_>) -> PhppResult<Vec<ReportView>>;

/// Registry of report views, kept in presentation order
pub struct ViewRegistry {
    views: IndexMap<&'static str, ViewFn>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ViewRegistry {
    /// A registry with no views
    #[must_use]
    pub fn empty() -> Self {
        Self {
            views: IndexMap::new(),
        }
    }

    /// Every view of the standard report
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();

        // Demand and load
        registry.register("demand_HeatAndCool", views::demand::heat_and_cool);
        registry.register("demand_Phius_heating", views::demand::phius_heating_demand);
        registry.register("demand_Phius_cooling", views::demand::phius_cooling_demand);
        registry.register("load_Phius_heating", views::demand::phius_heating_load);
        registry.register("load_Phius_cooling", views::demand::phius_cooling_load);

        // Energy
        registry.register("Phius_net_source_energy", views::energy::net_source_energy);
        registry.register("energy_Site", views::energy::site_energy);
        registry.register("energy_PER", views::energy::primary_energy_renewable);
        registry.register("energy_TonsCO2", views::co2e::tons_co2);

        // Variants
        registry.register("variant_inputs", views::variant_inputs::variant_inputs);
        registry.register("bldg_data", views::building::building_data);
        registry.register("heating_demand", views::detailed::heating_demand);
        registry.register("cooling_demand", views::detailed::cooling_demand);

        // Envelope
        registry.register("envelope_airflow", views::envelope::airflow);
        registry.register("envelope_rValues", views::envelope::surface_r_values);
        registry.register("envelope_srfcValues", views::envelope::assembly_r_values);

        // Climate and rooms
        registry.register("climate_radiation", views::climate::radiation);
        registry.register("climate_temps", views::climate::temperatures);
        registry.register("room_airflows", views::rooms::room_airflows);

        registry
    }

    /// Add or replace a view
    pub fn register(&mut self, name: &'static str, view: ViewFn) {
        self.views.insert(name, view);
    }

    /// Look up a view by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ViewFn> {
        self.views.get(name).copied()
    }

    /// View names in presentation order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.views.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Run one view by name
    pub fn run(
        &self,
        name: &str,
        dataset: &NormalizedDataset,
        context: &ReportContext<'_>,
    ) -> PhppResult<Vec<ReportView>> {
        let view = self
            .get(name)
            .ok_or_else(|| PhppError::UnknownView(name.to_string()))?;
        view(dataset, context)
    }

    /// Iterate over `(name, view)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, ViewFn)> + '_ {
        self.views.iter().map(|(name, view)| (*name, *view))
    }
}
