//! Report view generators.
//!
//! Every generator reads rows from the dataset's template schema and returns
//! one or more views; none of them mutate the dataset.

pub mod building;
pub mod climate;
pub mod co2e;
pub mod demand;
pub mod detailed;
pub mod energy;
pub mod envelope;
pub mod rooms;
pub mod variant_inputs;

use crate::view::ReportView;
use phpp_core::PhppResult;
use phpp_sheet::Table;

/// Wrap a single table as the only output of a view.
fn single(base_name: &str, table: Table) -> PhppResult<Vec<ReportView>> {
    Ok(vec![ReportView::new(base_name, table)?])
}
