//! The normalised, read-only dataset every report view consumes.

use crate::derived::{certification_limits, treated_floor_area, variant_names, VariantValues};
use crate::error::{Diagnostic, PhppError, PhppResult};
use crate::normalize::{self, DATATYPE, UNITS};
use crate::reader::{read_regions, RoomCount};
use crate::schema::{ClimateLayout, TemplateSchema, VentLayout};
use phpp_sheet::{Row, Table, Workbook};
use std::io::{Read, Seek};
use tracing::info;

/// Month labels of the climate table, January first.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "June", "July", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// One workbook, normalised.
///
/// Built once per request and handed to every view by shared reference.
#[derive(Debug, Clone)]
pub struct NormalizedDataset {
    main: Table,
    climate: Table,
    vent: Table,
    cert_limits: Table,
    tfa: VariantValues,
    variant_names: Vec<String>,
    room_count: RoomCount,
    diagnostics: Vec<Diagnostic>,
    schema: &'static TemplateSchema,
}

impl NormalizedDataset {
    /// Assemble a dataset from an already normalised main table and the
    /// normalised climate and room tables.
    pub fn from_tables(
        main: Table,
        climate: Table,
        vent: Table,
        room_count: RoomCount,
        diagnostics: Vec<Diagnostic>,
        schema: &'static TemplateSchema,
    ) -> PhppResult<Self> {
        let variant_names = variant_names(&main)?;
        let tfa = treated_floor_area(&main, schema)?;
        let cert_limits = certification_limits(&main, &tfa, schema)?;
        Ok(Self {
            main,
            climate,
            vent,
            cert_limits,
            tfa,
            variant_names,
            room_count,
            diagnostics,
            schema,
        })
    }

    /// The main variants table indexed by worksheet row number
    #[must_use]
    pub fn main(&self) -> &Table {
        &self.main
    }

    /// Monthly climate rows (`Datatype`, `Units`, `Jan`..`Dec`)
    #[must_use]
    pub fn climate(&self) -> &Table {
        &self.climate
    }

    /// One row per room, labelled with the template's room columns
    #[must_use]
    pub fn vent(&self) -> &Table {
        &self.vent
    }

    /// Absolute certification limits
    #[must_use]
    pub fn cert_limits(&self) -> &Table {
        &self.cert_limits
    }

    /// Treated floor area per variant
    #[must_use]
    pub fn tfa(&self) -> &VariantValues {
        &self.tfa
    }

    /// Variant column labels in sheet order
    #[must_use]
    pub fn variant_names(&self) -> &[String] {
        &self.variant_names
    }

    #[must_use]
    pub fn room_count(&self) -> RoomCount {
        self.room_count
    }

    /// Non-fatal conditions noticed while reading
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Layout contract the dataset was read with
    #[must_use]
    pub fn schema(&self) -> &'static TemplateSchema {
        self.schema
    }
}

/// Relabel the raw climate window as `Datatype`, `Units`, months.
pub fn normalize_climate(raw: &Table, layout: &ClimateLayout) -> PhppResult<Table> {
    let needed = layout.first_month_column + MONTHS.len();
    if raw.col_count() < needed {
        return Err(PhppError::structural(format!(
            "'{}' window has {} columns, expected {needed}",
            layout.table.sheet,
            raw.col_count()
        )));
    }

    let mut columns = vec![DATATYPE.to_string(), UNITS.to_string()];
    columns.extend(MONTHS.iter().map(|m| (*m).to_string()));

    let first = layout.table.first_data_row_number();
    let rows = raw
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = vec![
                normalize::clean_label(&row.cells[layout.label_column]),
                row.cells[layout.units_column].clone(),
            ];
            cells.extend(row.cells[layout.first_month_column..needed].iter().cloned());
            Row::at(first + i, cells)
        })
        .collect();
    Ok(Table::from_rows(columns, rows)?)
}

/// Relabel the raw room window with the template's fixed room columns.
pub fn normalize_vent(raw: &Table, layout: &VentLayout) -> PhppResult<Table> {
    if raw.col_count() != layout.column_labels.len() {
        return Err(PhppError::structural(format!(
            "'{}' window has {} columns, expected {}",
            layout.table.sheet,
            raw.col_count(),
            layout.column_labels.len()
        )));
    }
    let mut table = raw.renumbered(layout.table.first_data_row_number());
    for (i, label) in layout.column_labels.iter().enumerate() {
        table = table.with_column_name(i, label)?;
    }
    Ok(table)
}

/// Read, normalise and derive: the whole extraction half of the pipeline.
///
/// Parsing finishes here; views only ever see the materialised dataset.
pub fn load_dataset<RS: Read + Seek>(
    workbook: &mut Workbook<RS>,
    schema: &'static TemplateSchema,
) -> PhppResult<NormalizedDataset> {
    let raw = read_regions(workbook, schema)?;
    let main = normalize::normalize(&raw.main, schema)?;
    let climate = normalize_climate(&raw.climate, &schema.climate)?;
    let vent = normalize_vent(&raw.vent, &schema.vent)?;

    let dataset =
        NormalizedDataset::from_tables(main, climate, vent, raw.room_count, raw.diagnostics, schema)?;
    info!(
        template = %schema.version,
        variants = dataset.variant_names().len(),
        rooms = dataset.room_count().rows,
        degraded = dataset.room_count().is_degraded(),
        "loaded dataset"
    );
    Ok(dataset)
}
