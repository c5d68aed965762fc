//! Extraction of the three raw regions from a template workbook.

use crate::error::{Diagnostic, PhppError, PhppResult};
use crate::schema::{SheetLayout, TemplateSchema, VentLayout};
use phpp_sheet::{parse_column_letters, CellValue, SheetRange, Table, Workbook};
use std::io::{Read, Seek};
use tracing::{debug, warn};

/// How the ventilation room count was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// End-of-table marker found this many rows beneath the header
    Sentinel { offset: usize },
    /// Marker absent; the template default was used
    Fallback,
}

/// Number of room rows in the ventilation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomCount {
    pub rows: usize,
    pub detection: Detection,
}

impl RoomCount {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.detection == Detection::Fallback
    }
}

/// The raw, unnormalised tables read from one workbook.
#[derive(Debug, Clone)]
pub struct RawRegions {
    pub main: Table,
    pub climate: Table,
    pub vent: Table,
    pub room_count: RoomCount,
    pub diagnostics: Vec<Diagnostic>,
}

/// Find the end-of-rooms marker in the values beneath the ventilation header.
///
/// The marker sits two rows below the last room, so a marker at offset `n`
/// means `n - 2` rooms.
#[must_use]
pub fn detect_room_count(column: &[CellValue], layout: &VentLayout) -> RoomCount {
    let found = column
        .iter()
        .position(|cell| cell.text().is_some_and(|s| s.trim() == layout.sentinel));

    match found {
        Some(offset) => RoomCount {
            rows: offset.saturating_sub(2),
            detection: Detection::Sentinel { offset },
        },
        None => RoomCount {
            rows: layout.fallback_rows,
            detection: Detection::Fallback,
        },
    }
}

fn open_sheet<RS: Read + Seek>(workbook: &mut Workbook<RS>, layout: &SheetLayout) -> PhppResult<SheetRange> {
    if !workbook.has_sheet(layout.sheet) {
        return Err(PhppError::structural(format!(
            "workbook has no '{}' sheet",
            layout.sheet
        )));
    }
    Ok(workbook.sheet(layout.sheet)?)
}

fn read_window(range: &SheetRange, layout: &SheetLayout) -> PhppResult<Table> {
    let window = layout.window()?;
    let has_header = window
        .columns
        .indices()
        .any(|c| !range.cell(window.header_row, c).is_blank());
    if !has_header {
        return Err(PhppError::structural(format!(
            "sheet '{}' has no header on row {} ({})",
            layout.sheet,
            layout.header_row + 1,
            layout.columns
        )));
    }
    Ok(range.window(&window)?)
}

/// Read the main variants table, the climate block and the room ventilation
/// table.
///
/// Missing sheets or headers fail with [`PhppError::StructuralMismatch`]. A
/// missing end-of-rooms marker does not fail: the template default is used
/// and recorded as a [`Diagnostic::DegradedDetection`].
pub fn read_regions<RS: Read + Seek>(
    workbook: &mut Workbook<RS>,
    schema: &TemplateSchema,
) -> PhppResult<RawRegions> {
    let mut diagnostics = Vec::new();

    let variants = open_sheet(workbook, &schema.variants)?;
    let main = read_window(&variants, &schema.variants)?;

    let climate_sheet = open_sheet(workbook, &schema.climate.table)?;
    let climate = read_window(&climate_sheet, &schema.climate.table)?;

    let vent_layout = &schema.vent;
    let vent_sheet = open_sheet(workbook, &vent_layout.table)?;
    let sentinel_col = parse_column_letters(vent_layout.sentinel_column)?;
    let column = vent_sheet.column_below(vent_layout.table.header_row, sentinel_col);
    let room_count = detect_room_count(&column, vent_layout);
    if room_count.is_degraded() {
        warn!(
            sheet = vent_layout.table.sheet,
            fallback = vent_layout.fallback_rows,
            "end-of-rooms marker not found, check the ventilation worksheet format"
        );
        diagnostics.push(Diagnostic::DegradedDetection {
            sheet: vent_layout.table.sheet.to_string(),
            what: "ventilation room count".to_string(),
            fallback: vent_layout.fallback_rows,
        });
    }

    let vent = read_window(&vent_sheet, &vent_layout.table.with_rows(room_count.rows))?;

    debug!(
        main_rows = main.row_count(),
        climate_rows = climate.row_count(),
        rooms = room_count.rows,
        "read workbook regions"
    );

    Ok(RawRegions {
        main,
        climate,
        vent,
        room_count,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TemplateVersion;

    fn column_with_marker_at(offset: usize, layout: &VentLayout) -> Vec<CellValue> {
        let mut col = vec![CellValue::Null; offset + 5];
        col[0] = CellValue::from("1");
        col[offset] = CellValue::from(layout.sentinel);
        col
    }

    #[test]
    fn test_sentinel_at_offset_40() {
        let layout = TemplateVersion::Phpp10.schema().vent;
        let count = detect_room_count(&column_with_marker_at(40, &layout), &layout);
        assert_eq!(count.rows, 38);
        assert_eq!(count.detection, Detection::Sentinel { offset: 40 });
        assert!(!count.is_degraded());
    }

    #[test]
    fn test_sentinel_absent_falls_back() {
        let layout = TemplateVersion::Phpp10.schema().vent;
        let count = detect_room_count(&[CellValue::from("Room"), CellValue::Null], &layout);
        assert_eq!(count.rows, 33);
        assert!(count.is_degraded());
    }

    #[test]
    fn test_sentinel_ignores_surrounding_whitespace() {
        let layout = TemplateVersion::Phpp10.schema().vent;
        let padded = format!("  {}  ", layout.sentinel);
        let col = vec![CellValue::Null, CellValue::Null, CellValue::Null, CellValue::from(padded)];
        assert_eq!(detect_room_count(&col, &layout).rows, 1);
    }
}
