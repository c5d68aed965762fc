//! Builds small workbooks shaped like the PHPP 10 template.

use rust_xlsxwriter::{Workbook as XlsxWriter, Worksheet};

pub const MARKER: &str =
    "Additional rows: please select full rows above, and copy and insert them multiple times.";

/// Variant labels written into the Variants header (two unused slots follow).
pub const VARIANTS: [&str; 3] = ["Base", "Better", "Best"];

/// Writes a Variants row by its worksheet (1-based) row number.
fn variant_row(ws: &mut Worksheet, excel_row: u32, label: &str, unit: &str, values: [f64; 3]) {
    let r = excel_row - 1;
    ws.write_string(r, 2, label).unwrap();
    ws.write_string(r, 3, unit).unwrap();
    for (i, v) in values.iter().enumerate() {
        ws.write_number(r, 6 + i as u16, *v).unwrap();
    }
}

fn variants_sheet(book: &mut XlsxWriter) {
    let ws = book.add_worksheet();
    ws.set_name("Variants").unwrap();
    ws.write_string(7, 2, "Variants").unwrap();
    ws.write_string(7, 3, "Select active variant").unwrap();
    ws.write_string(7, 4, "Active").unwrap();
    for (i, name) in VARIANTS.iter().enumerate() {
        ws.write_string(7, 6 + i as u16, *name).unwrap();
    }
    // Column numbers repeated beneath the header
    for c in 2..=10u16 {
        ws.write_number(8, c, f64::from(c)).unwrap();
    }

    variant_row(ws, 26, " Heating, gas ", "kWh/(m²a)", [10.0, 8.0, 6.0]);
    variant_row(ws, 278, "TFA", "m2", [100.0, 120.0, 150.0]);
    variant_row(ws, 280, "Vn50", "m3", [250.0, 300.0, 375.0]);
    variant_row(ws, 317, "Heating demand", "kWh/m2", [15.0, 15.0, 15.0]);
    // EnerPHit style blank limit on the first variant
    ws.write_string(320, 2, "Heating load").unwrap();
    ws.write_string(320, 3, "W/m2").unwrap();
    ws.write_string(320, 6, "-").unwrap();
    ws.write_number(320, 7, 10.0).unwrap();
    ws.write_number(320, 8, 10.0).unwrap();
    variant_row(ws, 325, "Source energy", "kWh/m2", [38.0, 38.0, 38.0]);
}

fn climate_sheet(book: &mut XlsxWriter) {
    let ws = book.add_worksheet();
    ws.set_name("Climate").unwrap();
    ws.write_string(22, 2, "Units").unwrap();
    ws.write_string(22, 3, "Month").unwrap();
    let rows = [
        ("°C", "Exterior temperature"),
        ("kWh/m2", "Radiation North"),
    ];
    for (i, (unit, label)) in rows.iter().enumerate() {
        let r = 23 + i as u32;
        ws.write_string(r, 2, *unit).unwrap();
        ws.write_string(r, 3, *label).unwrap();
        for m in 0..12u16 {
            ws.write_number(r, 4 + m, f64::from(m) + 1.0).unwrap();
        }
    }
    // Something below the ten-row window
    ws.write_string(40, 3, "not climate").unwrap();
}

fn vent_sheet(book: &mut XlsxWriter, with_marker: bool) {
    let ws = book.add_worksheet();
    ws.set_name("Addl vent").unwrap();
    ws.write_string(52, 3, "Quantity").unwrap();
    ws.write_string(52, 4, "Room").unwrap();
    let rooms = [("Kitchen", 20.0, 2.5), ("Bath", 6.0, 2.4)];
    for (i, (name, area, height)) in rooms.iter().enumerate() {
        let r = 53 + i as u32;
        ws.write_number(r, 3, 1.0).unwrap();
        ws.write_string(r, 4, *name).unwrap();
        ws.write_number(r, 6, *area).unwrap();
        ws.write_number(r, 7, *height).unwrap();
    }
    if with_marker {
        ws.write_string(57, 3, MARKER).unwrap();
    }
}

/// A workbook holding every sheet the reader needs.
pub fn template_bytes(with_marker: bool) -> Vec<u8> {
    let mut book = XlsxWriter::new();
    variants_sheet(&mut book);
    climate_sheet(&mut book);
    vent_sheet(&mut book, with_marker);
    book.save_to_buffer().unwrap()
}

/// The template without its ventilation sheet.
pub fn template_without_vent() -> Vec<u8> {
    let mut book = XlsxWriter::new();
    variants_sheet(&mut book);
    climate_sheet(&mut book);
    book.save_to_buffer().unwrap()
}
