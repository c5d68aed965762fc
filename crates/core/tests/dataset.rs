mod common;

use phpp_core::reader::{read_regions, Detection};
use phpp_core::{load_dataset, Diagnostic, PhppError, TemplateVersion, DATATYPE, UNITS};
use phpp_sheet::{CellValue, Workbook};

// ===== Region Reading =====

#[test]
fn test_read_regions_detects_rooms() {
    let schema = TemplateVersion::Phpp10.schema();
    let mut wb = Workbook::from_bytes(common::template_bytes(true)).unwrap();
    let raw = read_regions(&mut wb, schema).unwrap();

    assert_eq!(raw.room_count.rows, 2);
    assert_eq!(raw.room_count.detection, Detection::Sentinel { offset: 4 });
    assert!(raw.diagnostics.is_empty());
    assert_eq!(raw.climate.row_count(), 10);
    assert_eq!(raw.vent.row_count(), 2);
}

#[test]
fn test_missing_marker_is_observable() {
    let schema = TemplateVersion::Phpp10.schema();
    let mut wb = Workbook::from_bytes(common::template_bytes(false)).unwrap();
    let dataset = load_dataset(&mut wb, schema).unwrap();

    assert!(dataset.room_count().is_degraded());
    assert_eq!(dataset.room_count().rows, 33);
    assert!(matches!(
        dataset.diagnostics(),
        [Diagnostic::DegradedDetection { fallback: 33, .. }]
    ));
}

#[test]
fn test_missing_sheet_is_structural() {
    let schema = TemplateVersion::Phpp10.schema();
    let mut wb = Workbook::from_bytes(common::template_without_vent()).unwrap();
    match load_dataset(&mut wb, schema) {
        Err(PhppError::StructuralMismatch(msg)) => assert!(msg.contains("Addl vent")),
        other => panic!("expected StructuralMismatch, got {other:?}"),
    }
}

// ===== Normalised Dataset =====

#[test]
fn test_dataset_main_table() {
    let schema = TemplateVersion::Phpp10.schema();
    let mut wb = Workbook::from_bytes(common::template_bytes(true)).unwrap();
    let dataset = load_dataset(&mut wb, schema).unwrap();
    let main = dataset.main();

    assert_eq!(&main.columns()[..2], &[DATATYPE.to_string(), UNITS.to_string()]);
    assert_eq!(dataset.variant_names(), common::VARIANTS);
    assert_eq!(main.cell(26, DATATYPE).unwrap(), &CellValue::from("Heating  gas"));
    assert_eq!(main.cell(280, "Best").unwrap(), &CellValue::Float(375.0));
    assert!(main.row(9).is_err());
}

#[test]
fn test_dataset_derived_attributes() {
    let schema = TemplateVersion::Phpp10.schema();
    let mut wb = Workbook::from_bytes(common::template_bytes(true)).unwrap();
    let dataset = load_dataset(&mut wb, schema).unwrap();

    assert_eq!(dataset.tfa()["Better"], 120.0);

    let limits = dataset.cert_limits();
    for name in dataset.variant_names() {
        let specific = dataset.main().cell(317, name).unwrap().number().unwrap();
        let absolute = limits.cell(317, name).unwrap().number().unwrap();
        assert!((absolute - specific * dataset.tfa()[name]).abs() < 1e-9);
    }
    assert_eq!(limits.cell(321, "Base").unwrap(), &CellValue::Float(0.0));
    assert_eq!(limits.cell(325, UNITS).unwrap(), &CellValue::from("kWh"));
}

#[test]
fn test_dataset_climate_and_rooms() {
    let schema = TemplateVersion::Phpp10.schema();
    let mut wb = Workbook::from_bytes(common::template_bytes(true)).unwrap();
    let dataset = load_dataset(&mut wb, schema).unwrap();

    let climate = dataset.climate();
    assert_eq!(climate.cell(24, DATATYPE).unwrap(), &CellValue::from("Exterior temperature"));
    assert_eq!(climate.cell(25, "Dec").unwrap(), &CellValue::Float(12.0));

    let vent = dataset.vent();
    assert_eq!(vent.cell(54, "Room name").unwrap(), &CellValue::from("Kitchen"));
    assert_eq!(vent.cell(55, "Clear height").unwrap(), &CellValue::Float(2.4));
}

#[test]
fn test_open_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.xlsx");
    std::fs::write(&path, common::template_bytes(true)).unwrap();

    let mut wb = Workbook::open(&path).unwrap();
    let dataset = load_dataset(&mut wb, TemplateVersion::Phpp10.schema()).unwrap();
    assert_eq!(dataset.variant_names().len(), 3);
}
