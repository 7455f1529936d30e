use std::path::PathBuf;

use tempfile::TempDir;

use crate::locations::{update_locations_from_csv, ImportLocationsOptions};
use crate::tests::stub::{self, StubApi};

fn write_csv(rows: &[[&str; 2]]) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("locations.csv");

    let mut writer = csv::WriterBuilder::new().from_path(&path).unwrap();
    writer.write_record(["Part", "Location"]).unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    writer.flush().unwrap();

    (temp_dir, path)
}

fn options(csv_file: PathBuf) -> ImportLocationsOptions {
    ImportLocationsOptions {
        csv_file,
        name_column: "Part".to_string(),
        location_column: "Location".to_string(),
        default_location: "Misc".to_string(),
        force: false,
        id: None,
    }
}

#[test]
fn rows_assign_existing_locations_case_insensitively() {
    // given a location known under different casing
    let (_temp_dir, csv_file) = write_csv(&[["r1", "BOX A"]]);
    let api = StubApi::new(
        vec![stub::part(1, "R1", "Resistors")],
        vec![],
        vec![stub::storage_location(5, "Box A")],
    );

    // when
    update_locations_from_csv(&api, &options(csv_file)).unwrap();

    // then: no location created, part updated with the existing id
    assert!(api.created_locations.borrow().is_empty());

    let updated_parts = api.updated_parts.borrow();
    assert_eq!(updated_parts.len(), 1);

    let location = updated_parts[0].storage_location.as_ref().unwrap();
    assert_eq!(location.id.as_str(), "/api/storage_locations/5");
}

#[test]
fn unknown_locations_are_created_once_and_reused() {
    // given two rows naming the same new location
    let (_temp_dir, csv_file) = write_csv(&[["R1", "Shelf 9"], ["R2", "shelf 9"]]);
    let api = StubApi::new(
        vec![
            stub::part(1, "R1", "Resistors"),
            stub::part(2, "R2", "Resistors"),
        ],
        vec![],
        vec![],
    );

    // when
    update_locations_from_csv(&api, &options(csv_file)).unwrap();

    // then
    assert_eq!(*api.created_locations.borrow(), vec!["Shelf 9".to_string()]);
    assert_eq!(api.updated_parts.borrow().len(), 2);
}

#[test]
fn empty_location_cells_fall_back_to_the_default() {
    // given
    let (_temp_dir, csv_file) = write_csv(&[["R1", ""]]);
    let api = StubApi::new(vec![stub::part(1, "R1", "Resistors")], vec![], vec![]);

    // when
    update_locations_from_csv(&api, &options(csv_file)).unwrap();

    // then
    assert_eq!(*api.created_locations.borrow(), vec!["Misc".to_string()]);

    let updated_parts = api.updated_parts.borrow();
    assert_eq!(updated_parts[0].storage_location.as_ref().unwrap().name, "Misc");
}

#[test]
fn unknown_parts_are_skipped() {
    // given
    let (_temp_dir, csv_file) = write_csv(&[["R99", "Box A"]]);
    let api = StubApi::new(vec![stub::part(1, "R1", "Resistors")], vec![], vec![]);

    // when
    update_locations_from_csv(&api, &options(csv_file)).unwrap();

    // then
    assert!(api.updated_parts.borrow().is_empty());
    assert!(api.created_locations.borrow().is_empty());
}

#[test]
fn assigned_parts_are_skipped_unless_forced() {
    // given a part that already has a location
    let (_temp_dir, csv_file) = write_csv(&[["R1", "Box B"]]);

    let mut part = stub::part(1, "R1", "Resistors");
    part.storage_location = Some(inventory::storage_location::StorageLocationRef {
        id: inventory::iri::Iri::new("/api/storage_locations/5"),
        name: "Box A".to_string(),
    });

    // when: without force
    let api = StubApi::new(vec![part.clone()], vec![], vec![]);
    update_locations_from_csv(&api, &options(csv_file.clone())).unwrap();

    // then
    assert!(api.updated_parts.borrow().is_empty());

    // when: with force
    let api = StubApi::new(vec![part], vec![], vec![]);
    let mut forced = options(csv_file);
    forced.force = true;
    update_locations_from_csv(&api, &forced).unwrap();

    // then
    let updated_parts = api.updated_parts.borrow();
    assert_eq!(updated_parts[0].storage_location.as_ref().unwrap().name, "Box B");
}

#[test]
fn missing_columns_abort_the_import() {
    // given a file without the configured columns
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("locations.csv");

    let mut writer = csv::WriterBuilder::new().from_path(&path).unwrap();
    writer.write_record(["Name", "Bin"]).unwrap();
    writer.write_record(["R1", "Box A"]).unwrap();
    writer.flush().unwrap();

    let api = StubApi::new(vec![stub::part(1, "R1", "Resistors")], vec![], vec![]);

    // when
    let result = update_locations_from_csv(&api, &options(path));

    // then
    assert!(result.is_err());
    assert!(api.updated_parts.borrow().is_empty());
}
