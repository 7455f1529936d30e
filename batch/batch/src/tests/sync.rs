use catalog::{PartData, PriceBreak};
use indexmap::IndexMap;
use inventory::part::PartParameter;

use crate::sync::{sync_distributors, SyncOptions};
use crate::tests::stub::{self, StubApi, StubCatalog};

fn tme_with(order_no: &str, part_data: PartData) -> Vec<Box<dyn catalog::PartCatalog>> {
    stub::catalogs(vec![StubCatalog::new("TME", vec![(order_no, part_data)])])
}

#[test]
fn price_comes_from_the_lowest_quantity_break_regardless_of_order() {
    // given a part with one TME link and price breaks listed highest quantity first
    let mut part = stub::part(1, "R1", "Resistors");
    part.distributors.push(stub::distributor_link(10, "TME", "RES-1"));

    let api = StubApi::new(vec![part], vec![], vec![]);
    let catalogs = tme_with("RES-1", PartData {
        prices: vec![
            PriceBreak {
                quantity: 100,
                price: 0.01,
            },
            PriceBreak {
                quantity: 1,
                price: 0.10,
            },
        ],
        ..PartData::default()
    });

    // when
    let outcome = sync_distributors(&api, &catalogs, &SyncOptions::default()).unwrap();

    // then
    assert!(outcome.failures.is_empty());

    let updated = api.updated_part_distributors.borrow();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].price, 0.10);
}

#[test]
fn existing_manufacturer_link_is_updated_in_place() {
    // given a part already linked to the manufacturer, spelled differently
    let mut part = stub::part(1, "R1", "Resistors");
    part.distributors.push(stub::distributor_link(10, "TME", "RES-1"));
    part.manufacturers.push(stub::manufacturer_link(20, 2, "YAGEO", "OLD-MPN"));

    let api = StubApi::new(vec![part], vec![stub::manufacturer(2, "YAGEO")], vec![]);
    let catalogs = tme_with("RES-1", PartData {
        manufacturer: "Yageo".to_string(),
        manufacturer_part_no: "NEW-MPN".to_string(),
        ..PartData::default()
    });

    // when
    sync_distributors(&api, &catalogs, &SyncOptions::default()).unwrap();

    // then: exactly one update, zero creates
    assert_eq!(api.updated_part_manufacturers.borrow().len(), 1);
    assert_eq!(api.updated_part_manufacturers.borrow()[0].part_number, "NEW-MPN");
    assert!(api.created_manufacturers.borrow().is_empty());
    assert!(api.created_part_manufacturers.borrow().is_empty());
}

#[test]
fn known_global_manufacturer_gets_a_new_link_only() {
    // given the manufacturer exists globally but is not linked to the part
    let mut part = stub::part(1, "R1", "Resistors");
    part.distributors.push(stub::distributor_link(10, "TME", "RES-1"));

    let api = StubApi::new(vec![part], vec![stub::manufacturer(2, "Yageo")], vec![]);
    let catalogs = tme_with("RES-1", PartData {
        manufacturer: "YAGEO".to_string(),
        manufacturer_part_no: "MPN-1".to_string(),
        ..PartData::default()
    });

    // when
    sync_distributors(&api, &catalogs, &SyncOptions::default()).unwrap();

    // then
    assert!(api.created_manufacturers.borrow().is_empty());

    let created_links = api.created_part_manufacturers.borrow();
    assert_eq!(created_links.len(), 1);
    assert_eq!(created_links[0].0.as_str(), "/api/manufacturers/2");

    // and the new link rides along on the part update
    let updated_parts = api.updated_parts.borrow();
    assert_eq!(updated_parts.last().unwrap().manufacturers.len(), 1);
}

#[test]
fn unknown_manufacturer_is_created_once_per_run() {
    // given two parts reporting the same unknown manufacturer
    let mut part_a = stub::part(1, "R1", "Resistors");
    part_a.distributors.push(stub::distributor_link(10, "TME", "RES-1"));
    let mut part_b = stub::part(2, "R2", "Resistors");
    part_b.distributors.push(stub::distributor_link(11, "TME", "RES-2"));

    let api = StubApi::new(vec![part_a, part_b], vec![], vec![]);
    let catalogs = stub::catalogs(vec![StubCatalog::new("TME", vec![
        ("RES-1", PartData {
            manufacturer: "NewCorp".to_string(),
            manufacturer_part_no: "NC-1".to_string(),
            ..PartData::default()
        }),
        ("RES-2", PartData {
            manufacturer: "NEWCORP".to_string(),
            manufacturer_part_no: "NC-2".to_string(),
            ..PartData::default()
        }),
    ])]);

    // when
    sync_distributors(&api, &catalogs, &SyncOptions::default()).unwrap();

    // then: one manufacturer create, one link create per part
    assert_eq!(*api.created_manufacturers.borrow(), vec!["NewCorp".to_string()]);
    assert_eq!(api.created_part_manufacturers.borrow().len(), 2);
}

#[test]
fn description_and_parameters_merge_into_the_part() {
    // given a part with an existing parameter
    let mut part = stub::part(1, "R1", "Resistors");
    part.description = "old description".to_string();
    part.distributors.push(stub::distributor_link(10, "TME", "RES-1"));
    part.parameters.push(PartParameter {
        name: "Resistance".to_string(),
        string_value: "1k".to_string(),
    });

    let mut parameters = IndexMap::new();
    parameters.insert("Resistance".to_string(), "10k".to_string());
    parameters.insert("Tolerance".to_string(), "1%".to_string());

    let api = StubApi::new(vec![part], vec![], vec![]);
    let catalogs = tme_with("RES-1", PartData {
        description: "Resistor: thick film".to_string(),
        parameters: Some(parameters),
        ..PartData::default()
    });

    // when
    sync_distributors(&api, &catalogs, &SyncOptions::default()).unwrap();

    // then: description overwritten, parameter updated in place, new parameter appended
    let updated_parts = api.updated_parts.borrow();
    let updated = updated_parts.last().unwrap();
    assert_eq!(updated.description, "Resistor: thick film");
    assert_eq!(updated.parameters, vec![
        PartParameter {
            name: "Resistance".to_string(),
            string_value: "10k".to_string(),
        },
        PartParameter {
            name: "Tolerance".to_string(),
            string_value: "1%".to_string(),
        },
    ]);
}

#[test]
fn photo_is_attached_only_when_no_image_is_present() {
    // given one part with an image attachment and one without
    let mut with_image = stub::part(1, "R1", "Resistors");
    with_image.distributors.push(stub::distributor_link(10, "TME", "RES-1"));
    with_image.attachments.push(inventory::part::Attachment {
        id: inventory::iri::Iri::new("/api/attachments/1"),
        is_image: true,
    });

    let mut without_image = stub::part(2, "R2", "Resistors");
    without_image.distributors.push(stub::distributor_link(11, "TME", "RES-2"));

    let photo_data = |url: &str| PartData {
        photo_url: Some(url.to_string()),
        ..PartData::default()
    };

    let api = StubApi::new(vec![with_image, without_image], vec![], vec![]);
    let catalogs = stub::catalogs(vec![StubCatalog::new("TME", vec![
        ("RES-1", photo_data("https://img.example.com/r1.jpg")),
        ("RES-2", photo_data("https://img.example.com/r2.jpg")),
    ])]);

    // when
    sync_distributors(&api, &catalogs, &SyncOptions::default()).unwrap();

    // then: only the part without an image fetched a photo
    assert_eq!(*api.attached_urls.borrow(), vec!["https://img.example.com/r2.jpg".to_string()]);
}

#[test]
fn lookup_failures_are_collected_and_the_batch_continues() {
    // given the catalog knows the second part only
    let mut part_a = stub::part(1, "R1", "Resistors");
    part_a.distributors.push(stub::distributor_link(10, "TME", "MISSING"));
    let mut part_b = stub::part(2, "R2", "Resistors");
    part_b.distributors.push(stub::distributor_link(11, "TME", "RES-2"));

    let api = StubApi::new(vec![part_a, part_b], vec![], vec![]);
    let catalogs = tme_with("RES-2", PartData {
        description: "found".to_string(),
        ..PartData::default()
    });

    // when
    let outcome = sync_distributors(&api, &catalogs, &SyncOptions::default()).unwrap();

    // then
    assert_eq!(outcome.processed, 2);
    assert_eq!(outcome.failures, vec!["R1".to_string()]);
    assert_eq!(api.updated_parts.borrow().len(), 1);
}

#[test]
fn unsupported_distributors_are_skipped_without_a_write() {
    // given a part whose only link points at an unsupported distributor
    let mut part = stub::part(1, "R1", "Resistors");
    part.distributors.push(stub::distributor_link(10, "Digi-Key", "DK-1"));

    let api = StubApi::new(vec![part], vec![], vec![]);
    let catalogs = tme_with("RES-1", PartData::default());

    // when
    let outcome = sync_distributors(&api, &catalogs, &SyncOptions::default()).unwrap();

    // then
    assert!(outcome.failures.is_empty());
    assert!(api.updated_parts.borrow().is_empty());
}

#[test]
fn offset_skips_the_front_of_the_list() {
    // given
    let mut part_a = stub::part(1, "R1", "Resistors");
    part_a.distributors.push(stub::distributor_link(10, "TME", "RES-1"));
    let part_b = stub::part(2, "R2", "Resistors");

    let api = StubApi::new(vec![part_a, part_b], vec![], vec![]);
    let catalogs = tme_with("RES-1", PartData::default());

    // when: the first part (the only one with a link) is skipped
    let outcome = sync_distributors(&api, &catalogs, &SyncOptions {
        id: None,
        offset: Some(1),
    })
    .unwrap();

    // then
    assert_eq!(outcome.processed, 1);
    assert!(api.updated_parts.borrow().is_empty());
}
