use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use anyhow::Error;
use catalog::{catalog_for, PartCatalog, PartData};
use inventory::api::{InventoryApi, InventoryError};
use inventory::iri::Iri;
use inventory::part::{Part, PartParameter};
use tracing::{debug, info, warn};

use crate::load_parts;

/// Delay between records; the inventory API allows 5 requests per second.
const RATE_LIMIT_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Default)]
pub struct SyncOptions {
    /// Restrict the run to a single part.
    pub id: Option<u64>,
    /// Skip this many parts from the front of the list.
    pub offset: Option<usize>,
}

/// What happened during a sync run.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    pub processed: usize,
    /// Names of parts with at least one failed distributor lookup or write, in processing order.
    pub failures: Vec<String>,
}

/// Refreshes every part from the distributor catalogs serving its distributor links.
pub fn sync_distributors(
    api: &dyn InventoryApi,
    catalogs: &[Box<dyn PartCatalog>],
    options: &SyncOptions,
) -> Result<SyncOutcome, Error> {
    let mut parts = load_parts(api, options.id)?;

    info!("Loading manufacturers");
    let manufacturers = api.get_manufacturers()?;
    let mut manufacturer_ids_by_name: HashMap<String, Iri> = manufacturers
        .into_iter()
        .map(|manufacturer| (manufacturer.name.to_lowercase(), manufacturer.id))
        .collect();

    if let Some(offset) = options.offset {
        parts.drain(..offset.min(parts.len()));
    }

    let num_parts = parts.len();
    let mut outcome = SyncOutcome::default();

    for (index, part) in parts.iter_mut().enumerate() {
        info!("[{:5}/{:5}] Processing {}", index + 1, num_parts, part.name);

        sync_part(api, catalogs, part, &mut manufacturer_ids_by_name, &mut outcome.failures);
        outcome.processed += 1;

        thread::sleep(RATE_LIMIT_DELAY);
    }

    Ok(outcome)
}

/// Processes every supported distributor link of one part. Each link ends with one part update;
/// link failures are recorded and the remaining links still run.
fn sync_part(
    api: &dyn InventoryApi,
    catalogs: &[Box<dyn PartCatalog>],
    part: &mut Part,
    manufacturer_ids_by_name: &mut HashMap<String, Iri>,
    failures: &mut Vec<String>,
) {
    for link_index in 0..part.distributors.len() {
        let distributor_name = part.distributors[link_index].distributor.name.clone();

        let Some(catalog) = catalog_for(catalogs, &distributor_name) else {
            info!("Skipping distributor {}", distributor_name);
            continue;
        };

        info!("Processing distributor {}", distributor_name);

        let order_no = part.distributors[link_index].order_number.clone();
        let part_data = match catalog.fetch_part_data(&order_no) {
            Ok(part_data) => part_data,
            Err(error) => {
                warn!(
                    "Failed to get part data. part: {}, distributor: {}, order number: {}, cause: {}",
                    part.name, distributor_name, order_no, error
                );
                failures.push(part.name.clone());
                continue;
            }
        };

        let result = apply_part_data(api, part, link_index, &part_data, manufacturer_ids_by_name)
            .and_then(|()| api.update_part(part));

        if let Err(error) = result {
            warn!("Failed to update part. part: {}, cause: {}", part.name, error);
            failures.push(part.name.clone());
        }
    }
}

/// Merges one distributor's canonical data into the part.
fn apply_part_data(
    api: &dyn InventoryApi,
    part: &mut Part,
    link_index: usize,
    part_data: &PartData,
    manufacturer_ids_by_name: &mut HashMap<String, Iri>,
) -> Result<(), InventoryError> {
    if !part_data.description.is_empty() {
        debug!("Updating description");
        part.description = part_data.description.clone();
    }

    if part_data.manufacturer.is_empty() {
        debug!("No manufacturer reported");
    } else {
        reconcile_manufacturer(api, part, part_data, manufacturer_ids_by_name)?;
    }

    if let Some(price) = part_data.lowest_quantity_price() {
        let link = &mut part.distributors[link_index];
        debug!("Updating price from {} to {:.5}", link.price, price);
        link.price = price;
        api.update_part_distributor(link)?;
    }

    let has_image = part.attachments.iter().any(|attachment| attachment.is_image);
    if !has_image {
        if let Some(photo_url) = &part_data.photo_url {
            debug!("Attaching photo. url: {}", photo_url);
            let attachment = api.attach_image_from_url(photo_url)?;
            part.attachments.push(attachment);
        }
    }

    if let Some(parameters) = &part_data.parameters {
        debug!("Updating parameters");
        for (name, value) in parameters {
            match part.parameters.iter_mut().find(|parameter| parameter.name == *name) {
                Some(parameter) => parameter.string_value = value.clone(),
                None => part.parameters.push(PartParameter {
                    name: name.clone(),
                    string_value: value.clone(),
                }),
            }
        }
    }

    Ok(())
}

/// Exactly one manufacturer link is created or updated per sync step: an existing link on the
/// part is updated in place, otherwise a link is created against the global manufacturer,
/// creating that too if it is unknown. Matching is case-insensitive.
fn reconcile_manufacturer(
    api: &dyn InventoryApi,
    part: &mut Part,
    part_data: &PartData,
    manufacturer_ids_by_name: &mut HashMap<String, Iri>,
) -> Result<(), InventoryError> {
    let key = part_data.manufacturer.to_lowercase();

    if let Some(link) = part
        .manufacturers
        .iter_mut()
        .find(|link| link.manufacturer.name.to_lowercase() == key)
    {
        debug!("Updating part manufacturer entry");
        link.part_number = part_data.manufacturer_part_no.clone();
        return api.update_part_manufacturer(link);
    }

    let manufacturer_id = match manufacturer_ids_by_name.get(&key) {
        Some(id) => {
            debug!("Found manufacturer in database");
            id.clone()
        }
        None => {
            debug!("Creating manufacturer entry. name: {}", part_data.manufacturer);
            let manufacturer = api.create_manufacturer(&part_data.manufacturer)?;
            manufacturer_ids_by_name.insert(key, manufacturer.id.clone());
            manufacturer.id
        }
    };

    debug!("Creating part manufacturer entry");
    let link = api.create_part_manufacturer(&manufacturer_id, &part_data.manufacturer_part_no)?;
    part.manufacturers.push(link);

    Ok(())
}
