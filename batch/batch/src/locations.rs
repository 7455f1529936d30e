use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Error};
use inventory::api::{InventoryApi, InventoryError};
use inventory::iri::Iri;
use inventory::part::Part;
use inventory::storage_location::StorageLocationRef;
use tracing::{info, trace, warn};

use crate::load_parts;

#[derive(Debug)]
pub struct ImportLocationsOptions {
    pub csv_file: PathBuf,
    /// Header of the column holding the part name.
    pub name_column: String,
    /// Header of the column holding the storage location name.
    pub location_column: String,
    /// Used when a row's location cell is empty.
    pub default_location: String,
    /// Overwrite locations that are already assigned.
    pub force: bool,
    pub id: Option<u64>,
}

/// Rows are keyed by header so the column names can be configured per file.
type CsvRow = HashMap<String, String>;

/// Assigns storage locations to parts from a delimited file, creating locations on demand.
pub fn update_locations_from_csv(api: &dyn InventoryApi, options: &ImportLocationsOptions) -> Result<(), Error> {
    let mut parts = load_parts(api, options.id)?;
    let part_indices_by_name: HashMap<String, usize> = parts
        .iter()
        .enumerate()
        .map(|(index, part)| (part.name.to_lowercase(), index))
        .collect();

    info!("Loading storage locations");
    let locations = api.get_storage_locations()?;
    let mut location_ids_by_name: HashMap<String, Iri> = locations
        .into_iter()
        .map(|location| (location.name.to_lowercase(), location.id))
        .collect();

    let rows = load_rows(&options.csv_file)?;

    for row in &rows {
        let name = column(row, &options.name_column, &options.csv_file)?;
        let mut location = column(row, &options.location_column, &options.csv_file)?.to_string();
        if location.is_empty() {
            location = options.default_location.clone();
        }

        info!("Processing {} located in {}", name, location);

        let Some(&part_index) = part_indices_by_name.get(&name.to_lowercase()) else {
            info!("Could not find part in database, skipping");
            continue;
        };

        let part = &mut parts[part_index];
        if part.storage_location.is_some() && !options.force {
            info!("Part already has a storage location assigned, skipping (use --force to override)");
            continue;
        }

        if let Err(error) = assign_location(api, part, &location, &mut location_ids_by_name) {
            warn!(
                "Failed to assign location. part: {}, location: {}, cause: {}",
                part.name, location, error
            );
        }
    }

    Ok(())
}

fn load_rows(csv_file: &Path) -> Result<Vec<CsvRow>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .from_path(csv_file)
        .with_context(|| format!("Error reading location assignments. file: {}", csv_file.display()))?;

    let mut rows: Vec<CsvRow> = vec![];

    for result in csv_reader.deserialize() {
        let row: CsvRow = result.with_context(|| "Deserializing location assignment row".to_string())?;

        trace!("{:?}", row);

        rows.push(row);
    }
    Ok(rows)
}

fn column<'a>(row: &'a CsvRow, name: &str, csv_file: &Path) -> Result<&'a str, Error> {
    row.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing column '{}'. file: {}", name, csv_file.display()))
}

/// Resolves the location case-insensitively, creating it when unknown, then writes the part.
fn assign_location(
    api: &dyn InventoryApi,
    part: &mut Part,
    location_name: &str,
    location_ids_by_name: &mut HashMap<String, Iri>,
) -> Result<(), InventoryError> {
    let location_id = match location_ids_by_name.get(&location_name.to_lowercase()) {
        Some(id) => {
            info!("Found location in database");
            id.clone()
        }
        None => {
            info!("Creating location");
            let location = api.create_storage_location(location_name)?;
            location_ids_by_name.insert(location_name.to_lowercase(), location.id.clone());
            location.id
        }
    };

    info!("Updating part");
    part.storage_location = Some(StorageLocationRef {
        id: location_id,
        name: location_name.to_string(),
    });
    api.update_part(part)
}
