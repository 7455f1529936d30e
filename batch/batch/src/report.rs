use anyhow::Error;
use inventory::api::InventoryApi;
use tracing::{debug, info};

/// Names of parts that have no manufacturer link at all.
pub fn list_parts_without_manufacturers(api: &dyn InventoryApi) -> Result<Vec<String>, Error> {
    info!("Loading parts");
    let parts = api.get_parts()?;
    let num_parts = parts.len();

    let mut names = Vec::new();
    for (index, part) in parts.into_iter().enumerate() {
        debug!("[{:5}/{:5}] Processing {}", index + 1, num_parts, part.name);

        if part.manufacturers.is_empty() {
            names.push(part.name);
        }
    }

    Ok(names)
}
