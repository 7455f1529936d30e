//! The batch actions: each one loads inventory records, transforms them and writes them back.
//!
//! Failures are local to the record, distributor link or CSV row being processed; a single
//! failure never aborts a batch.

pub mod generate_labels;
pub mod locations;
pub mod rename;
pub mod report;
pub mod sync;

#[cfg(test)]
mod tests;

use inventory::api::{InventoryApi, InventoryError};
use inventory::part::Part;
use tracing::info;

/// Loads either a single part or the full inventory.
pub(crate) fn load_parts(api: &dyn InventoryApi, id: Option<u64>) -> Result<Vec<Part>, InventoryError> {
    match id {
        Some(id) => {
            info!("Loading part. id: {}", id);
            Ok(vec![api.get_part(id)?])
        }
        None => {
            info!("Loading parts");
            api.get_parts()
        }
    }
}
