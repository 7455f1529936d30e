use thiserror::Error;

use crate::iri::Iri;
use crate::manufacturer::Manufacturer;
use crate::part::{Attachment, Part, PartDistributor, PartManufacturer};
use crate::storage_location::StorageLocation;

/// Operations the batch actions need from the inventory system.
///
/// [`HttpInventoryClient`](crate::client::HttpInventoryClient) is the production implementation;
/// tests substitute an in-memory recording stub.
pub trait InventoryApi {
    fn get_part(&self, id: u64) -> Result<Part, InventoryError>;

    fn get_parts(&self) -> Result<Vec<Part>, InventoryError>;

    fn get_manufacturers(&self) -> Result<Vec<Manufacturer>, InventoryError>;

    fn create_manufacturer(&self, name: &str) -> Result<Manufacturer, InventoryError>;

    /// Creates a manufacturer link; the returned link embeds the resolved manufacturer.
    fn create_part_manufacturer(
        &self,
        manufacturer: &Iri,
        part_number: &str,
    ) -> Result<PartManufacturer, InventoryError>;

    fn update_part_manufacturer(&self, link: &PartManufacturer) -> Result<(), InventoryError>;

    fn update_part_distributor(&self, link: &PartDistributor) -> Result<(), InventoryError>;

    fn get_storage_locations(&self) -> Result<Vec<StorageLocation>, InventoryError>;

    fn create_storage_location(&self, name: &str) -> Result<StorageLocation, InventoryError>;

    /// Instructs the inventory system to fetch an image and returns the stored attachment.
    fn attach_image_from_url(&self, url: &str) -> Result<Attachment, InventoryError>;

    fn update_part(&self, part: &Part) -> Result<(), InventoryError>;
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Request failed. url: {url}, cause: {cause}")]
    Request {
        url: String,
        #[source]
        cause: reqwest::Error,
    },
    #[error("Unexpected status. url: {url}, status: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Malformed response. url: {url}, cause: {cause}")]
    Malformed {
        url: String,
        #[source]
        cause: reqwest::Error,
    },
}
