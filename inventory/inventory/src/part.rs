use crate::iri::Iri;
use crate::manufacturer::ManufacturerRef;
use crate::storage_location::StorageLocationRef;

/// An inventory record.
///
/// Parts are mutated in place during a batch action and persisted with a single
/// [`update_part`](crate::api::InventoryApi::update_part) call; nested link objects carry their
/// own IRIs so the server can reconcile them.
#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Part {
    #[serde(rename = "@id")]
    pub id: Iri,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: CategoryRef,
    #[serde(default)]
    pub manufacturers: Vec<PartManufacturer>,
    #[serde(default)]
    pub distributors: Vec<PartDistributor>,
    #[serde(default)]
    pub parameters: Vec<PartParameter>,
    #[serde(rename = "storageLocation", default)]
    pub storage_location: Option<StorageLocationRef>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "@id")]
    pub id: Iri,
    pub name: String,
}

/// Links a part to a manufacturer, with the manufacturer's own part number.
#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PartManufacturer {
    #[serde(rename = "@id")]
    pub id: Iri,
    pub manufacturer: ManufacturerRef,
    #[serde(rename = "partNumber", default)]
    pub part_number: String,
}

/// Links a part to a distributor catalog entry.
#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PartDistributor {
    #[serde(rename = "@id")]
    pub id: Iri,
    pub distributor: DistributorRef,
    #[serde(rename = "orderNumber")]
    pub order_number: String,
    /// Cached unit price, refreshed from the lowest-quantity price break during sync.
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct DistributorRef {
    #[serde(rename = "@id")]
    pub id: Iri,
    pub name: String,
}

/// A name/value pair on a part. Names are unique per part.
///
/// All values are plain text; the inventory system's unit handling is not used.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PartParameter {
    pub name: String,
    #[serde(rename = "stringValue", default)]
    pub string_value: String,
}

#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Attachment {
    #[serde(rename = "@id")]
    pub id: Iri,
    #[serde(rename = "isImage", default)]
    pub is_image: bool,
}
