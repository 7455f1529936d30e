use crate::iri::Iri;

/// Category every location created by the CSV import is filed under.
pub const DEFAULT_LOCATION_CATEGORY: &str = "/api/storage_location_categories/1";

/// A storage location known to the inventory system.
#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StorageLocation {
    #[serde(rename = "@id")]
    pub id: Iri,
    pub name: String,
}

/// Reference to a storage location as embedded in a part.
#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StorageLocationRef {
    #[serde(rename = "@id")]
    pub id: Iri,
    #[serde(default)]
    pub name: String,
}
