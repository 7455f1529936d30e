use crate::iri::Iri;

/// A manufacturer known to the inventory system.
#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Manufacturer {
    #[serde(rename = "@id")]
    pub id: Iri,
    pub name: String,
}

/// Reference to a manufacturer as embedded in a part's manufacturer link.
#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ManufacturerRef {
    #[serde(rename = "@id")]
    pub id: Iri,
    #[serde(default)]
    pub name: String,
}
