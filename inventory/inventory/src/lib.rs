//! Domain model and API access for the parts inventory system.
//!
//! The inventory system speaks JSON-LD; every persisted record carries an `@id` IRI and list
//! endpoints wrap their results in a hydra collection envelope.

pub mod api;
pub mod client;
pub mod iri;
pub mod manufacturer;
pub mod part;
pub mod storage_location;
