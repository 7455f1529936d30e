use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::{InventoryApi, InventoryError};
use crate::iri::Iri;
use crate::manufacturer::Manufacturer;
use crate::part::{Attachment, Part, PartDistributor, PartManufacturer};
use crate::storage_location::{StorageLocation, DEFAULT_LOCATION_CATEGORY};

/// Blocking HTTP client for the inventory system, using basic authentication.
pub struct HttpInventoryClient {
    base_url: String,
    username: String,
    password: String,
    client: Client,
}

/// Envelope used by every list endpoint.
#[derive(serde::Deserialize)]
struct HydraCollection<T> {
    #[serde(rename = "hydra:member")]
    member: Vec<T>,
}

#[derive(serde::Serialize)]
struct IriRef<'a> {
    #[serde(rename = "@id")]
    id: &'a str,
}

#[derive(serde::Serialize)]
struct NewManufacturer<'a> {
    name: &'a str,
}

#[derive(serde::Serialize)]
struct NewPartManufacturer<'a> {
    manufacturer: IriRef<'a>,
    #[serde(rename = "partNumber")]
    part_number: &'a str,
}

#[derive(serde::Serialize)]
struct NewStorageLocation<'a> {
    name: &'a str,
    category: IriRef<'a>,
}

#[derive(serde::Serialize)]
struct UploadFromUrl<'a> {
    url: &'a str,
}

#[derive(serde::Deserialize)]
struct TempImageUpload {
    image: UploadedImage,
}

#[derive(serde::Deserialize)]
struct UploadedImage {
    #[serde(rename = "@id")]
    id: Iri,
}

impl HttpInventoryClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, InventoryError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|cause| InventoryError::Request {
                url: url.clone(),
                cause,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(InventoryError::Status {
                url,
                status,
            });
        }

        response.json().map_err(|cause| InventoryError::Malformed {
            url,
            cause,
        })
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, InventoryError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .map_err(|cause| InventoryError::Request {
                url: url.clone(),
                cause,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(InventoryError::Status {
                url,
                status,
            });
        }

        response.json().map_err(|cause| InventoryError::Malformed {
            url,
            cause,
        })
    }

    fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), InventoryError> {
        let url = self.url(path);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .map_err(|cause| InventoryError::Request {
                url: url.clone(),
                cause,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(InventoryError::Status {
                url,
                status,
            });
        }

        Ok(())
    }

    fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, InventoryError> {
        let collection: HydraCollection<T> = self.get_json(path)?;
        Ok(collection.member)
    }
}

impl InventoryApi for HttpInventoryClient {
    fn get_part(&self, id: u64) -> Result<Part, InventoryError> {
        self.get_json(&format!("/api/parts/{}", id))
    }

    fn get_parts(&self) -> Result<Vec<Part>, InventoryError> {
        self.get_collection("/api/parts")
    }

    fn get_manufacturers(&self) -> Result<Vec<Manufacturer>, InventoryError> {
        self.get_collection("/api/manufacturers")
    }

    fn create_manufacturer(&self, name: &str) -> Result<Manufacturer, InventoryError> {
        self.post_json("/api/manufacturers", &NewManufacturer {
            name,
        })
    }

    fn create_part_manufacturer(
        &self,
        manufacturer: &Iri,
        part_number: &str,
    ) -> Result<PartManufacturer, InventoryError> {
        self.post_json("/api/part_manufacturers", &NewPartManufacturer {
            manufacturer: IriRef {
                id: manufacturer.as_str(),
            },
            part_number,
        })
    }

    fn update_part_manufacturer(&self, link: &PartManufacturer) -> Result<(), InventoryError> {
        self.put_json(link.id.as_str(), link)
    }

    fn update_part_distributor(&self, link: &PartDistributor) -> Result<(), InventoryError> {
        self.put_json(link.id.as_str(), link)
    }

    fn get_storage_locations(&self) -> Result<Vec<StorageLocation>, InventoryError> {
        self.get_collection("/api/storage_locations")
    }

    fn create_storage_location(&self, name: &str) -> Result<StorageLocation, InventoryError> {
        self.post_json("/api/storage_locations", &NewStorageLocation {
            name,
            category: IriRef {
                id: DEFAULT_LOCATION_CATEGORY,
            },
        })
    }

    fn attach_image_from_url(&self, url: &str) -> Result<Attachment, InventoryError> {
        let upload: TempImageUpload = self.post_json("/api/temp_uploaded_files/upload_from_url", &UploadFromUrl {
            url,
        })?;

        Ok(Attachment {
            id: upload.image.id,
            is_image: true,
        })
    }

    fn update_part(&self, part: &Part) -> Result<(), InventoryError> {
        self.put_json(part.id.as_str(), part)
    }
}
