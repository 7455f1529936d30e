use reqwest::blocking::Client;
use tracing::debug;

use crate::{normalize_photo_url, CatalogError, PartCatalog, PartData, PriceBreak};

const BASE_URL: &str = "https://api.mouser.com";

/// Mouser search API. One part-number search returns details and price breaks; Mouser exposes
/// no parameter data.
pub struct MouserCatalog {
    api_key: String,
    client: Client,
}

impl MouserCatalog {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
        }
    }
}

impl PartCatalog for MouserCatalog {
    fn name(&self) -> &str {
        "Mouser"
    }

    fn fetch_part_data(&self, order_no: &str) -> Result<PartData, CatalogError> {
        let url = format!("{}/api/v1/search/partnumber", BASE_URL);
        debug!("POST {} part number: {}", url, order_no);

        let response = self
            .client
            .post(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .json(&SearchRequest {
                search_by_part_request: SearchByPartRequest {
                    mouser_part_number: order_no,
                },
            })
            .send()
            .map_err(|cause| CatalogError::Request {
                url: url.clone(),
                cause,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Api {
                message: format!("HTTP status {}", status),
            });
        }

        let envelope: SearchResponse = response.json().map_err(|cause| CatalogError::Malformed {
            url: url.clone(),
            cause,
        })?;

        assemble(envelope, order_no)
    }
}

#[derive(serde::Serialize)]
struct SearchRequest<'a> {
    #[serde(rename = "SearchByPartRequest")]
    search_by_part_request: SearchByPartRequest<'a>,
}

#[derive(serde::Serialize)]
struct SearchByPartRequest<'a> {
    #[serde(rename = "mouserPartNumber")]
    mouser_part_number: &'a str,
}

#[derive(serde::Deserialize)]
struct SearchResponse {
    #[serde(rename = "Errors", default)]
    errors: Vec<ApiError>,
    #[serde(rename = "SearchResults")]
    search_results: Option<SearchResults>,
}

#[derive(serde::Deserialize)]
struct ApiError {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

#[derive(serde::Deserialize)]
struct SearchResults {
    #[serde(rename = "NumberOfResult", default)]
    number_of_result: u32,
    #[serde(rename = "Parts", default)]
    parts: Vec<MouserPart>,
}

#[derive(serde::Deserialize)]
struct MouserPart {
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Manufacturer", default)]
    manufacturer: String,
    #[serde(rename = "ManufacturerPartNumber", default)]
    manufacturer_part_number: String,
    #[serde(rename = "ImagePath", default)]
    image_path: Option<String>,
    #[serde(rename = "PriceBreaks", default)]
    price_breaks: Vec<MouserPriceBreak>,
}

#[derive(serde::Deserialize)]
struct MouserPriceBreak {
    #[serde(rename = "Quantity")]
    quantity: u32,
    /// Localized string such as `"0,078 €"`.
    #[serde(rename = "Price")]
    price: String,
}

fn assemble(envelope: SearchResponse, order_no: &str) -> Result<PartData, CatalogError> {
    if !envelope.errors.is_empty() {
        let message = envelope
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.code, error.message))
            .collect::<Vec<_>>()
            .join(", ");

        return Err(CatalogError::Api {
            message,
        });
    }

    let mut results = envelope.search_results.unwrap_or(SearchResults {
        number_of_result: 0,
        parts: vec![],
    });

    if results.number_of_result == 0 || results.parts.is_empty() {
        return Err(CatalogError::NoResults {
            order_no: order_no.to_string(),
        });
    }

    let part = results.parts.remove(0);

    let prices = part
        .price_breaks
        .into_iter()
        .map(|price_break| {
            Ok(PriceBreak {
                quantity: price_break.quantity,
                price: parse_price(&price_break.price)?,
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;

    let photo_url = part
        .image_path
        .filter(|url| !url.is_empty())
        .map(|url| normalize_photo_url(&url));

    Ok(PartData {
        description: part.description,
        manufacturer: part.manufacturer,
        manufacturer_part_no: part.manufacturer_part_number,
        photo_url,
        parameters: None,
        prices,
    })
}

/// Parses a localized price string: first token, comma accepted as the decimal separator.
fn parse_price(value: &str) -> Result<f64, CatalogError> {
    let malformed = || CatalogError::MalformedPrice {
        value: value.to_string(),
    };

    let token = value.split_whitespace().next().ok_or_else(malformed)?;

    token.replace(',', ".").parse::<f64>().map_err(|_| malformed())
}
