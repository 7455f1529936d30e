use indexmap::IndexMap;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{normalize_photo_url, CatalogError, PartCatalog, PartData, PriceBreak};

const BASE_URL: &str = "https://api.tme.eu";

/// TME catalog API. Product data, prices and parameters come from three separate endpoints.
pub struct TmeCatalog {
    token: String,
    client: Client,
}

impl TmeCatalog {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Issues one product query and unwraps the single-product response envelope.
    fn first_product<T: DeserializeOwned>(&self, path: &str, order_no: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", BASE_URL, path);
        debug!("POST {} symbol: {}", url, order_no);

        let response = self
            .client
            .post(&url)
            .form(&[("Token", self.token.as_str()), ("SymbolList[0]", order_no)])
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

        let envelope: TmeResponse<TmeProductList<T>> =
            response.json().map_err(|cause| CatalogError::Malformed {
                url: url.clone(),
                cause,
            })?;

        if envelope.status != "OK" {
            return Err(CatalogError::Api {
                message: envelope.status,
            });
        }

        let mut product_list = envelope
            .data
            .map(|data| data.product_list)
            .unwrap_or_default();

        if product_list.is_empty() {
            return Err(CatalogError::NoResults {
                order_no: order_no.to_string(),
            });
        }

        Ok(product_list.remove(0))
    }
}

impl PartCatalog for TmeCatalog {
    fn name(&self) -> &str {
        "TME"
    }

    fn fetch_part_data(&self, order_no: &str) -> Result<PartData, CatalogError> {
        let product: TmeProduct = self.first_product("/Products/GetProducts.json", order_no)?;
        let prices: TmePrices = self.first_product("/Products/GetPrices.json", order_no)?;
        let parameters: TmeParameters = self.first_product("/Products/GetParameters.json", order_no)?;

        Ok(assemble(product, prices, parameters))
    }
}

#[derive(serde::Deserialize)]
struct TmeResponse<T> {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Data")]
    data: Option<T>,
}

#[derive(serde::Deserialize)]
struct TmeProductList<T> {
    #[serde(rename = "ProductList")]
    product_list: Vec<T>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TmeProduct {
    symbol: String,
    #[serde(default)]
    original_symbol: Option<String>,
    producer: String,
    description: String,
    #[serde(default)]
    photo: Option<String>,
}

#[derive(serde::Deserialize)]
struct TmePrices {
    #[serde(rename = "PriceList")]
    price_list: Vec<TmePriceEntry>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TmePriceEntry {
    amount: u32,
    price_value: f64,
}

#[derive(serde::Deserialize)]
struct TmeParameters {
    #[serde(rename = "ParameterList")]
    parameter_list: Vec<TmeParameterEntry>,
}

#[derive(serde::Deserialize)]
struct TmeParameterEntry {
    #[serde(rename = "ParameterName")]
    name: String,
    #[serde(rename = "ParameterValue")]
    value: String,
}

fn assemble(product: TmeProduct, prices: TmePrices, parameters: TmeParameters) -> PartData {
    // The original catalog symbol is authoritative when TME lists a part under its own symbol.
    let manufacturer_part_no = product
        .original_symbol
        .filter(|symbol| !symbol.is_empty())
        .unwrap_or(product.symbol);

    let photo_url = product
        .photo
        .filter(|url| !url.is_empty())
        .map(|url| normalize_photo_url(&url));

    let parameters: IndexMap<String, String> = parameters
        .parameter_list
        .into_iter()
        .map(|entry| (entry.name, entry.value))
        .collect();

    let prices = prices
        .price_list
        .into_iter()
        .map(|entry| PriceBreak {
            quantity: entry.amount,
            price: entry.price_value,
        })
        .collect();

    PartData {
        description: product.description,
        manufacturer: product.producer,
        manufacturer_part_no,
        photo_url,
        parameters: Some(parameters),
        prices,
    }
}
