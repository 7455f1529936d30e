//! Distributor catalog access.
//!
//! Each supported distributor implements [`PartCatalog`], normalizing its API responses into one
//! canonical [`PartData`] shape so the sync loop never sees distributor-specific fields.

pub mod mouser;
pub mod tme;

use indexmap::IndexMap;
use thiserror::Error;

/// Canonical part data for one order number, as reported by one distributor.
///
/// Transient: lives for the duration of a single sync step.
#[derive(Debug, Clone, Default)]
pub struct PartData {
    pub description: String,
    pub manufacturer: String,
    pub manufacturer_part_no: String,
    pub photo_url: Option<String>,
    /// Present only for distributors that expose parameters (TME does, Mouser does not).
    /// Order is preserved as returned.
    pub parameters: Option<IndexMap<String, String>>,
    pub prices: Vec<PriceBreak>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreak {
    pub quantity: u32,
    pub price: f64,
}

impl PartData {
    /// The price of the lowest-quantity break, regardless of list order.
    pub fn lowest_quantity_price(&self) -> Option<f64> {
        self.prices
            .iter()
            .min_by_key(|price_break| price_break.quantity)
            .map(|price_break| price_break.price)
    }
}

/// One distributor's catalog: "fetch canonical part data for order number X".
pub trait PartCatalog {
    /// Distributor name as it appears on inventory distributor links.
    fn name(&self) -> &str;

    fn fetch_part_data(&self, order_no: &str) -> Result<PartData, CatalogError>;
}

/// Finds the catalog serving a distributor link, by distributor name.
pub fn catalog_for<'a>(catalogs: &'a [Box<dyn PartCatalog>], distributor_name: &str) -> Option<&'a dyn PartCatalog> {
    catalogs
        .iter()
        .find(|catalog| catalog.name() == distributor_name)
        .map(|catalog| catalog.as_ref())
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API error. message: {message}")]
    Api {
        message: String,
    },
    #[error("No results. order number: '{order_no}'")]
    NoResults {
        order_no: String,
    },
    #[error("Malformed price. value: '{value}'")]
    MalformedPrice {
        value: String,
    },
    #[error("Request failed. url: {url}, cause: {cause}")]
    Request {
        url: String,
        #[source]
        cause: reqwest::Error,
    },
    #[error("Malformed response. url: {url}, cause: {cause}")]
    Malformed {
        url: String,
        #[source]
        cause: reqwest::Error,
    },
}

/// Prefixes scheme-relative photo URLs so they can be fetched directly.
pub fn normalize_photo_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_quantity_break_wins_regardless_of_order() {
        // given
        let part_data = PartData {
            prices: vec![
                PriceBreak {
                    quantity: 100,
                    price: 0.01,
                },
                PriceBreak {
                    quantity: 1,
                    price: 0.10,
                },
                PriceBreak {
                    quantity: 10,
                    price: 0.05,
                },
            ],
            ..PartData::default()
        };

        // when, then
        assert_eq!(part_data.lowest_quantity_price(), Some(0.10));
    }

    #[test]
    fn no_prices_means_no_price() {
        assert_eq!(PartData::default().lowest_quantity_price(), None);
    }

    #[test]
    fn scheme_relative_photo_urls_become_https() {
        assert_eq!(
            normalize_photo_url("//cdn.example.com/photo.jpg"),
            "https://cdn.example.com/photo.jpg"
        );
        assert_eq!(
            normalize_photo_url("https://cdn.example.com/photo.jpg"),
            "https://cdn.example.com/photo.jpg"
        );
    }
}
