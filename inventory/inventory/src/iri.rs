use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Identifier of a record in the inventory system, e.g. `/api/parts/42`.
///
/// The numeric tail is what ends up in barcodes and sort keys; everywhere else the IRI is
/// treated as an opaque token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing path segment parsed as a record number.
    pub fn numeric_id(&self) -> Result<u64, IriError> {
        let segment = self
            .0
            .rsplit('/')
            .next()
            .unwrap_or_default();

        segment
            .parse::<u64>()
            .map_err(|cause| IriError::NotNumeric {
                iri: self.0.clone(),
                cause,
            })
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IriError::Empty);
        }
        Ok(Iri(s.to_string()))
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum IriError {
    #[error("Empty IRI")]
    Empty,
    #[error("IRI does not end in a record number. iri: '{iri}', cause: {cause}")]
    NotNumeric {
        iri: String,
        cause: ParseIntError,
    },
}
