//! Catalog Fixtures
//!
//! YAML catalog files, in the shape the menu page is generated from:
//!
//! ```yaml
//! products:
//!   - name: Assorted cookies
//!     prices:
//!       6: "12.00"
//!       12: "22.00"
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, ProductDescriptor},
    packs::{PackSize, UnknownPackSize},
};

/// Catalog fixture errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the fixture file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A price was listed for a pack size that doesn't exist
    #[error("Product {product}: {source}")]
    UnknownPackSize {
        /// Product name
        product: String,

        /// Offending pack size
        source: UnknownPackSize,
    },
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in menu order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Pieces per pack -> price string (e.g., `"12.00"`)
    #[serde(default)]
    pub prices: BTreeMap<u8, String>,
}

impl TryFrom<ProductFixture> for ProductDescriptor {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let mut attributes = Vec::with_capacity(fixture.prices.len());

        for (pieces, price) in &fixture.prices {
            let pack = PackSize::try_from(*pieces).map_err(|source| {
                CatalogError::UnknownPackSize {
                    product: fixture.name.clone(),
                    source,
                }
            })?;

            attributes.push((pack, Some(price.as_str())));
        }

        Ok(ProductDescriptor::from_attributes(
            fixture.name.as_str(),
            attributes,
        ))
    }
}

impl Catalog {
    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or lists an unknown pack size.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        fixture
            .products
            .into_iter()
            .map(ProductDescriptor::try_from)
            .collect()
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }
}
