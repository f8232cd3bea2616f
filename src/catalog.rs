//! Catalog
//!
//! Loads products and rate sheets from YAML files laid out as
//! `<base>/products/<name>.yml` and `<base>/rates/<name>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    pricing::{PriceBreakdown, board_price_breakdown, calculate_board_price},
    products::{Product, ProductKey, ProductRecord},
    rates::RateBoard,
};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading catalog files
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product key already loaded
    #[error("Duplicate product: {0}")]
    DuplicateProduct(String),
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct ProductsFile {
    products: FxHashMap<String, ProductRecord>,
}

/// A priced catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct CatalogLine<'c> {
    /// Catalog key
    pub key: &'c str,

    /// The product
    pub product: &'c Product,

    /// Price rounded once after summing
    pub dynamic_price: i64,

    /// Price split into rounded parts
    pub breakdown: PriceBreakdown,
}

/// Products and the rate board they are priced against.
#[derive(Debug)]
pub struct Catalog {
    /// Base path for catalog files
    base_path: PathBuf,

    products: SlotMap<ProductKey, Product>,

    /// String key -> `SlotMap` key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    rates: RateBoard,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty catalog with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            rates: RateBoard::default(),
        }
    }

    /// Load products from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a product
    /// key has already been loaded. Nothing is added when loading fails.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let file: ProductsFile = serde_norway::from_str(&contents)?;
        let count = file.products.len();

        if let Some(key) = file
            .products
            .keys()
            .find(|key| self.product_keys.contains_key(key.as_str()))
        {
            return Err(CatalogError::DuplicateProduct(key.clone()));
        }

        for (key, record) in file.products {
            self.insert(key, Product::from(record))?;
        }

        tracing::info!(path = %file_path.display(), count, "loaded products");

        Ok(self)
    }

    /// Load a rate sheet from a YAML file, replacing the current board
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_rates(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let file_path = self.base_path.join("rates").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.rates = serde_norway::from_str(&contents)?;

        tracing::info!(path = %file_path.display(), "loaded rates");

        Ok(self)
    }

    /// Add a product under a catalog key
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if the key is already used.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        product: Product,
    ) -> Result<ProductKey, CatalogError> {
        let key = key.into();

        if self.product_keys.contains_key(&key) {
            return Err(CatalogError::DuplicateProduct(key));
        }

        let product_key = self.products.insert(product);
        self.product_keys.insert(key, product_key);

        Ok(product_key)
    }

    /// Look up a product by catalog key
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has the key.
    pub fn product(&self, key: &str) -> Result<&Product, CatalogError> {
        self.product_keys
            .get(key)
            .and_then(|product_key| self.products.get(*product_key))
            .ok_or_else(|| CatalogError::ProductNotFound(key.to_string()))
    }

    /// Current rate board
    pub fn rates(&self) -> &RateBoard {
        &self.rates
    }

    /// Mutable rate board, for refreshing quotes
    pub fn rates_mut(&mut self) -> &mut RateBoard {
        &mut self.rates
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Price a single product against the current board
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has the key.
    pub fn price(&self, key: &str) -> Result<PriceBreakdown, CatalogError> {
        let product = self.product(key)?;

        Ok(board_price_breakdown(product, &self.rates))
    }

    /// Price every product against the current board, ordered by key
    pub fn price_all(&self) -> Vec<CatalogLine<'_>> {
        let mut lines: Vec<CatalogLine<'_>> = self
            .product_keys
            .iter()
            .filter_map(|(key, product_key)| {
                let product = self.products.get(*product_key)?;

                Some(CatalogLine {
                    key: key.as_str(),
                    product,
                    dynamic_price: calculate_board_price(product, &self.rates),
                    breakdown: board_price_breakdown(product, &self.rates),
                })
            })
            .collect();

        lines.sort_by_key(|line| line.key);

        lines
    }
}
