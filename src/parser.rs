use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{Collection, Product};

// Both endpoints wrap their payload in a single-field envelope. A document
// without that field reads as an empty catalog rather than an error.
#[derive(Deserialize)]
struct CollectionsDoc {
    #[serde(default)]
    collections: Vec<Collection>,
}

#[derive(Deserialize)]
struct ProductsDoc {
    #[serde(default)]
    products: Vec<Product>,
}

pub fn load_collections(path: &Path) -> Result<Vec<Collection>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_collections(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_products(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_collections(json: &str) -> Result<Vec<Collection>> {
    let doc: CollectionsDoc = serde_json::from_str(json)?;
    Ok(doc.collections)
}

pub fn parse_products(json: &str) -> Result<Vec<Product>> {
    let doc: ProductsDoc = serde_json::from_str(json)?;
    Ok(doc.products)
}
