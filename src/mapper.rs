use std::collections::HashMap;

use indexmap::IndexMap;
use regex::Regex;

use crate::models::Product;

/// One output row. Insertion order is the column order; re-inserting an
/// existing key keeps its original position, which variation rows rely on
/// when they overwrite SKU and Name inside the shared field prefix.
pub type OutputRow = IndexMap<String, String>;

/// Accumulates output rows across collections, deduplicating products by
/// SKU (the product handle). Only parent/simple rows enter the index;
/// variation SKUs carry a `-{variant id}` suffix and never collide.
#[derive(Debug, Default)]
pub struct RowCollector {
    rows: Vec<OutputRow>,
    sku_index: HashMap<String, usize>,
}

impl RowCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<OutputRow> {
        self.rows
    }

    /// Fold one product, listed under `category`, into the accumulator.
    pub fn add_product(&mut self, product: &Product, category: &str) {
        // A product already seen under an earlier collection only gains a
        // category; its variants and options are not reprocessed.
        if let Some(&index) = self.sku_index.get(product.handle.as_str()) {
            let row = &mut self.rows[index];
            if let Some(categories) = row.get_mut("Categories") {
                categories.push_str(", ");
                categories.push_str(category);
                log::info!(
                    "handle={} encountered again, it now has {} Categories.",
                    product.handle,
                    categories.split(", ").count()
                );
            }
            return;
        }

        if product.variants.is_empty() {
            // Nothing to price or stock; an empty row would not import.
            log::warn!("Skipping {}: product has no variants.", product.handle);
            return;
        }

        let common = common_fields(product, category);
        let sku = product.handle.clone();

        if product.variants.len() < 2 {
            let mut row = common;
            row.insert("Type".into(), "simple".into());
            let variant = &product.variants[0];
            row.insert("Regular price".into(), variant.price.clone());
            row.insert("In stock?".into(), flag(variant.available).into());
            self.push_indexed(sku, row);
            return;
        }

        let mut parent = common.clone();
        parent.insert("Type".into(), "variable".into());
        self.push_indexed(sku.clone(), parent);

        let image_urls: Vec<String> =
            product.images.iter().map(|image| image.src.clone()).collect();

        for variant in &product.variants {
            let mut row = common.clone();
            row.insert("Type".into(), "variation".into());
            row.insert("Parent".into(), sku.clone());
            row.insert("SKU".into(), format!("{sku}-{}", variant.id));
            row.insert(
                "Name".into(),
                format!("{} - {}", product.title, variant.title.replace(" / ", " ")),
            );
            row.insert("Regular price".into(), variant.price.clone());
            row.insert("In stock?".into(), flag(variant.available).into());

            // Option names stay those of the parent; the value column
            // narrows from the joined list to this variant's single value.
            for (i, option) in product.options.iter().enumerate() {
                let position = i + 1;
                row.insert(format!("Attribute {position} name"), option.name.clone());
                row.insert(
                    format!("Attribute {position} value(s)"),
                    variant.option_value(position).unwrap_or_default().to_string(),
                );
            }

            // Promote the variant's featured image to the front of a
            // row-local copy of the image list; other rows keep source order.
            if let Some(featured) = &variant.featured_image {
                let mut urls = image_urls.clone();
                urls.retain(|url| url != &featured.src);
                urls.insert(0, featured.src.clone());
                row.insert("Images".into(), urls.join(", "));
            }

            self.rows.push(row);
        }
    }

    fn push_indexed(&mut self, sku: String, row: OutputRow) {
        self.sku_index.insert(sku, self.rows.len());
        self.rows.push(row);
    }
}

/// Discount percentage from the first "Subscribe & Save N%" occurrence in a
/// product description. The pattern is case-sensitive.
pub fn subscription_discount(description: &str) -> Option<u32> {
    let pattern = Regex::new(r"Subscribe & Save (\d+)%").unwrap();
    pattern
        .captures(description)
        .and_then(|caps| caps[1].parse().ok())
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn common_fields(product: &Product, category: &str) -> OutputRow {
    let mut row = OutputRow::new();
    row.insert("SKU".into(), product.handle.clone());
    row.insert("Name".into(), product.title.clone());
    let description = product.body_html.replace('\n', "");
    row.insert("Description".into(), description.clone());
    row.insert("Categories".into(), category.to_string());
    row.insert("Tags".into(), product.tags.join(", "));
    let image_urls: Vec<&str> = product.images.iter().map(|image| image.src.as_str()).collect();
    row.insert("Images".into(), image_urls.join(", "));

    match subscription_discount(&description) {
        Some(discount) => {
            row.insert("Subscriptions Enabled".into(), "1".into());
            row.insert("Subscription Discount".into(), discount.to_string());
        }
        None => {
            row.insert("Subscriptions Enabled".into(), "0".into());
            row.insert("Subscription Discount".into(), String::new());
        }
    }

    for (i, option) in product.options.iter().enumerate() {
        let position = i + 1;
        row.insert(format!("Attribute {position} name"), option.name.clone());
        row.insert(format!("Attribute {position} value(s)"), option.values.join(", "));
        row.insert(format!("Attribute {position} visible"), "1".into());
        row.insert(format!("Attribute {position} global"), "1".into());
    }

    // WooCommerce import columns with no counterpart in the source data.
    for (column, value) in [
        ("Is featured?", "0"),
        ("Stock", ""),
        ("Backorders allowed?", "0"),
        ("Sold individually?", "0"),
        ("Length (in)", ""),
        ("Width (in)", ""),
        ("Height (in)", ""),
        ("Allow customer reviews?", "0"),
        ("Published", "1"),
        ("Visibility in catalog", "visible"),
    ] {
        row.insert(column.into(), value.into());
    }

    row
}
