use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    pub handle: String,
    pub title: String,
    // Absent on some storefronts; zero means the collection is skipped.
    #[serde(default)]
    pub products_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    // The handle doubles as the base SKU in the output.
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub body_html: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductImage {
    pub src: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductOption {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
    pub id: u64,
    pub title: String,
    pub price: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedImage {
    pub src: String,
}

impl Variant {
    /// Option value at a 1-based position. Shopify exposes at most three
    /// option slots per variant, so positions past 3 read as absent.
    pub fn option_value(&self, position: usize) -> Option<&str> {
        match position {
            1 => self.option1.as_deref(),
            2 => self.option2.as_deref(),
            3 => self.option3.as_deref(),
            _ => None,
        }
    }
}
