//! Product records as served by the catalog API, plus the admin product form.

use std::collections::BTreeMap;

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Stock for one size label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeStock {
    /// Size label (e.g., "M", "32").
    pub size: String,
    /// Units on hand.
    #[serde(default)]
    pub stock: i64,
}

impl SizeStock {
    pub fn new(size: impl Into<String>, stock: i64) -> Self {
        Self {
            size: size.into(),
            stock,
        }
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Images and sizes specific to one color.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ColorVariant {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<SizeStock>,
}

/// A product in the catalog.
///
/// Every field is defaulted on decode: the API occasionally returns
/// partial documents, and [`Product::is_renderable`] decides what reaches
/// a card instead of failing the whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", default)]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_category: Option<String>,
    #[serde(with = "money::decimal", default)]
    pub price: Money,
    #[serde(with = "money::decimal_opt", default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Ordered image URLs; the first is the card image.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub color_variants: BTreeMap<String, ColorVariant>,
    #[serde(default)]
    pub sizes: Vec<SizeStock>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub num_reviews: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Create a minimal product; used by fixtures and the admin form.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, category: impl Into<Category>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            in_stock: true,
            ..Default::default()
        }
    }

    /// Whether a card can be drawn without broken fields.
    pub fn is_renderable(&self) -> bool {
        !self.id.is_empty()
            && !self.name.trim().is_empty()
            && !self.category.is_empty()
            && self.images.iter().any(|img| !img.trim().is_empty())
    }

    /// Check if the product has a higher original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|op| op.amount_minor > self.price.amount_minor)
            .unwrap_or(false)
    }

    /// Rounded savings percentage when on sale.
    pub fn savings_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.amount_minor <= self.price.amount_minor || original.amount_minor <= 0 {
            return None;
        }
        let saved = (original.amount_minor - self.price.amount_minor) as f64;
        Some((saved / original.amount_minor as f64 * 100.0).round() as u32)
    }

    /// Sum of stock across the default size list.
    pub fn total_stock(&self) -> i64 {
        self.sizes.iter().map(|s| s.stock.max(0)).sum()
    }

    /// Variant data for a color, when the product carries per-color data.
    pub fn color_variant(&self, color: &str) -> Option<&ColorVariant> {
        self.color_variants.get(color)
    }

    /// First image for listings.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Raw admin product form, fields as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: String,
    pub original_price: String,
    pub main_category: String,
    pub category: String,
    pub images: Vec<String>,
    /// (size label, stock as typed)
    pub sizes: Vec<(String, String)>,
    pub colors: Vec<String>,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
}

impl ProductDraft {
    /// Clean the form into the payload sent to the API.
    ///
    /// Blank images, colors, tags and size rows are dropped; a blank or
    /// unparsable original price is omitted.
    pub fn clean(&self) -> Result<Product, CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::Validation("Product name is required".into()));
        }
        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| CommerceError::Validation("Price must be a number".into()))?;
        if price < 0.0 {
            return Err(CommerceError::Validation("Price must not be negative".into()));
        }
        let original_price = self
            .original_price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| *p > 0.0)
            .map(|p| Money::from_decimal(p, Default::default()));

        let sizes = self
            .sizes
            .iter()
            .filter(|(size, stock)| !size.trim().is_empty() && !stock.trim().is_empty())
            .map(|(size, stock)| {
                stock
                    .trim()
                    .parse::<i64>()
                    .map(|stock| SizeStock::new(size.trim(), stock))
                    .map_err(|_| CommerceError::Validation(format!("Stock for size {} must be a whole number", size.trim())))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let non_blank = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        };

        Ok(Product {
            id: ProductId::default(),
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            description: self.description.trim().to_string(),
            category: Category::new(self.category.trim()),
            main_category: Some(self.main_category.trim().to_string()).filter(|s| !s.is_empty()),
            price: Money::from_decimal(price, Default::default()),
            original_price,
            images: non_blank(&self.images),
            colors: non_blank(&self.colors),
            color_variants: BTreeMap::new(),
            sizes,
            featured: self.featured,
            in_stock: self.in_stock,
            rating: 0.0,
            num_reviews: 0,
            tags: non_blank(&self.tags),
        })
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            brand: p.brand.clone(),
            description: p.description.clone(),
            price: p.price.to_decimal().to_string(),
            original_price: p
                .original_price
                .map(|m| m.to_decimal().to_string())
                .unwrap_or_default(),
            main_category: p.main_category.clone().unwrap_or_default(),
            category: p.category.as_str().to_string(),
            images: p.images.clone(),
            sizes: p
                .sizes
                .iter()
                .map(|s| (s.size.clone(), s.stock.to_string()))
                .collect(),
            colors: p.colors.clone(),
            tags: p.tags.clone(),
            in_stock: p.in_stock,
            featured: p.featured,
        }
    }
}
