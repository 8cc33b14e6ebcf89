//! Catalog filter state as edited on the catalog screen.

use crate::catalog::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field the catalog is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "price")]
    Price,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
            SortKey::Rating => "rating",
            SortKey::Price => "price",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "createdAt" => Some(SortKey::CreatedAt),
            "rating" => Some(SortKey::Rating),
            "price" => Some(SortKey::Price),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// The sort dropdown's options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortChoice {
    Recommended,
    BestRated,
    PriceAscending,
    PriceDescending,
}

impl SortChoice {
    pub const ALL: [SortChoice; 4] = [
        SortChoice::Recommended,
        SortChoice::BestRated,
        SortChoice::PriceAscending,
        SortChoice::PriceDescending,
    ];

    pub fn key_and_order(&self) -> (SortKey, SortOrder) {
        match self {
            SortChoice::Recommended => (SortKey::CreatedAt, SortOrder::Desc),
            SortChoice::BestRated => (SortKey::Rating, SortOrder::Desc),
            SortChoice::PriceAscending => (SortKey::Price, SortOrder::Asc),
            SortChoice::PriceDescending => (SortKey::Price, SortOrder::Desc),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortChoice::Recommended => "Recommended",
            SortChoice::BestRated => "Best Rated",
            SortChoice::PriceAscending => "Price Ascending",
            SortChoice::PriceDescending => "Price Descending",
        }
    }

    /// Dropdown value, e.g. `price-asc`.
    pub fn value(&self) -> String {
        let (key, order) = self.key_and_order();
        format!("{}-{}", key.as_str(), order.as_str())
    }

    /// Parse a dropdown value back into a choice.
    pub fn parse(value: &str) -> Option<Self> {
        let (key, order) = value.split_once('-')?;
        let pair = (SortKey::from_str(key)?, SortOrder::from_str(order)?);
        Self::ALL.into_iter().find(|c| c.key_and_order() == pair)
    }
}

impl fmt::Display for SortChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// User-selected narrowing and sorting criteria.
///
/// Strings hold raw input; price bounds are not parsed here and reach the
/// API exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: String,
    pub brand: String,
    pub min_price: String,
    pub max_price: String,
    pub color: String,
    pub size: String,
    pub in_stock: bool,
    pub featured: bool,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Fresh state for a screen opened on a category route.
    pub fn for_category(route_category: Option<&str>) -> Self {
        Self {
            category: route_category.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// "Clear all filters": everything back to default except the route category.
    pub fn cleared(route_category: Option<&str>) -> Self {
        Self::for_category(route_category)
    }

    pub fn apply_sort(&mut self, choice: SortChoice) {
        let (key, order) = choice.key_and_order();
        self.sort_by = key;
        self.sort_order = order;
    }

    /// The dropdown entry matching the current key/order, if any.
    pub fn sort_choice(&self) -> Option<SortChoice> {
        SortChoice::ALL
            .into_iter()
            .find(|c| c.key_and_order() == (self.sort_by, self.sort_order))
    }

    /// True when nothing differs from the defaults.
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }
}

/// Values offered by the filter sidebar, from `GET /api/products/filters`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl FilterOptions {
    /// (value, label) pairs for the category dropdown; `ladies-jeans` shows as `Ladies Jeans`.
    pub fn category_choices(&self) -> Vec<(&str, String)> {
        self.categories
            .iter()
            .map(|c| (c.as_str(), Category::new(c.as_str()).title_case()))
            .collect()
    }
}
