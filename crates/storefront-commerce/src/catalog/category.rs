//! Category keys and the storefront's category table.
//!
//! Categories are an open set of slugs owned by the API. The tables below
//! cover the slugs the storefront knows how to label and group; unknown
//! slugs still round-trip and display verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category slug such as `ladies-jeans`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Human label from the known table, falling back to the raw slug.
    pub fn display_name(&self) -> &str {
        CATEGORY_NAMES
            .iter()
            .find(|(slug, _)| *slug == self.0)
            .map(|(_, name)| *name)
            .unwrap_or(&self.0)
    }

    /// Dropdown label: each dash-separated word capitalized ("Hoodies Sweaters").
    pub fn title_case(&self) -> String {
        self.0
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Departments listing this category (a slug may sit in several).
    pub fn departments(&self) -> Vec<Department> {
        Department::ALL
            .iter()
            .copied()
            .filter(|d| d.categories().contains(&self.0.as_str()))
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Display names for known slugs.
const CATEGORY_NAMES: &[(&str, &str)] = &[
    ("tshirt", "Men's T-Shirts"),
    ("shirt", "Men's Shirts"),
    ("jeans", "Men's Jeans"),
    ("sneakers", "Men's Sneakers"),
    ("cargo", "Men's Cargo"),
    ("trousers", "Men's Trousers"),
    ("hoodies-sweaters", "Men's Hoodies & Sweaters"),
    ("flipflop", "Men's Flip Flops"),
    ("men-sport", "Men's Sport"),
    ("men-accessories", "Men's Accessories"),
    ("ladies-tshirt", "Ladies' T-Shirts"),
    ("ladies-shirt", "Ladies' Shirts"),
    ("ladies-jeans", "Ladies' Jeans"),
    ("ladies-shorts", "Ladies' Shorts"),
    ("coord-set", "Ladies' Co-ord Sets"),
    ("ladies-cargo", "Ladies' Cargo"),
    ("ladies-trousers", "Ladies' Trousers"),
    ("ladies-hoodies", "Ladies' Hoodies"),
    ("ladies-sport", "Ladies' Sport"),
    ("ladies-clothing", "Ladies' Clothing"),
    ("ladies-accessories", "Ladies' Accessories"),
    ("lingerie", "Ladies' Lingerie"),
    ("mobile", "Mobile Phones"),
    ("watches", "Watches"),
    ("bags", "Bags"),
    ("ladies", "Ladies' Collection"),
    ("kids-clothing", "Kids' Clothing"),
    ("kids-shoes", "Kids' Shoes"),
    ("kids-accessories", "Kids' Accessories"),
    ("boys", "Boys Collection"),
    ("girls", "Girls Collection"),
    ("infants", "Infants"),
    ("activewear", "Activewear"),
    ("performance", "Performance gear"),
    ("gym-gear", "Gym Essentials"),
    ("running", "Running Gear"),
    ("training", "Training Wear"),
];

/// Top-level grouping used by the admin product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Men,
    Ladies,
    Kids,
    Sports,
    Other,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Men,
        Department::Ladies,
        Department::Kids,
        Department::Sports,
        Department::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Men => "MEN",
            Department::Ladies => "LADIES",
            Department::Kids => "KIDS",
            Department::Sports => "SPORTS",
            Department::Other => "OTHER",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MEN" => Some(Department::Men),
            "LADIES" => Some(Department::Ladies),
            "KIDS" => Some(Department::Kids),
            "SPORTS" => Some(Department::Sports),
            "OTHER" => Some(Department::Other),
            _ => None,
        }
    }

    /// Sub-category slugs offered once this department is selected.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Department::Men => &[
                "tshirt",
                "shirt",
                "cargo",
                "jeans",
                "trousers",
                "hoodies-sweaters",
                "flipflop",
                "sneakers",
                "men-clothing",
                "men-accessories",
                "men-sport",
            ],
            Department::Ladies => &[
                "ladies-tshirt",
                "ladies-shirt",
                "ladies-cargo",
                "ladies-jeans",
                "ladies-trousers",
                "ladies-hoodies",
                "ladies-shorts",
                "coord-set",
                "ladies-clothing",
                "ladies-shoes",
                "ladies-accessories",
                "lingerie",
                "ladies-sport",
            ],
            Department::Kids => &[
                "kids-clothing",
                "kids-shoes",
                "kids-accessories",
                "boys",
                "girls",
                "infants",
            ],
            Department::Sports => &[
                "activewear",
                "performance",
                "gym-gear",
                "running",
                "training",
                "men-sport",
                "ladies-sport",
            ],
            Department::Other => &[
                "sneakers",
                "shirts",
                "pants",
                "mobile",
                "watches",
                "bags",
                "apparel",
                "accessories",
                "collectibles",
            ],
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
