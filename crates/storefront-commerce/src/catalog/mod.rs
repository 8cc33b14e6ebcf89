//! Product catalog module.
//!
//! Contains product records, category keys and the product detail selection.

mod category;
mod product;
mod selection;

pub use category::{Category, Department};
pub use product::{ColorVariant, Product, ProductDraft, SizeStock};
pub use selection::ProductSelection;
