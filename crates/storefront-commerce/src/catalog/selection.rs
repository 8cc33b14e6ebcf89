//! Color/size/image selection on the product detail screen.

use crate::cart::CartLine;
use crate::catalog::{Product, SizeStock};
use crate::error::CommerceError;

/// What the shopper has picked so far for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSelection {
    pub color: Option<String>,
    pub size: Option<String>,
    pub image_index: usize,
}

impl ProductSelection {
    /// Initial selection: first listed color, no size, first image.
    pub fn for_product(product: &Product) -> Self {
        Self {
            color: product.colors.first().cloned(),
            size: None,
            image_index: 0,
        }
    }

    /// Changing color clears the size and rewinds the gallery.
    pub fn select_color(&mut self, color: impl Into<String>) {
        self.color = Some(color.into());
        self.size = None;
        self.image_index = 0;
    }

    pub fn select_size(&mut self, size: impl Into<String>) {
        self.size = Some(size.into());
    }

    /// Move the gallery; out-of-range indexes clamp to the first image.
    pub fn select_image(&mut self, index: usize, product: &Product) {
        self.image_index = if index < self.images(product).len() { index } else { 0 };
    }

    /// Gallery for the current color, falling back to the product images.
    pub fn images<'a>(&self, product: &'a Product) -> &'a [String] {
        match self.color.as_deref().and_then(|c| product.color_variant(c)) {
            Some(variant) => &variant.images,
            None => &product.images,
        }
    }

    /// Size list for the current color.
    fn size_table<'a>(&self, product: &'a Product) -> &'a [SizeStock] {
        match self.color.as_deref().and_then(|c| product.color_variant(c)) {
            Some(variant) => &variant.sizes,
            None => &product.sizes,
        }
    }

    /// Sizes with stock for the current color.
    pub fn available_sizes<'a>(&self, product: &'a Product) -> Vec<&'a SizeStock> {
        self.size_table(product)
            .iter()
            .filter(|s| s.is_available())
            .collect()
    }

    /// Image shown in the gallery and carried into the cart.
    pub fn current_image<'a>(&self, product: &'a Product) -> Option<&'a str> {
        let images = self.images(product);
        images
            .get(self.image_index)
            .or_else(|| images.first())
            .map(String::as_str)
    }

    /// Build the cart line for "Add to cart".
    pub fn to_cart_line(&self, product: &Product, qty: i64) -> Result<CartLine, CommerceError> {
        let size = self
            .size
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(CommerceError::SizeNotSelected)?;
        let color = self
            .color
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(CommerceError::ColorNotSelected)?;

        let stock = self
            .size_table(product)
            .iter()
            .find(|s| s.size == size)
            .filter(|s| s.is_available())
            .ok_or(CommerceError::SizeOutOfStock)?;

        if qty < 1 {
            return Err(CommerceError::InvalidQuantity(qty));
        }

        Ok(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: self.current_image(product).unwrap_or_default().to_string(),
            price: product.price,
            count_in_stock: stock.stock,
            size: size.to_string(),
            color: Some(color.to_string()),
            qty,
        })
    }
}
