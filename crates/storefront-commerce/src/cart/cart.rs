//! Cart and cart line types.

use crate::cart::{CartTotals, LineTotal};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{self, Currency, Money};
use serde::{Deserialize, Serialize};

/// Largest quantity the quantity picker ever offers.
pub const MAX_QUANTITY_CHOICES: i64 = 20;

/// Picker length when a line carries no stock figure.
pub const FALLBACK_QUANTITY_CHOICES: i64 = 10;

/// Color used in the key when a line has none.
const DEFAULT_COLOR: &str = "default";

/// Identity of a cart line: same product in another size or color is a different line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartLineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl CartLineKey {
    pub fn new(product_id: impl Into<ProductId>, size: impl Into<String>, color: Option<&str>) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: normalize_color(color),
        }
    }
}

fn normalize_color(color: Option<&str>) -> String {
    match color.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_COLOR.to_string(),
    }
}

/// One product/size/color combination in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(rename = "_id")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Stock for the chosen size when the line was added.
    #[serde(default)]
    pub count_in_stock: i64,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub qty: i64,
}

impl CartLine {
    pub fn key(&self) -> CartLineKey {
        CartLineKey::new(self.product_id.clone(), self.size.clone(), self.color.as_deref())
    }

    /// qty × price.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price.try_multiply(self.qty).ok_or(CommerceError::Overflow)
    }

    /// Quantities the picker offers for this line.
    pub fn quantity_choices(&self) -> std::ops::RangeInclusive<i64> {
        let stock = if self.count_in_stock > 0 {
            self.count_in_stock
        } else {
            FALLBACK_QUANTITY_CHOICES
        };
        1..=stock.min(MAX_QUANTITY_CHOICES)
    }

    fn check_quantity(&self, qty: i64) -> Result<(), CommerceError> {
        if qty < 1 {
            return Err(CommerceError::InvalidQuantity(qty));
        }
        if self.count_in_stock > 0 && qty > self.count_in_stock {
            return Err(CommerceError::InsufficientStock {
                product_id: self.product_id.to_string(),
                size: self.size.clone(),
                requested: qty,
                available: self.count_in_stock,
            });
        }
        Ok(())
    }
}

/// A shopping cart: ordered lines, unique by [`CartLineKey`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    #[serde(rename = "cartItems", default)]
    pub lines: Vec<CartLine>,
    #[serde(default)]
    pub currency: Currency,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line. A line with the same key is replaced in place.
    pub fn add(&mut self, line: CartLine) -> Result<CartLineKey, CommerceError> {
        line.check_quantity(line.qty)?;
        if line.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: line.price.currency.code().to_string(),
            });
        }

        let key = line.key();
        match self.lines.iter_mut().find(|l| l.key() == key) {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
        Ok(key)
    }

    /// Set the quantity of an existing line.
    ///
    /// Returns `Ok(false)` without touching the cart when the key is absent.
    pub fn update_quantity(&mut self, key: &CartLineKey, qty: i64) -> Result<bool, CommerceError> {
        match self.lines.iter_mut().find(|l| &l.key() == key) {
            Some(line) => {
                line.check_quantity(qty)?;
                line.qty = qty;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line. Absent keys are a no-op returning `false`.
    pub fn remove(&mut self, key: &CartLineKey) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.key() != key);
        self.lines.len() < len_before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn get(&self, key: &CartLineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key() == key)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ qty × price; zero for an empty cart.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.lines.iter().try_fold(Money::zero(self.currency), |acc, line| {
            acc.try_add(&line.line_total()?).ok_or(CommerceError::Overflow)
        })
    }

    /// Σ qty; zero for an empty cart.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    /// Subtotal, count and per-line breakdown for the order summary.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        let lines = self
            .lines
            .iter()
            .map(|l| {
                Ok(LineTotal {
                    key: l.key(),
                    unit_price: l.price,
                    qty: l.qty,
                    total: l.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(CartTotals {
            subtotal: self.subtotal()?,
            item_count: self.item_count(),
            lines,
        })
    }

    /// Where "Proceed to checkout" leads.
    pub fn checkout_path(signed_in: bool) -> &'static str {
        if signed_in {
            "/checkout"
        } else {
            "/mobile-login?redirect=checkout"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: &str, size: &str, color: Option<&str>, qty: i64, price: i64) -> CartLine {
        CartLine {
            product_id: ProductId::new(product),
            name: format!("{} item", product),
            image: String::new(),
            price: Money::from_major(price, Currency::INR),
            count_in_stock: 10,
            size: size.to_string(),
            color: color.map(String::from),
            qty,
        }
    }

    #[test]
    fn test_empty_cart_identity() {
        let cart = Cart::new();
        assert!(cart.subtotal().unwrap().is_zero());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_same_product_different_size_is_distinct() {
        let mut cart = Cart::new();
        cart.add(line("P1", "M", Some("Red"), 2, 500)).unwrap();
        cart.add(line("P1", "L", Some("Red"), 1, 500)).unwrap();

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.subtotal().unwrap(), Money::from_major(1500, Currency::INR));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_same_key_replaces_line() {
        let mut cart = Cart::new();
        cart.add(line("P1", "M", Some("Red"), 2, 500)).unwrap();
        cart.add(line("P1", "M", Some("Red"), 5, 500)).unwrap();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_missing_color_keys_as_default() {
        let mut cart = Cart::new();
        cart.add(line("P1", "M", None, 1, 500)).unwrap();
        cart.add(line("P1", "M", Some(""), 3, 500)).unwrap();
        assert_eq!(cart.lines.len(), 1);
        assert!(cart.get(&CartLineKey::new("P1", "M", Some("default"))).is_some());
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("P1", "M", Some("Red"), 2, 500)).unwrap();
        let before = cart.clone();

        assert!(!cart.remove(&CartLineKey::new("P1", "XL", Some("Red"))));
        assert_eq!(cart, before);

        assert!(cart.remove(&CartLineKey::new("P1", "M", Some("Red"))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_absent_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("P1", "M", Some("Red"), 2, 500)).unwrap();
        let before = cart.clone();
        assert_eq!(cart.update_quantity(&CartLineKey::new("P9", "M", None), 4), Ok(false));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_bounded_by_stock() {
        let mut cart = Cart::new();
        let key = cart.add(line("P1", "M", Some("Red"), 2, 500)).unwrap();

        assert_eq!(cart.update_quantity(&key, 4), Ok(true));
        assert_eq!(cart.item_count(), 4);

        assert!(matches!(
            cart.update_quantity(&key, 11),
            Err(CommerceError::InsufficientStock { requested: 11, available: 10, .. })
        ));
        assert_eq!(cart.update_quantity(&key, 0), Err(CommerceError::InvalidQuantity(0)));
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(line("P1", "M", None, 0, 500)),
            Err(CommerceError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_quantity_choices() {
        let mut l = line("P1", "M", None, 1, 500);
        assert_eq!(l.quantity_choices(), 1..=10);
        l.count_in_stock = 3;
        assert_eq!(l.quantity_choices(), 1..=3);
        l.count_in_stock = 50;
        assert_eq!(l.quantity_choices(), 1..=20);
        l.count_in_stock = 0;
        assert_eq!(l.quantity_choices(), 1..=10);
    }

    #[test]
    fn test_totals_breakdown() {
        let mut cart = Cart::new();
        cart.add(line("P1", "M", Some("Red"), 2, 500)).unwrap();
        cart.add(line("P2", "32", None, 1, 1200)).unwrap();
        let totals = cart.totals().unwrap();
        assert_eq!(totals.subtotal, Money::from_major(2200, Currency::INR));
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.lines[0].total, Money::from_major(1000, Currency::INR));
    }

    #[test]
    fn test_checkout_path() {
        assert_eq!(Cart::checkout_path(true), "/checkout");
        assert_eq!(Cart::checkout_path(false), "/mobile-login?redirect=checkout");
    }

    #[test]
    fn test_cart_json_uses_api_field_names() {
        let mut cart = Cart::new();
        cart.add(line("P1", "M", Some("Red"), 2, 500)).unwrap();
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["cartItems"][0]["_id"], "P1");
        assert_eq!(json["cartItems"][0]["countInStock"], 10);
        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
