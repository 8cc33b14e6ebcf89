//! Cart slice.
//!
//! Cart actions are validated locally; a rejected action leaves the cart as it was.

use storefront_commerce::cart::{Cart, CartLine, CartLineKey};
use storefront_commerce::CommerceError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSlice {
    pub cart: Cart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Add(CartLine),
    UpdateQuantity { key: CartLineKey, qty: i64 },
    Remove(CartLineKey),
    Clear,
    /// Replace the whole cart, e.g. from persisted storage.
    Restore(Cart),
}

pub fn reduce(slice: &mut CartSlice, action: CartAction) -> Result<(), CommerceError> {
    match action {
        CartAction::Add(line) => {
            slice.cart.add(line)?;
        }
        CartAction::UpdateQuantity { key, qty } => {
            slice.cart.update_quantity(&key, qty)?;
        }
        CartAction::Remove(key) => {
            slice.cart.remove(&key);
        }
        CartAction::Clear => slice.cart.clear(),
        CartAction::Restore(cart) => slice.cart = cart,
    }
    Ok(())
}
