//! The store: four slices mutated only through [`Store::dispatch`].

mod cart;
mod order;
mod product;
mod user;

pub use cart::{CartAction, CartSlice};
pub use order::{OrderAction, OrderSlice};
pub use product::{ProductAction, ProductSlice};
pub use user::{UserAction, UserSlice};

use crate::StateError;
use tracing::debug;

/// Every state change the client can make.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    User(UserAction),
    Cart(CartAction),
    Product(ProductAction),
    Order(OrderAction),
    /// Tear down the session-scoped slices.
    Logout,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::User(_) => "user",
            Action::Cart(_) => "cart",
            Action::Product(_) => "product",
            Action::Order(_) => "order",
            Action::Logout => "logout",
        }
    }
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<ProductAction> for Action {
    fn from(action: ProductAction) -> Self {
        Action::Product(action)
    }
}

impl From<OrderAction> for Action {
    fn from(action: OrderAction) -> Self {
        Action::Order(action)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub user: UserSlice,
    pub cart: CartSlice,
    pub product: ProductSlice,
    pub order: OrderSlice,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action. Only cart actions can fail, and a failed action changes nothing.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<(), StateError> {
        let action = action.into();
        debug!(slice = action.name(), "dispatch");
        match action {
            Action::User(a) => user::reduce(&mut self.user, a),
            Action::Cart(a) => cart::reduce(&mut self.cart, a)?,
            Action::Product(a) => product::reduce(&mut self.product, a),
            Action::Order(a) => order::reduce(&mut self.order, a),
            Action::Logout => {
                self.user = UserSlice::default();
                self.cart = CartSlice::default();
            }
        }
        Ok(())
    }

    /// Error banners currently shown, by slice.
    pub fn errors(&self) -> Vec<(&'static str, &str)> {
        [
            ("user", self.user.error.as_deref()),
            ("product", self.product.error.as_deref()),
            ("order", self.order.error.as_deref()),
        ]
        .into_iter()
        .filter_map(|(slice, error)| error.map(|e| (slice, e)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::account::User;
    use storefront_commerce::cart::CartLine;
    use storefront_commerce::money::{Currency, Money};
    use storefront_commerce::search::ProductPage;

    fn line() -> CartLine {
        CartLine {
            product_id: "p1".into(),
            name: "Tee".into(),
            image: String::new(),
            price: Money::new(1500, Currency::default()),
            count_in_stock: 3,
            size: "S".into(),
            color: Some("black".into()),
            qty: 1,
        }
    }

    #[test]
    fn test_logout_clears_session_slices_only() {
        let mut store = Store::new();
        store
            .dispatch(UserAction::SessionFulfilled(User::new("u1", "Ada", "a@x")))
            .unwrap();
        store.dispatch(CartAction::Add(line())).unwrap();
        store
            .dispatch(ProductAction::ListFulfilled(ProductPage {
                total: 7,
                ..ProductPage::default()
            }))
            .unwrap();
        store.dispatch(OrderAction::Rejected("boom".into())).unwrap();

        store.dispatch(Action::Logout).unwrap();

        assert_eq!(store.user, UserSlice::default());
        assert!(store.cart.cart.is_empty());
        assert_eq!(store.product.total, 7);
        assert_eq!(store.order.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_failed_cart_action_is_reported() {
        let mut store = Store::new();
        let mut bad = line();
        bad.qty = 0;
        let err = store.dispatch(CartAction::Add(bad)).unwrap_err();
        assert!(matches!(err, StateError::Commerce(_)));
        assert!(store.cart.cart.is_empty());
    }

    #[test]
    fn test_errors_lists_active_banners() {
        let mut store = Store::new();
        assert!(store.errors().is_empty());
        store.dispatch(ProductAction::Rejected("Not found".into())).unwrap();
        assert_eq!(store.errors(), vec![("product", "Not found")]);
    }
}
