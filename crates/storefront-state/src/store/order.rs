//! Order slice.

use storefront_commerce::orders::Order;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSlice {
    pub orders: Vec<Order>,
    /// Order on the detail screen.
    pub order: Option<Order>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    Pending,
    ListFulfilled(Vec<Order>),
    DetailFulfilled(Order),
    Rejected(String),
    DismissError,
}

pub fn reduce(slice: &mut OrderSlice, action: OrderAction) {
    match action {
        OrderAction::Pending => {
            slice.loading = true;
            slice.error = None;
        }
        OrderAction::ListFulfilled(orders) => {
            slice.loading = false;
            slice.orders = orders;
        }
        OrderAction::DetailFulfilled(order) => {
            slice.loading = false;
            slice.order = Some(order);
        }
        OrderAction::Rejected(message) => {
            slice.loading = false;
            slice.error = Some(message);
        }
        OrderAction::DismissError => slice.error = None,
    }
}
