//! Async operations over the gateway, each following the
//! pending, fulfilled or rejected lifecycle against the [`Store`].

use crate::request::{RequestKind, RequestTracker, StalePolicy, Ticket};
use crate::store::{Action, CartAction, OrderAction, ProductAction, Store, UserAction};
use crate::StateError;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use storefront_commerce::account::{
    AvatarUpload, LoginRequest, PasswordChange, ProfileUpdate, RegistrationForm, User, UserFilter,
};
use storefront_commerce::analytics::{recent_activity, ActivityEntry, AnalyticsReport, AnalyticsWindow, DashboardStats};
use storefront_commerce::cart::{Cart, CartLine, CartLineKey};
use storefront_commerce::catalog::{Product, ProductDraft};
use storefront_commerce::ids::{OrderId, ProductId, UserId};
use storefront_commerce::orders::Order;
use storefront_commerce::search::{CatalogQuery, FilterOptions, FilterState, ProductPage, RouteParams, HOMEPAGE_PAGE_SIZE};
use storefront_data::{FetchError, StoreGateway};
use tracing::{debug, info, warn};

/// Tunables for the state container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub stale_policy: StalePolicy,
    pub homepage_page_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            stale_policy: StalePolicy::default(),
            homepage_page_size: HOMEPAGE_PAGE_SIZE,
        }
    }
}

/// The client: a gateway, the store and the request tracker.
///
/// Locks are held only while dispatching, never across a remote call.
pub struct Storefront {
    gateway: Arc<dyn StoreGateway>,
    config: StoreConfig,
    store: Mutex<Store>,
    tracker: Mutex<RequestTracker>,
}

impl Storefront {
    pub fn new(gateway: Arc<dyn StoreGateway>) -> Self {
        Self::with_config(gateway, StoreConfig::default())
    }

    pub fn with_config(gateway: Arc<dyn StoreGateway>, config: StoreConfig) -> Self {
        Self {
            gateway,
            config,
            store: Mutex::new(Store::new()),
            tracker: Mutex::new(RequestTracker::new(config.stale_policy)),
        }
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn tracker(&self) -> MutexGuard<'_, RequestTracker> {
        self.tracker.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Store {
        self.store().clone()
    }

    /// Read from the current state without copying it.
    pub fn with_state<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&self.store())
    }

    pub fn dispatch(&self, action: impl Into<Action>) -> Result<(), StateError> {
        self.store().dispatch(action)
    }

    /// Issue a ticket and mark the slice as loading.
    fn begin(&self, kind: RequestKind, pending: Option<Action>) -> Ticket {
        let ticket = self.tracker().issue(kind);
        if let Some(action) = pending {
            // Pending actions never fail.
            let _ = self.dispatch(action);
        }
        ticket
    }

    /// Apply the outcome of a request unless the policy discards it.
    fn finish<T>(
        &self,
        ticket: Ticket,
        result: Result<T, FetchError>,
        fulfilled: impl FnOnce(&T) -> Action,
        rejected: impl FnOnce(String) -> Action,
    ) -> Result<T, StateError> {
        if !self.tracker().should_apply(ticket) {
            return Err(StateError::Superseded);
        }
        match result {
            Ok(value) => {
                let _ = self.dispatch(fulfilled(&value));
                Ok(value)
            }
            Err(error) => {
                warn!(%ticket, error = %error, "request rejected");
                let _ = self.dispatch(rejected(error.user_message()));
                Err(error.into())
            }
        }
    }

    fn require_session(&self) -> Result<(), StateError> {
        if self.with_state(|s| s.user.is_signed_in()) {
            Ok(())
        } else {
            Err(StateError::NotSignedIn)
        }
    }

    fn require_admin(&self) -> Result<(), StateError> {
        self.require_session()?;
        if self.with_state(|s| s.user.is_admin()) {
            Ok(())
        } else {
            Err(StateError::Forbidden)
        }
    }

    // --- Catalog ---

    /// Build the listing query for the current filters and route, then fetch it.
    pub async fn browse(&self, filters: &FilterState, route: &RouteParams) -> Result<ProductPage, StateError> {
        let query = CatalogQuery::build_with(filters, route, self.config.homepage_page_size);
        self.fetch_products(&query).await
    }

    pub async fn fetch_products(&self, query: &CatalogQuery) -> Result<ProductPage, StateError> {
        let ticket = self.begin(RequestKind::ProductList, Some(ProductAction::Pending.into()));
        debug!(%ticket, ?query, "fetching products");
        let result = self.gateway.list_products(query).await;
        self.finish(
            ticket,
            result,
            |page| ProductAction::ListFulfilled(page.clone()).into(),
            |e| ProductAction::Rejected(e).into(),
        )
    }

    /// Product detail and its related products, fetched concurrently.
    pub async fn fetch_product(&self, id: &ProductId) -> Result<Product, StateError> {
        let detail = self.begin(RequestKind::ProductDetail, Some(ProductAction::Pending.into()));
        let related = self.begin(RequestKind::RelatedProducts, None);

        let (product, related_products) =
            tokio::join!(self.gateway.get_product(id), self.gateway.related_products(id));

        // A missing related list only costs the carousel.
        if let Err(e) = self.finish(
            related,
            related_products,
            |list| ProductAction::RelatedFulfilled(list.clone()).into(),
            |_| ProductAction::RelatedFulfilled(Vec::new()).into(),
        ) {
            debug!(error = %e, "related products unavailable");
        }

        self.finish(
            detail,
            product,
            |p| ProductAction::DetailFulfilled(p.clone()).into(),
            |e| ProductAction::Rejected(e).into(),
        )
    }

    pub async fn fetch_filter_options(&self) -> Result<FilterOptions, StateError> {
        let ticket = self.begin(RequestKind::FilterOptions, None);
        let result = self.gateway.filter_options().await;
        self.finish(
            ticket,
            result,
            |o| ProductAction::FilterOptionsFulfilled(o.clone()).into(),
            |e| ProductAction::Rejected(e).into(),
        )
    }

    // --- Admin products ---

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, StateError> {
        self.require_admin()?;
        let product = draft.clean()?;
        let ticket = self.begin(RequestKind::ProductMutation, Some(ProductAction::Pending.into()));
        let result = self.gateway.create_product(&product).await;
        self.finish(
            ticket,
            result,
            |p| ProductAction::Created(p.clone()).into(),
            |e| ProductAction::Rejected(e).into(),
        )
    }

    pub async fn update_product(&self, id: &ProductId, draft: &ProductDraft) -> Result<Product, StateError> {
        self.require_admin()?;
        let product = draft.clean()?;
        let ticket = self.begin(RequestKind::ProductMutation, Some(ProductAction::Pending.into()));
        let result = self.gateway.update_product(id, &product).await;
        self.finish(
            ticket,
            result,
            |p| ProductAction::Updated(p.clone()).into(),
            |e| ProductAction::Rejected(e).into(),
        )
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<(), StateError> {
        self.require_admin()?;
        let ticket = self.begin(RequestKind::ProductMutation, Some(ProductAction::Pending.into()));
        let result = self.gateway.delete_product(id).await;
        self.finish(
            ticket,
            result,
            |_| ProductAction::Deleted(id.clone()).into(),
            |e| ProductAction::Rejected(e).into(),
        )
    }

    // --- Session ---

    pub async fn login(&self, request: &LoginRequest) -> Result<User, StateError> {
        request.validate()?;
        let ticket = self.begin(RequestKind::Session, Some(UserAction::Pending.into()));
        let result = self.gateway.login(request).await;
        let user = self.finish(
            ticket,
            result,
            |u| UserAction::SessionFulfilled(u.clone()).into(),
            |e| UserAction::Rejected(e).into(),
        )?;
        self.gateway.set_token(user.bearer().map(str::to_string));
        info!(user = %user.id, admin = user.is_admin, "signed in");
        Ok(user)
    }

    /// Register; a password mismatch blocks the request without touching the store.
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, StateError> {
        let request = form.validate()?;
        let ticket = self.begin(RequestKind::Session, Some(UserAction::Pending.into()));
        let result = self.gateway.register(&request).await;
        let user = self.finish(
            ticket,
            result,
            |u| UserAction::SessionFulfilled(u.clone()).into(),
            |e| UserAction::Rejected(e).into(),
        )?;
        self.gateway.set_token(user.bearer().map(str::to_string));
        info!(user = %user.id, "registered");
        Ok(user)
    }

    /// Adopt a session token obtained elsewhere and load its profile.
    pub async fn resume(&self, token: impl Into<String>) -> Result<User, StateError> {
        let token = token.into();
        self.gateway.set_token(Some(token.clone()));
        let ticket = self.begin(RequestKind::Session, Some(UserAction::Pending.into()));
        let result = self.gateway.get_profile().await.map(|mut user| {
            user.token = Some(token);
            user
        });
        self.finish(
            ticket,
            result,
            |u| UserAction::SessionFulfilled(u.clone()).into(),
            |e| UserAction::Rejected(e).into(),
        )
    }

    /// Drop the session: token, user slice and cart.
    pub fn logout(&self) {
        self.gateway.set_token(None);
        let _ = self.dispatch(Action::Logout);
        info!("signed out");
    }

    pub async fn fetch_profile(&self) -> Result<User, StateError> {
        self.require_session()?;
        let ticket = self.begin(RequestKind::Profile, Some(UserAction::Pending.into()));
        let result = self.gateway.get_profile().await;
        self.finish(
            ticket,
            result,
            |u| {
                UserAction::ProfileFulfilled {
                    user: u.clone(),
                    updated: false,
                }
                .into()
            },
            |e| UserAction::Rejected(e).into(),
        )
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, StateError> {
        self.require_session()?;
        let ticket = self.begin(RequestKind::Profile, Some(UserAction::Pending.into()));
        let result = self.gateway.update_profile(update).await;
        self.finish(
            ticket,
            result,
            |u| {
                UserAction::ProfileFulfilled {
                    user: u.clone(),
                    updated: true,
                }
                .into()
            },
            |e| UserAction::Rejected(e).into(),
        )
    }

    /// Replace the profile picture. Invalid files never reach the network.
    pub async fn upload_avatar(&self, upload: &AvatarUpload) -> Result<User, StateError> {
        self.require_session()?;
        upload.validate()?;
        let ticket = self.begin(RequestKind::Profile, Some(UserAction::Pending.into()));
        let result = self.gateway.upload_avatar(upload).await;
        self.finish(
            ticket,
            result,
            |u| {
                UserAction::ProfileFulfilled {
                    user: u.clone(),
                    updated: true,
                }
                .into()
            },
            |e| UserAction::Rejected(e).into(),
        )
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<User, StateError> {
        let update = change.validate()?;
        self.update_profile(&update).await
    }

    // --- Admin users ---

    pub async fn fetch_users(&self, filter: &UserFilter) -> Result<Vec<User>, StateError> {
        self.require_admin()?;
        let ticket = self.begin(RequestKind::UserList, Some(UserAction::Pending.into()));
        let result = self.gateway.list_users(filter).await;
        self.finish(
            ticket,
            result,
            |users| UserAction::UsersFulfilled(users.clone()).into(),
            |e| UserAction::Rejected(e).into(),
        )
    }

    pub async fn fetch_user(&self, id: &UserId) -> Result<User, StateError> {
        self.require_admin()?;
        let ticket = self.begin(RequestKind::UserDetail, Some(UserAction::Pending.into()));
        let result = self.gateway.get_user(id).await;
        self.finish(
            ticket,
            result,
            |u| UserAction::UserFulfilled(u.clone()).into(),
            |e| UserAction::Rejected(e).into(),
        )
    }

    pub async fn update_user(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, StateError> {
        self.require_admin()?;
        let ticket = self.begin(RequestKind::UserMutation, Some(UserAction::Pending.into()));
        let result = self.gateway.update_user(id, update).await;
        self.finish(
            ticket,
            result,
            |u| UserAction::UserUpdated(u.clone()).into(),
            |e| UserAction::Rejected(e).into(),
        )
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<(), StateError> {
        self.require_admin()?;
        let ticket = self.begin(RequestKind::UserMutation, Some(UserAction::Pending.into()));
        let result = self.gateway.delete_user(id).await;
        self.finish(
            ticket,
            result,
            |_| UserAction::UserDeleted(id.clone()).into(),
            |e| UserAction::Rejected(e).into(),
        )
    }

    // --- Orders ---

    /// Every order; admin only.
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, StateError> {
        self.require_admin()?;
        let ticket = self.begin(RequestKind::OrderList, Some(OrderAction::Pending.into()));
        let result = self.gateway.list_orders().await;
        self.finish(
            ticket,
            result,
            |orders| OrderAction::ListFulfilled(orders.clone()).into(),
            |e| OrderAction::Rejected(e).into(),
        )
    }

    pub async fn fetch_my_orders(&self) -> Result<Vec<Order>, StateError> {
        self.require_session()?;
        let ticket = self.begin(RequestKind::OrderList, Some(OrderAction::Pending.into()));
        let result = self.gateway.my_orders().await;
        self.finish(
            ticket,
            result,
            |orders| OrderAction::ListFulfilled(orders.clone()).into(),
            |e| OrderAction::Rejected(e).into(),
        )
    }

    pub async fn fetch_order(&self, id: &OrderId) -> Result<Order, StateError> {
        self.require_session()?;
        let ticket = self.begin(RequestKind::OrderDetail, Some(OrderAction::Pending.into()));
        let result = self.gateway.get_order(id).await;
        self.finish(
            ticket,
            result,
            |o| OrderAction::DetailFulfilled(o.clone()).into(),
            |e| OrderAction::Rejected(e).into(),
        )
    }

    // --- Admin dashboard and analytics ---

    async fn admin_inputs(&self) -> Result<(Vec<Order>, Vec<User>, u64), StateError> {
        let count_query = CatalogQuery {
            page_number: 1,
            page_size: Some(1),
            ..CatalogQuery::default()
        };
        let user_filter = UserFilter::default();
        let (orders, users, products) = tokio::join!(
            self.fetch_orders(),
            self.fetch_users(&user_filter),
            self.gateway.list_products(&count_query),
        );
        Ok((orders?, users?, products?.total))
    }

    /// All-time totals and the activity feed.
    ///
    /// Asks the server for precomputed totals first. When that call fails the
    /// totals are computed here from the full order, user and product lists,
    /// which also fills the order and user slices.
    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<(DashboardStats, Vec<ActivityEntry>), StateError> {
        self.require_admin()?;
        match self.gateway.dashboard_stats().await {
            Ok(summary) => return Ok(summary.into_dashboard(now)),
            Err(error) => warn!(error = %error, "dashboard stats unavailable, computing locally"),
        }
        let (orders, users, total_products) = self.admin_inputs().await?;
        let stats = DashboardStats::compute(&orders, &users, total_products, now)?;
        Ok((stats, recent_activity(&orders, &users, now)))
    }

    pub async fn analytics(&self, window: AnalyticsWindow, now: DateTime<Utc>) -> Result<AnalyticsReport, StateError> {
        self.require_admin()?;
        let (orders, users, total_products) = self.admin_inputs().await?;
        Ok(AnalyticsReport::compute(&orders, &users, total_products, window, now)?)
    }

    // --- Cart ---

    pub fn add_to_cart(&self, line: CartLine) -> Result<(), StateError> {
        self.dispatch(CartAction::Add(line))
    }

    pub fn update_cart_quantity(&self, key: CartLineKey, qty: i64) -> Result<(), StateError> {
        self.dispatch(CartAction::UpdateQuantity { key, qty })
    }

    pub fn remove_from_cart(&self, key: CartLineKey) {
        let _ = self.dispatch(CartAction::Remove(key));
    }

    pub fn clear_cart(&self) {
        let _ = self.dispatch(CartAction::Clear);
    }

    pub fn restore_cart(&self, cart: Cart) {
        let _ = self.dispatch(CartAction::Restore(cart));
    }

    pub fn cart(&self) -> Cart {
        self.with_state(|s| s.cart.cart.clone())
    }

    /// Where "Proceed to checkout" leads for the current session.
    pub fn checkout_path(&self) -> &'static str {
        Cart::checkout_path(self.with_state(|s| s.user.is_signed_in()))
    }
}
