//! Catalog, session and admin flows against an in-memory gateway.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storefront_commerce::account::{
    AvatarUpload, LoginRequest, ProfileUpdate, RegisterRequest, RegistrationForm, User, UserFilter, MAX_AVATAR_BYTES,
};
use storefront_commerce::analytics::{AnalyticsWindow, DashboardSummary};
use storefront_commerce::catalog::{Product, ProductSelection, SizeStock};
use storefront_commerce::ids::{OrderId, ProductId, UserId};
use storefront_commerce::money::{Currency, Money};
use storefront_commerce::orders::{Order, OrderItem};
use storefront_commerce::search::{present, CatalogQuery, FilterOptions, FilterState, Presentation, ProductPage, RouteParams};
use storefront_data::{FetchError, StoreGateway};
use storefront_state::{Route, StalePolicy, StateError, StoreConfig, Storefront};

const SLOW: Duration = Duration::from_millis(80);

fn money(minor: i64) -> Money {
    Money::new(minor, Currency::default())
}

fn product(id: &str, category: &str, featured: bool) -> Product {
    let mut p = Product::new(id, format!("Product {}", id), category, money(1999));
    p.images = vec![format!("/img/{}.jpg", id)];
    p.featured = featured;
    p.sizes = vec![SizeStock::new("M", 4), SizeStock::new("L", 0)];
    p.colors = vec!["navy".into()];
    p
}

fn order(id: &str, days_ago: i64, total: i64, paid: bool) -> Order {
    Order {
        id: id.into(),
        user: None,
        order_items: vec![OrderItem {
            name: "Slim Jeans".into(),
            qty: 2,
            image: String::new(),
            price: money(total / 2),
            product: "p1".into(),
            size: Some("M".into()),
            color: None,
        }],
        shipping_address: None,
        payment_method: "card".into(),
        total_price: money(total),
        is_paid: paid,
        paid_at: None,
        is_delivered: false,
        delivered_at: None,
        created_at: Some(now() - ChronoDuration::days(days_ago)),
    }
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
}

/// Answers from fixed data. A `slow` keyword delays the listing response.
#[derive(Default)]
struct FakeGateway {
    products: Vec<Product>,
    orders: Vec<Order>,
    users: Vec<User>,
    queries: Mutex<Vec<CatalogQuery>>,
    token: Mutex<Option<String>>,
    register_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    /// `None` makes the stats endpoint answer 404.
    dashboard_stats: Option<DashboardSummary>,
}

impl FakeGateway {
    fn seeded() -> Self {
        Self {
            products: vec![
                product("p1", "jeans", true),
                product("p2", "tshirt", false),
                product("p3", "jeans", false),
                product("p4", "lingerie", true),
            ],
            orders: vec![order("ord00001", 1, 5000, true), order("ord00002", 40, 3000, false)],
            users: vec![User::new("u1", "Ada", "ada@example.com"), User::new("u2", "Bob", "bob@example.com")],
            ..Self::default()
        }
    }

    fn last_query(&self) -> Option<CatalogQuery> {
        self.queries.lock().unwrap().last().cloned()
    }

    fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn session_user(&self, email: &str) -> Result<User, FetchError> {
        let admin = email.starts_with("admin");
        if email.starts_with("wrong") {
            return Err(FetchError::HttpError {
                status: 401,
                message: "Invalid email or password".into(),
            });
        }
        Ok(User {
            is_admin: admin,
            token: Some(format!("token-{}", email)),
            ..User::new("u9", "Session", email)
        })
    }

    /// Parses a `minPrice`/`maxPrice` bound the way the API does, in major units.
    fn price_bound(name: &str, raw: Option<&str>) -> Result<Option<f64>, FetchError> {
        raw.map(|s| {
            s.parse::<f64>().map_err(|_| FetchError::HttpError {
                status: 400,
                message: format!("Invalid {}", name),
            })
        })
        .transpose()
    }

    fn not_found(what: &str) -> FetchError {
        FetchError::HttpError {
            status: 404,
            message: format!("{} not found", what),
        }
    }
}

#[async_trait]
impl StoreGateway for FakeGateway {
    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn list_products(&self, query: &CatalogQuery) -> Result<ProductPage, FetchError> {
        self.queries.lock().unwrap().push(query.clone());
        if query.keyword.as_deref() == Some("slow") {
            tokio::time::sleep(SLOW).await;
        }
        if query.keyword.as_deref() == Some("broken") {
            return Err(FetchError::Timeout);
        }

        let min = Self::price_bound("minPrice", query.min_price.as_deref())?;
        let max = Self::price_bound("maxPrice", query.max_price.as_deref())?;
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| query.category.as_deref().map_or(true, |c| p.category.as_str() == c))
            .filter(|p| min.map_or(true, |m| p.price.to_decimal() >= m))
            .filter(|p| max.map_or(true, |m| p.price.to_decimal() <= m))
            .filter(|p| match query.keyword.as_deref() {
                Some("slow") | Some("fast") | None => true,
                Some(kw) => p.name.contains(kw),
            })
            .cloned()
            .collect();
        let mut products = products;
        if let Some(kw) = query.keyword.as_deref() {
            products.truncate(if kw == "slow" { 1 } else { 2 });
        }
        let total = products.len() as u64;
        Ok(ProductPage {
            products,
            page: query.page_number,
            pages: 1,
            total,
        })
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Product"))
    }

    async fn related_products(&self, id: &ProductId) -> Result<Vec<Product>, FetchError> {
        let product = self.get_product(id).await?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.category == product.category && &p.id != id)
            .cloned()
            .collect())
    }

    async fn filter_options(&self) -> Result<FilterOptions, FetchError> {
        Ok(FilterOptions {
            categories: vec!["jeans".into(), "tshirt".into()],
            ..FilterOptions::default()
        })
    }

    async fn create_product(&self, product: &Product) -> Result<Product, FetchError> {
        Ok(Product {
            id: "new1".into(),
            ..product.clone()
        })
    }

    async fn update_product(&self, id: &ProductId, product: &Product) -> Result<Product, FetchError> {
        Ok(Product {
            id: id.clone(),
            ..product.clone()
        })
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), FetchError> {
        self.get_product(id).await.map(|_| ())
    }

    async fn login(&self, request: &LoginRequest) -> Result<User, FetchError> {
        self.session_user(&request.email)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, FetchError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.session_user(&request.email)
    }

    async fn get_profile(&self) -> Result<User, FetchError> {
        match self.token() {
            Some(token) => self.session_user(token.trim_start_matches("token-")),
            None => Err(FetchError::HttpError {
                status: 401,
                message: String::new(),
            }),
        }
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, FetchError> {
        let mut user = self.get_profile().await?;
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        user.token = None;
        Ok(user)
    }

    async fn upload_avatar(&self, upload: &AvatarUpload) -> Result<User, FetchError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let mut user = self.get_profile().await?;
        user.avatar = Some(format!("/uploads/{}", upload.file_name));
        user.token = None;
        Ok(user)
    }

    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, FetchError> {
        Ok(filter.apply(&self.users).into_iter().cloned().collect())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, FetchError> {
        self.users
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("User"))
    }

    async fn update_user(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, FetchError> {
        let mut user = self.get_user(id).await?;
        if let Some(is_admin) = update.is_admin {
            user.is_admin = is_admin;
        }
        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), FetchError> {
        self.get_user(id).await.map(|_| ())
    }

    async fn dashboard_stats(&self) -> Result<DashboardSummary, FetchError> {
        self.dashboard_stats.clone().ok_or_else(|| Self::not_found("Route"))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, FetchError> {
        Ok(self.orders.clone())
    }

    async fn my_orders(&self) -> Result<Vec<Order>, FetchError> {
        Ok(self.orders.iter().take(1).cloned().collect())
    }

    async fn get_order(&self, id: &OrderId) -> Result<Order, FetchError> {
        self.orders
            .iter()
            .find(|o| &o.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Order"))
    }
}

fn storefront(gateway: &Arc<FakeGateway>, policy: StalePolicy) -> Storefront {
    Storefront::with_config(
        gateway.clone(),
        StoreConfig {
            stale_policy: policy,
            ..StoreConfig::default()
        },
    )
}

#[tokio::test]
async fn homepage_fetch_uses_large_page_and_splits_into_carousels() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    let route = Route::parse("/").catalog_params().unwrap();
    let page = sf.browse(&FilterState::default(), &route).await.unwrap();

    let query = gateway.last_query().unwrap();
    assert_eq!(query.page_size, Some(200));
    assert_eq!(query.page_number, 1);
    assert_eq!(query.sort_by, None);

    match present(&page, &route) {
        Presentation::Home(sections) => {
            let featured: Vec<_> = sections.featured.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(featured, ["p1", "p4"]);
            assert!(sections.carousels.iter().any(|b| b.spec.category == "jeans"));
        }
        Presentation::Grid(_) => panic!("homepage should render carousels"),
    }
    assert_eq!(sf.snapshot().product.products.len(), 4);
}

#[tokio::test]
async fn category_route_overrides_filter_category() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    let filters = FilterState {
        category: "tshirt".into(),
        in_stock: true,
        ..FilterState::default()
    };
    let route = Route::parse("/category/jeans/page/2").catalog_params().unwrap();
    let page = sf.browse(&filters, &route).await.unwrap();

    let query = gateway.last_query().unwrap();
    assert_eq!(query.category.as_deref(), Some("jeans"));
    assert_eq!(query.in_stock, Some(true));
    assert_eq!(query.page_number, 2);
    assert_eq!(query.page_size, None);
    assert!(matches!(present(&page, &route), Presentation::Grid(_)));
    assert_eq!(page.products.len(), 2);
}

#[tokio::test]
async fn category_and_min_price_narrow_the_listing() {
    let priced = |id: &str, category: &str, major: i64| {
        let mut p = product(id, category, false);
        p.price = Money::from_major(major, Currency::INR);
        p
    };
    let gateway = Arc::new(FakeGateway {
        products: vec![
            priced("j800", "jeans", 800),
            priced("j1200", "jeans", 1200),
            priced("j1500", "jeans", 1500),
            priced("s1", "shirts", 1300),
            priced("s2", "shirts", 600),
        ],
        ..FakeGateway::default()
    });
    let sf = storefront(&gateway, StalePolicy::default());

    let filters = FilterState {
        category: "jeans".into(),
        min_price: "1000".into(),
        ..FilterState::default()
    };
    let page = sf.browse(&filters, &RouteParams::home()).await.unwrap();

    let pairs = gateway.last_query().unwrap().to_query_pairs();
    assert!(pairs.contains(&("category", "jeans".to_string())));
    assert!(pairs.contains(&("minPrice", "1000".to_string())));
    let ids: Vec<_> = page.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["j1200", "j1500"]);
    assert_eq!(sf.snapshot().product.products.len(), 2);

    let bad = FilterState {
        max_price: "abc".into(),
        ..filters
    };
    let err = sf.browse(&bad, &RouteParams::home()).await.unwrap_err();
    assert!(matches!(err, StateError::Fetch(FetchError::HttpError { status: 400, .. })));
    assert_eq!(sf.snapshot().product.products.len(), 2);
}

#[tokio::test]
async fn last_resolved_response_wins_by_default() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::LastResolvedWins);
    let filters = FilterState::default();

    let slow = RouteParams::search("slow");
    let fast = RouteParams::search("fast");
    let (first, second) = tokio::join!(sf.browse(&filters, &slow), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        sf.browse(&filters, &fast).await
    });

    assert!(first.is_ok());
    assert!(second.is_ok());
    // The slow, older response landed last and overwrote the newer one.
    assert_eq!(sf.snapshot().product.products.len(), 1);
}

#[tokio::test]
async fn latest_request_wins_discards_stale_response() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::LatestRequestWins);
    let filters = FilterState::default();

    let slow = RouteParams::search("slow");
    let fast = RouteParams::search("fast");
    let (first, second) = tokio::join!(sf.browse(&filters, &slow), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        sf.browse(&filters, &fast).await
    });

    assert_eq!(first.unwrap_err(), StateError::Superseded);
    assert_eq!(second.unwrap().products.len(), 2);

    let state = sf.snapshot();
    assert_eq!(state.product.products.len(), 2);
    assert!(!state.product.loading);
}

#[tokio::test]
async fn rejected_fetch_keeps_prior_products() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    sf.browse(&FilterState::default(), &RouteParams::home()).await.unwrap();
    let err = sf
        .browse(&FilterState::default(), &RouteParams::search("broken"))
        .await
        .unwrap_err();
    assert_eq!(err, StateError::Fetch(FetchError::Timeout));

    let state = sf.snapshot();
    assert_eq!(state.product.products.len(), 4);
    assert_eq!(state.product.error, Some(FetchError::Timeout.user_message()));
    assert!(!state.product.loading);
}

#[tokio::test]
async fn product_detail_loads_related_and_feeds_the_cart() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    let product = sf.fetch_product(&ProductId::new("p1")).await.unwrap();
    let state = sf.snapshot();
    assert_eq!(state.product.product.as_ref().map(|p| p.id.as_str()), Some("p1"));
    let related: Vec<_> = state.product.related.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(related, ["p3"]);

    let mut selection = ProductSelection::for_product(&product);
    assert_eq!(
        selection.to_cart_line(&product, 1).unwrap_err(),
        storefront_commerce::CommerceError::SizeNotSelected
    );
    selection.select_size("M");
    sf.add_to_cart(selection.to_cart_line(&product, 2).unwrap()).unwrap();
    assert_eq!(sf.cart().item_count(), 2);
    assert_eq!(sf.cart().subtotal().unwrap(), money(3998));
    assert_eq!(sf.checkout_path(), "/mobile-login?redirect=checkout");

    let missing = sf.fetch_product(&ProductId::new("nope")).await.unwrap_err();
    assert!(matches!(missing, StateError::Fetch(FetchError::HttpError { status: 404, .. })));
    assert_eq!(sf.snapshot().product.product.as_ref().map(|p| p.id.as_str()), Some("p1"));
}

#[tokio::test]
async fn login_and_logout_manage_token_and_session_slices() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    sf.browse(&FilterState::default(), &RouteParams::home()).await.unwrap();
    sf.login(&LoginRequest::new("ada@example.com", "secret")).await.unwrap();
    assert_eq!(gateway.token().as_deref(), Some("token-ada@example.com"));
    assert_eq!(sf.checkout_path(), "/checkout");

    let product = sf.fetch_product(&ProductId::new("p2")).await.unwrap();
    let mut selection = ProductSelection::for_product(&product);
    selection.select_size("M");
    sf.add_to_cart(selection.to_cart_line(&product, 1).unwrap()).unwrap();

    sf.logout();
    let state = sf.snapshot();
    assert_eq!(gateway.token(), None);
    assert!(!state.user.is_signed_in());
    assert!(state.cart.cart.is_empty());
    assert_eq!(state.product.products.len(), 4);
}

#[tokio::test]
async fn failed_login_sets_error_banner() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    let err = sf.login(&LoginRequest::new("wrong@example.com", "x")).await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid email or password");
    let state = sf.snapshot();
    assert!(!state.user.is_signed_in());
    assert_eq!(state.user.error.as_deref(), Some("Invalid email or password"));
    assert_eq!(gateway.token(), None);
}

#[tokio::test]
async fn registration_mismatch_never_reaches_the_gateway() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    let form = RegistrationForm {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret2".into(),
    };
    let err = sf.register(&form).await.unwrap_err();
    assert_eq!(err.user_message(), "Passwords do not match");
    assert_eq!(gateway.register_calls.load(Ordering::SeqCst), 0);
    assert_eq!(sf.snapshot().user.error, None);

    let form = RegistrationForm {
        confirm_password: "secret1".into(),
        ..form
    };
    sf.register(&form).await.unwrap();
    assert_eq!(gateway.register_calls.load(Ordering::SeqCst), 1);
    assert!(sf.snapshot().user.is_signed_in());
}

#[tokio::test]
async fn profile_update_keeps_session_token() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    assert_eq!(sf.fetch_profile().await.unwrap_err(), StateError::NotSignedIn);

    sf.resume("token-ada@example.com").await.unwrap();
    let update = ProfileUpdate {
        name: Some("Ada Lovelace".into()),
        ..ProfileUpdate::default()
    };
    sf.update_profile(&update).await.unwrap();

    let state = sf.snapshot();
    assert_eq!(state.user.user_info.as_ref().map(|u| u.name.as_str()), Some("Ada Lovelace"));
    assert_eq!(state.user.token(), Some("token-ada@example.com"));
    assert!(state.user.success);
}

#[tokio::test]
async fn avatar_upload_validates_before_sending() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    let photo = AvatarUpload::from_file_name("me.png", vec![0; 64]);
    assert_eq!(sf.upload_avatar(&photo).await.unwrap_err(), StateError::NotSignedIn);

    sf.resume("token-ada@example.com").await.unwrap();
    let pdf = AvatarUpload::from_file_name("cv.pdf", vec![0; 64]);
    let err = sf.upload_avatar(&pdf).await.unwrap_err();
    assert_eq!(err.user_message(), "Please select an image file (JPEG, PNG, GIF, WebP)");
    let huge = AvatarUpload::from_file_name("big.jpg", vec![0; MAX_AVATAR_BYTES + 1]);
    let err = sf.upload_avatar(&huge).await.unwrap_err();
    assert_eq!(err.user_message(), "Image must be less than 5MB");
    assert_eq!(gateway.upload_calls.load(Ordering::SeqCst), 0);

    sf.upload_avatar(&photo).await.unwrap();
    assert_eq!(gateway.upload_calls.load(Ordering::SeqCst), 1);
    let state = sf.snapshot();
    let user = state.user.user_info.as_ref().unwrap();
    assert_eq!(user.avatar.as_deref(), Some("/uploads/me.png"));
    assert_eq!(state.user.token(), Some("token-ada@example.com"));
    assert!(state.user.success);
}

#[tokio::test]
async fn admin_operations_require_an_admin_session() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());

    assert_eq!(sf.fetch_orders().await.unwrap_err(), StateError::NotSignedIn);

    sf.login(&LoginRequest::new("ada@example.com", "secret")).await.unwrap();
    assert_eq!(sf.dashboard(now()).await.unwrap_err(), StateError::Forbidden);
    assert_eq!(
        sf.delete_product(&ProductId::new("p1")).await.unwrap_err(),
        StateError::Forbidden
    );
}

#[tokio::test]
async fn admin_dashboard_and_analytics() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());
    sf.login(&LoginRequest::new("admin@example.com", "secret")).await.unwrap();

    let (stats, activity) = sf.dashboard(now()).await.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_products, 4);
    assert_eq!(stats.total_revenue, money(8000));
    assert_eq!(stats.monthly_revenue, money(5000));
    assert_eq!(activity.len(), 4);

    let report = sf.analytics(AnalyticsWindow::Week, now()).await.unwrap();
    assert_eq!(report.total_orders, 1);
    assert_eq!(report.total_revenue, money(5000));
    assert_eq!(report.top_products[0].name, "Slim Jeans");

    let state = sf.snapshot();
    assert_eq!(state.order.orders.len(), 2);
    assert_eq!(state.user.users.len(), 2);
}

#[tokio::test]
async fn admin_dashboard_prefers_server_totals() {
    let gateway = Arc::new(FakeGateway {
        dashboard_stats: Some(DashboardSummary {
            total_users: 12,
            total_products: 340,
            total_orders: 9,
            total_revenue: money(1_250_000),
            monthly_revenue: money(300_000),
            recent_orders: vec![order("ord00009", 2, 4000, true)],
            recent_users: Vec::new(),
        }),
        ..FakeGateway::seeded()
    });
    let sf = storefront(&gateway, StalePolicy::default());
    sf.login(&LoginRequest::new("admin@example.com", "secret")).await.unwrap();

    let (stats, activity) = sf.dashboard(now()).await.unwrap();
    assert_eq!(stats.total_products, 340);
    assert_eq!(stats.total_revenue, money(1_250_000));
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].details, "Order #000009 - ₹40");

    // No fallback fetches were made.
    assert!(gateway.last_query().is_none());
    assert!(sf.snapshot().order.orders.is_empty());
}

#[tokio::test]
async fn admin_user_and_product_edits_update_slices() {
    let gateway = Arc::new(FakeGateway::seeded());
    let sf = storefront(&gateway, StalePolicy::default());
    sf.login(&LoginRequest::new("admin@example.com", "secret")).await.unwrap();

    sf.fetch_users(&UserFilter::default()).await.unwrap();
    let promote = ProfileUpdate {
        is_admin: Some(true),
        ..ProfileUpdate::default()
    };
    sf.update_user(&UserId::new("u2"), &promote).await.unwrap();
    assert!(sf.snapshot().user.users[1].is_admin);

    sf.delete_user(&UserId::new("u1")).await.unwrap();
    assert_eq!(sf.snapshot().user.users.len(), 1);

    sf.browse(&FilterState::default(), &RouteParams::home()).await.unwrap();
    sf.delete_product(&ProductId::new("p2")).await.unwrap();
    let state = sf.snapshot();
    assert_eq!(state.product.products.len(), 3);
    assert!(state.product.success);
}
