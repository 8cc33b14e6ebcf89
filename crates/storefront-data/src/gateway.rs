//! The storefront's remote gateway.
//!
//! [`StoreGateway`] is the seam between the state container and the REST
//! API; tests substitute an in-memory implementation.

use crate::{FetchClient, FetchError, FilePart};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::RwLock;
use storefront_commerce::account::{AvatarUpload, LoginRequest, ProfileUpdate, RegisterRequest, User, UserFilter};
use storefront_commerce::analytics::DashboardSummary;
use storefront_commerce::catalog::Product;
use storefront_commerce::ids::{OrderId, ProductId, UserId};
use storefront_commerce::orders::Order;
use storefront_commerce::search::{CatalogQuery, FilterOptions, ProductPage};
use tracing::{debug, warn};

/// Every remote operation the storefront performs.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Session token attached to subsequent calls; `None` after logout.
    fn set_token(&self, _token: Option<String>) {}

    // Catalog
    async fn list_products(&self, query: &CatalogQuery) -> Result<ProductPage, FetchError>;
    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError>;
    async fn related_products(&self, id: &ProductId) -> Result<Vec<Product>, FetchError>;
    async fn filter_options(&self) -> Result<FilterOptions, FetchError>;

    // Admin product CRUD
    async fn create_product(&self, product: &Product) -> Result<Product, FetchError>;
    async fn update_product(&self, id: &ProductId, product: &Product) -> Result<Product, FetchError>;
    async fn delete_product(&self, id: &ProductId) -> Result<(), FetchError>;

    // Session and profile
    async fn login(&self, request: &LoginRequest) -> Result<User, FetchError>;
    async fn register(&self, request: &RegisterRequest) -> Result<User, FetchError>;
    async fn get_profile(&self) -> Result<User, FetchError>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, FetchError>;
    async fn upload_avatar(&self, upload: &AvatarUpload) -> Result<User, FetchError>;

    // Admin users
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, FetchError>;
    async fn get_user(&self, id: &UserId) -> Result<User, FetchError>;
    async fn update_user(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, FetchError>;
    async fn delete_user(&self, id: &UserId) -> Result<(), FetchError>;
    async fn dashboard_stats(&self) -> Result<DashboardSummary, FetchError>;

    // Orders
    async fn list_orders(&self) -> Result<Vec<Order>, FetchError>;
    async fn my_orders(&self) -> Result<Vec<Order>, FetchError>;
    async fn get_order(&self, id: &OrderId) -> Result<Order, FetchError>;
}

/// `GET /api/users` answers either a bare list or `{users: [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserList {
    Bare(Vec<User>),
    Wrapped { users: Vec<User> },
}

impl From<UserList> for Vec<User> {
    fn from(list: UserList) -> Self {
        match list {
            UserList::Bare(users) | UserList::Wrapped { users } => users,
        }
    }
}

/// The `avatar` form field the profile endpoint expects.
fn avatar_part(upload: &AvatarUpload) -> FilePart {
    FilePart {
        field: "avatar".into(),
        file_name: upload.file_name.clone(),
        content_type: upload.content_type.clone(),
        bytes: upload.bytes.clone(),
    }
}

/// [`StoreGateway`] over the REST API.
#[derive(Debug)]
pub struct HttpGateway {
    client: FetchClient,
    token: RwLock<Option<String>>,
}

impl HttpGateway {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            token: RwLock::new(None),
        }
    }

    pub fn with_token(self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<T, FetchError> {
        let token = self.token();
        let response = self
            .client
            .get(path)
            .query(query)
            .bearer_auth_opt(token.as_deref())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .inspect_err(|e| warn!(path, error = %e, "GET failed"))?;
        response.json()
    }

    async fn send_json<B: serde::Serialize + Sync, T: serde::de::DeserializeOwned>(
        &self,
        method: crate::Method,
        path: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let token = self.token();
        let response = self
            .client
            .request(method, path)
            .bearer_auth_opt(token.as_deref())
            .json(body)?
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .inspect_err(|e| warn!(method = method.as_str(), path, error = %e, "request failed"))?;
        response.json()
    }

    async fn send_file<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        file: FilePart,
    ) -> Result<T, FetchError> {
        let token = self.token();
        let response = self
            .client
            .put(path)
            .bearer_auth_opt(token.as_deref())
            .multipart_file(file)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .inspect_err(|e| warn!(path, error = %e, "upload failed"))?;
        response.json()
    }

    async fn delete(&self, path: &str) -> Result<(), FetchError> {
        let token = self.token();
        self.client
            .delete(path)
            .bearer_auth_opt(token.as_deref())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .inspect_err(|e| warn!(path, error = %e, "DELETE failed"))?;
        Ok(())
    }
}

#[async_trait]
impl StoreGateway for HttpGateway {
    fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token.filter(|t| !t.is_empty());
        }
    }

    async fn list_products(&self, query: &CatalogQuery) -> Result<ProductPage, FetchError> {
        let pairs = query.to_query_pairs();
        debug!(?pairs, "listing products");
        self.get_json("/api/products", pairs).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.get_json(&format!("/api/products/{}", id), Vec::new()).await
    }

    async fn related_products(&self, id: &ProductId) -> Result<Vec<Product>, FetchError> {
        self.get_json(&format!("/api/products/related/{}", id), Vec::new())
            .await
    }

    async fn filter_options(&self) -> Result<FilterOptions, FetchError> {
        self.get_json("/api/products/filters", Vec::new()).await
    }

    async fn create_product(&self, product: &Product) -> Result<Product, FetchError> {
        self.send_json(crate::Method::Post, "/api/products", product).await
    }

    async fn update_product(&self, id: &ProductId, product: &Product) -> Result<Product, FetchError> {
        self.send_json(crate::Method::Put, &format!("/api/products/{}", id), product)
            .await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), FetchError> {
        self.delete(&format!("/api/products/{}", id)).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<User, FetchError> {
        self.send_json(crate::Method::Post, "/api/users/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, FetchError> {
        self.send_json(crate::Method::Post, "/api/users", request).await
    }

    async fn get_profile(&self) -> Result<User, FetchError> {
        self.get_json("/api/users/profile", Vec::new()).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, FetchError> {
        self.send_json(crate::Method::Put, "/api/users/profile", update).await
    }

    async fn upload_avatar(&self, upload: &AvatarUpload) -> Result<User, FetchError> {
        debug!(file = %upload.file_name, bytes = upload.bytes.len(), "uploading avatar");
        self.send_file("/api/users/profile/avatar", avatar_part(upload)).await
    }

    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, FetchError> {
        let list: UserList = self.get_json("/api/users", filter.to_query_pairs()).await?;
        Ok(list.into())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, FetchError> {
        self.get_json(&format!("/api/users/{}", id), Vec::new()).await
    }

    async fn update_user(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, FetchError> {
        self.send_json(crate::Method::Put, &format!("/api/users/{}", id), update)
            .await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), FetchError> {
        self.delete(&format!("/api/users/{}", id)).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardSummary, FetchError> {
        self.get_json("/api/users/dashboard-stats", Vec::new()).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, FetchError> {
        self.get_json("/api/orders", Vec::new()).await
    }

    async fn my_orders(&self) -> Result<Vec<Order>, FetchError> {
        self.get_json("/api/orders/myorders", Vec::new()).await
    }

    async fn get_order(&self, id: &OrderId) -> Result<Order, FetchError> {
        self.get_json(&format!("/api/orders/{}", id), Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_list_accepts_both_shapes() {
        let bare: UserList = serde_json::from_str(r#"[{"_id": "u1", "name": "A"}]"#).unwrap();
        assert_eq!(Vec::<User>::from(bare).len(), 1);

        let wrapped: UserList = serde_json::from_str(r#"{"users": [{"_id": "u1"}, {"_id": "u2"}]}"#).unwrap();
        assert_eq!(Vec::<User>::from(wrapped).len(), 2);
    }

    #[test]
    fn test_avatar_request_is_multipart() {
        let gateway = HttpGateway::new(FetchClient::new().unwrap().with_base_url("http://localhost:5000"))
            .with_token(Some("abc".into()));
        let upload = AvatarUpload::from_file_name("me.gif", vec![1, 2, 3]);
        let request = gateway
            .client
            .put("/api/users/profile/avatar")
            .bearer_auth_opt(gateway.token().as_deref())
            .multipart_file(avatar_part(&upload))
            .build();

        assert_eq!(request.url(), "http://localhost:5000/api/users/profile/avatar");
        assert_eq!(request.header_value("Authorization"), Some("Bearer abc"));
        let file = request.file().unwrap();
        assert_eq!(file.field, "avatar");
        assert_eq!(file.content_type, "image/gif");
        assert_eq!(file.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_token_is_cleared_when_blank() {
        let gateway = HttpGateway::new(FetchClient::new().unwrap()).with_token(Some("abc".into()));
        assert_eq!(gateway.token().as_deref(), Some("abc"));
        gateway.set_token(Some(String::new()));
        assert_eq!(gateway.token(), None);
    }
}
