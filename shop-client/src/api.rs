//! Typed API facade
//!
//! Wraps a [`Transport`] with JSON (de)serialization and hands out one
//! service per REST resource.

use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::services::{
    AuthService, CartService, CategoryService, ContentService, DiscountService, MailService,
    ProductService, RequestService, ReviewService, ServiceCatalog, StatsService, UploadService,
};
use crate::transport::{ApiRequest, Transport, UploadFile};
use crate::{ClientConfig, ClientResult, HttpClient};

/// Entry point for all REST calls
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("authenticated", &self.transport.token().is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Network client from configuration
    pub fn http(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(Arc::new(HttpClient::new(config)?)))
    }

    pub fn set_token(&self, token: Option<String>) {
        self.transport.set_token(token);
    }

    pub fn token(&self) -> Option<String> {
        self.transport.token()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    // ========== Raw calls ==========

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let value = self.transport.send(request).await?;
        serde_json::from_value(value).map_err(Into::into)
    }

    fn json<B: Serialize>(body: &B) -> ClientResult<Value> {
        serde_json::to_value(body).map_err(Into::into)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ClientResult<T> {
        self.call(ApiRequest::new(Method::GET, path).with_query(query))
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.call(ApiRequest::new(Method::POST, path).with_json(Self::json(body)?))
            .await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.call(ApiRequest::new(Method::PUT, path).with_json(Self::json(body)?))
            .await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.call(ApiRequest::new(Method::PATCH, path).with_json(Self::json(body)?))
            .await
    }

    /// Make a DELETE request, ignoring any response body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.transport
            .send(ApiRequest::new(Method::DELETE, path))
            .await
            .map(|_| ())
    }

    /// Multipart upload with a single `file` field
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, file: UploadFile) -> ClientResult<T> {
        self.call(ApiRequest::new(Method::POST, path).with_file(file))
            .await
    }

    // ========== Services ==========

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(self)
    }

    pub fn services(&self) -> ServiceCatalog<'_> {
        ServiceCatalog::new(self)
    }

    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(self)
    }

    pub fn discounts(&self) -> DiscountService<'_> {
        DiscountService::new(self)
    }

    pub fn requests(&self) -> RequestService<'_> {
        RequestService::new(self)
    }

    pub fn reviews(&self) -> ReviewService<'_> {
        ReviewService::new(self)
    }

    pub fn stats(&self) -> StatsService<'_> {
        StatsService::new(self)
    }

    pub fn cart(&self) -> CartService<'_> {
        CartService::new(self)
    }

    pub fn content(&self) -> ContentService<'_> {
        ContentService::new(self)
    }

    pub fn mail(&self) -> MailService<'_> {
        MailService::new(self)
    }

    pub fn uploads(&self) -> UploadService<'_> {
        UploadService::new(self)
    }
}
