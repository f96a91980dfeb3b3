//! The four product operations, each one build/execute/parse round-trip.

use product_core::{ApiError, ClientConfig, HttpRequest, HttpResponse, Product, ProductClient, ProductId, Transport};
use serde::Serialize;

/// Pairs a `ProductClient` with the `Transport` that carries its requests.
#[derive(Debug, Clone)]
pub struct ProductApi<T> {
    client: ProductClient,
    transport: T,
}

impl<T: Transport> ProductApi<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: ProductClient::new(config),
            transport,
        }
    }

    /// Every record in the collection tagged as a product.
    pub fn list(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.send(self.client.build_list())?;
        let products = self.client.parse_list(response)?;
        tracing::debug!(count = products.len(), "listed products");
        Ok(products)
    }

    pub fn create<D: Serialize>(&self, data: &D) -> Result<Product, ApiError> {
        let response = self.send(self.client.build_create(data)?)?;
        let product = self.client.parse_create(response)?;
        tracing::info!(id = %product.id, name = %product.name, "created product");
        Ok(product)
    }

    /// Replaces the record wholesale; fields missing from `data` are dropped.
    pub fn update<D: Serialize>(&self, id: &ProductId, data: &D) -> Result<Product, ApiError> {
        let response = self.send(self.client.build_update(id, data)?)?;
        let product = self.client.parse_update(response)?;
        tracing::info!(id = %product.id, name = %product.name, "updated product");
        Ok(product)
    }

    pub fn remove(&self, id: &ProductId) -> Result<bool, ApiError> {
        let response = self.send(self.client.build_remove(id)?)?;
        let removed = self.client.parse_remove(response)?;
        tracing::info!(%id, "removed product");
        Ok(removed)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        tracing::debug!(method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        if !response.is_success() {
            tracing::warn!(method, status = response.status, "backend rejected request");
        }
        Ok(response)
    }
}
