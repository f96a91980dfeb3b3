//! Stateless HTTP request builder and response parser for the product API.
//!
//! # Design
//! `ProductClient` holds only its `ClientConfig`. Each operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip.
//!
//! Writes merge the caller's fields with the kind tag, tag last, so a caller
//! cannot file a record under another category. Reads decode through
//! `ListShape` and drop every entry whose tag is not ours.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Product, ProductId, KIND_FIELD, KIND_TAG, RESOURCE};

/// Backend operation verb, the first path segment of every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn verb(self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            Operation::Read => HttpMethod::Get,
            Operation::Create => HttpMethod::Post,
            Operation::Update => HttpMethod::Put,
            Operation::Delete => HttpMethod::Delete,
        }
    }
}

/// The list response shapes the backend is known to produce.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListShape {
    Bare(Vec<Value>),
    Enveloped { data: Vec<Value> },
    Unrecognized(#[allow(dead_code)] Value),
}

impl ListShape {
    fn into_items(self) -> Vec<Value> {
        match self {
            ListShape::Bare(items) | ListShape::Enveloped { data: items } => items,
            ListShape::Unrecognized(_) => Vec::new(),
        }
    }
}

/// Single-record response shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordShape {
    Bare(Product),
    Enveloped { data: Product },
}

impl From<RecordShape> for Product {
    fn from(shape: RecordShape) -> Self {
        match shape {
            RecordShape::Bare(product) | RecordShape::Enveloped { data: product } => product,
        }
    }
}

/// Synchronous, stateless client for the product API.
#[derive(Debug, Clone)]
pub struct ProductClient {
    config: ClientConfig,
}

impl ProductClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// `{base}/{verb}/{resource}[/{id}]?Instance={instance}`
    pub fn url(&self, operation: Operation, id: Option<&ProductId>) -> String {
        let mut path = format!("{}/{}/{RESOURCE}", self.config.base_url, operation.verb());
        if let Some(id) = id {
            path.push('/');
            path.push_str(&id.to_string());
        }
        format!("{path}?Instance={}", self.config.instance_id)
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some(token) = &self.config.token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    fn request(&self, operation: Operation, id: Option<&ProductId>, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method: operation.method(),
            url: self.url(operation, id),
            headers: self.headers(),
            body,
        }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.request(Operation::Read, None, None)
    }

    pub fn build_create<T: Serialize>(&self, input: &T) -> Result<HttpRequest, ApiError> {
        let body = tagged_body(input)?;
        Ok(self.request(Operation::Create, None, Some(body)))
    }

    pub fn build_update<T: Serialize>(&self, id: &ProductId, input: &T) -> Result<HttpRequest, ApiError> {
        require_identity(id)?;
        let body = tagged_body(input)?;
        Ok(self.request(Operation::Update, Some(id), Some(body)))
    }

    pub fn build_remove(&self, id: &ProductId) -> Result<HttpRequest, ApiError> {
        require_identity(id)?;
        Ok(self.request(Operation::Delete, Some(id), None))
    }

    /// Tagged entries that do not decode as a `Product` are skipped, not fatal.
    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        check_status(&response)?;
        let shape: ListShape = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        let products = shape
            .into_items()
            .into_iter()
            .filter(is_ours)
            .filter_map(|item| match serde_json::from_value::<Product>(item) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed product record");
                    None
                }
            })
            .collect();
        Ok(products)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_record(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_record(response)
    }

    /// Delete responses may carry no body; only the status is inspected.
    pub fn parse_remove(&self, response: HttpResponse) -> Result<bool, ApiError> {
        check_status(&response)?;
        Ok(true)
    }
}

fn parse_record(response: HttpResponse) -> Result<Product, ApiError> {
    check_status(&response)?;
    serde_json::from_str::<RecordShape>(&response.body)
        .map(Product::from)
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn is_ours(item: &Value) -> bool {
    item.get(KIND_FIELD).and_then(Value::as_str) == Some(KIND_TAG)
}

/// Serialize `input` as a JSON object and stamp the kind tag over it.
fn tagged_body<T: Serialize>(input: &T) -> Result<String, ApiError> {
    let mut fields = match serde_json::to_value(input).map_err(|e| ApiError::Serialization(e.to_string()))? {
        Value::Object(fields) => fields,
        Value::Null => Map::new(),
        other => {
            return Err(ApiError::Serialization(format!(
                "record fields must be a JSON object, got {other}"
            )))
        }
    };
    fields.insert(KIND_FIELD.to_string(), Value::String(KIND_TAG.to_string()));
    serde_json::to_string(&fields).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn require_identity(id: &ProductId) -> Result<(), ApiError> {
    if id.is_blank() {
        return Err(ApiError::MissingIdentity);
    }
    Ok(())
}

/// Map non-success status codes to `ApiError::RequestFailed`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::request_failed(response.status))
}
