//! Synchronous API client core for the shared product collection.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` supplied by the
//! caller executes the round-trip.
//!
//! # Design
//! - `ProductClient` is stateless: it holds only the `ClientConfig` resolved
//!   at startup.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - The backend collection is shared; writes stamp the kind tag and reads
//!   filter on it.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{Operation, ProductClient};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{Product, ProductId, ProductInput, KIND_FIELD, KIND_TAG, RESOURCE};
