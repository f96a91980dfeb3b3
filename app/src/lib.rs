//! Product screen over the shared collection API.
//!
//! # Overview
//! `ProductApi` drives `product-core`'s request builders through a
//! `Transport`; `ProductPage` holds the screen state (list, form, edit target,
//! loading and error) and `view` renders it as text for the `products` CLI.

pub mod api;
pub mod cli;
pub mod form;
pub mod page;
pub mod transport;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::ProductApi;
pub use form::{FormError, ProductForm};
pub use page::ProductPage;
pub use transport::UreqTransport;
