//! UI state for the product screen and the handlers that mutate it.
//!
//! # Design
//! Every successful mutation is followed by a full reload instead of patching
//! `products` locally. Handlers take `&mut self` and block on the transport,
//! so a second load cannot start while one is in flight.

use product_core::{Product, ProductId, Transport};

use crate::api::ProductApi;
use crate::form::ProductForm;

/// Product list, form and status flags for one screen.
pub struct ProductPage<T> {
    api: ProductApi<T>,
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
    form: ProductForm,
    editing: Option<ProductId>,
}

impl<T: Transport> ProductPage<T> {
    pub fn new(api: ProductApi<T>) -> Self {
        Self {
            api,
            products: Vec::new(),
            loading: false,
            error: None,
            form: ProductForm::default(),
            editing: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn editing(&self) -> Option<&ProductId> {
        self.editing.as_ref()
    }

    /// Look a record up by its id as displayed, e.g. `7` or `a1b2`.
    pub fn find_by_label(&self, label: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.to_string() == label)
    }

    pub fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.api.list() {
            Ok(products) => self.products = products,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load products");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Create, or update when an edit is in progress. Returns whether the
    /// record was saved. The form is kept on failure so it can be resubmitted.
    pub fn submit(&mut self) -> bool {
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(e) => {
                self.error = Some(e.to_string());
                return false;
            }
        };

        self.loading = true;
        let saved = match &self.editing {
            Some(id) => self.api.update(id, &input),
            None => self.api.create(&input),
        };
        match saved {
            Ok(_) => {
                self.form.clear();
                self.editing = None;
                self.load();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save product");
                self.error = Some(e.to_string());
                self.loading = false;
                false
            }
        }
    }

    pub fn start_edit(&mut self, product: &Product) {
        self.form = ProductForm::from_product(product);
        self.editing = Some(product.id.clone());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.clear();
    }

    /// Delete after `confirm` approves. `confirm` receives the record's name,
    /// or its id when the record is not in the current list.
    pub fn delete<F>(&mut self, id: &ProductId, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        let label = self
            .products
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string());
        if !confirm(&label) {
            return false;
        }

        self.loading = true;
        match self.api.remove(id) {
            Ok(_) => {
                if self.editing.as_ref() == Some(id) {
                    self.cancel_edit();
                }
                self.load();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, %id, "failed to delete product");
                self.error = Some(e.to_string());
                self.loading = false;
                false
            }
        }
    }
}
