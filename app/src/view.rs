//! Plain-text rendering of a `ProductPage`: the form block, then the table.

use std::fmt::Write;

use ascii_table::{Align, AsciiTable};
use product_core::{Product, Transport};

use crate::page::ProductPage;

pub const EMPTY_MESSAGE: &str = "No products found.";
pub const LOADING_MESSAGE: &str = "Loading...";

pub fn render<T: Transport>(page: &ProductPage<T>) -> String {
    let mut out = String::new();

    let (title, submit) = match page.editing() {
        Some(id) => (format!("Edit Product #{id}"), "Update Product"),
        None => ("Add Product".to_string(), "Add Product"),
    };
    let _ = writeln!(out, "== {title} ==");
    let _ = writeln!(out, "Name:  {}", page.form().name);
    let _ = writeln!(out, "Price: {}", page.form().price);
    if page.editing().is_some() {
        let _ = writeln!(out, "[{submit}] [Cancel]");
    } else {
        let _ = writeln!(out, "[{submit}]");
    }

    if let Some(error) = page.error() {
        let _ = writeln!(out, "Error: {error}");
    }
    out.push('\n');

    if page.is_loading() {
        out.push_str(LOADING_MESSAGE);
        out.push('\n');
    } else if page.products().is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
    } else {
        out.push_str(&product_table(page.products()));
    }
    out
}

/// Name and price per row; the ID column is what `edit`/`delete` take.
pub fn product_table(products: &[Product]) -> String {
    let mut table = AsciiTable::default();
    table.column(0).set_header("ID").set_align(Align::Left);
    table.column(1).set_header("NAME").set_align(Align::Left);
    table.column(2).set_header("PRICE").set_align(Align::Right);

    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| vec![p.id.to_string(), p.name.clone(), format!("{:.2}", p.price)])
        .collect();
    table.format(rows)
}
