//! Domain DTOs for the product collection.
//!
//! # Design
//! The backend collection is shared with other applications, so every record
//! this crate writes carries the `pp` kind tag and every record it reads has
//! been filtered on it. Identities are backend-assigned and may be numbers or
//! strings, under either `id` or `_id`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Path segment naming the backend collection.
pub const RESOURCE: &str = "seitb";

/// Wire name of the kind tag field.
pub const KIND_FIELD: &str = "pp";

/// Kind tag value marking records that belong to this application.
pub const KIND_TAG: &str = "product";

/// Backend-assigned record identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl ProductId {
    /// An identity the backend could never have assigned.
    pub fn is_blank(&self) -> bool {
        matches!(self, ProductId::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        ProductId::Number(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        ProductId::Text(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        ProductId::Text(value)
    }
}

/// A product record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireProduct")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(rename = "pp")]
    pub kind: String,
}

/// Backend record before the two identity spellings are collapsed.
#[derive(Deserialize)]
struct WireProduct {
    id: Option<ProductId>,
    #[serde(rename = "_id")]
    underscore_id: Option<ProductId>,
    name: String,
    #[serde(deserialize_with = "finite_price")]
    price: f64,
    pp: String,
}

impl TryFrom<WireProduct> for Product {
    type Error = String;

    /// `id` wins when both `id` and `_id` are present.
    fn try_from(wire: WireProduct) -> Result<Self, Self::Error> {
        let id = wire
            .id
            .or(wire.underscore_id)
            .ok_or_else(|| "record has neither `id` nor `_id`".to_string())?;
        Ok(Product {
            id,
            name: wire.name,
            price: wire.price,
            kind: wire.pp,
        })
    }
}

/// Editable product fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
}

/// Accepts prices stored as JSON numbers or as numeric strings.
fn finite_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    let value = match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => n,
        RawPrice::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("price {s:?} is not a number")))?,
    };
    if !value.is_finite() {
        return Err(serde::de::Error::custom("price must be finite"));
    }
    Ok(value)
}
