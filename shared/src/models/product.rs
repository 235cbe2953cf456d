//! Product Model

use serde::{Deserialize, Serialize};

/// Default low-stock threshold for new products
pub const DEFAULT_STOCK_MIN: i64 = 5;

/// Default category for new products
pub const DEFAULT_CATEGORY: &str = "otros";

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Slug-like unique id
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub precio: f64,
    #[serde(default)]
    pub categoria: String,
    /// Relative image path (no leading `/`)
    #[serde(default)]
    pub imagen: String,
    /// Units available; never negative
    #[serde(default)]
    pub stock: u32,
    /// Low-stock warning threshold
    #[serde(default = "default_stock_min")]
    pub stock_min: i64,
}

fn default_stock_min() -> i64 {
    DEFAULT_STOCK_MIN
}

impl Product {
    /// Stock at or below the warning threshold
    pub fn is_low_stock(&self) -> bool {
        i64::from(self.stock) <= self.stock_min
    }
}

/// Create product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    /// Defaults to the slug of `nombre`
    pub id: Option<String>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<f64>,
    pub categoria: Option<String>,
    pub imagen: Option<String>,
    pub stock: Option<i64>,
    pub stock_min: Option<i64>,
}

/// Update product payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<f64>,
    pub categoria: Option<String>,
    pub imagen: Option<String>,
    pub stock: Option<i64>,
    pub stock_min: Option<i64>,
}
