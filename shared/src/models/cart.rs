//! Cart Model

use serde::{Deserialize, Deserializer, Serialize};

/// One requested line: product and quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    #[serde(default)]
    pub product_id: String,
    /// Requested units; numeric strings are accepted, anything else reads as 0
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub cantidad: f64,
}

impl CartItemInput {
    pub fn new(product_id: impl Into<String>, cantidad: u32) -> Self {
        Self {
            product_id: product_id.into(),
            cantidad: f64::from(cantidad),
        }
    }

    /// Quantity as a whole number of units, if it is one and positive
    pub fn units(&self) -> Option<u32> {
        let q = self.cantidad;
        if q.is_finite() && q > 0.0 && q.fract() == 0.0 && q <= f64::from(u32::MAX) {
            Some(q as u32)
        } else {
            None
        }
    }
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse().unwrap_or(0.0),
        Raw::Other(_) => 0.0,
    })
}

/// A valid line of a cart pre-check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub nombre: String,
    pub precio: f64,
    pub cantidad: u32,
    pub subtotal: f64,
    #[serde(rename = "stock_disponible")]
    pub stock_disponible: u32,
}

/// Result of a cart pre-check
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartCalculation {
    pub items: Vec<CartLine>,
    pub subtotal: f64,
    pub total: f64,
    pub valid: bool,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_accepts_numbers_and_numeric_strings() {
        let item: CartItemInput =
            serde_json::from_str(r#"{"productId":"burger","cantidad":"3"}"#).unwrap();
        assert_eq!(item.units(), Some(3));

        let item: CartItemInput =
            serde_json::from_str(r#"{"productId":"burger","cantidad":2}"#).unwrap();
        assert_eq!(item.units(), Some(2));
    }

    #[test]
    fn test_quantity_rejects_fractions_and_non_positive() {
        for raw in [r#"1.5"#, r#"0"#, r#"-2"#, r#""abc""#, r#"null"#] {
            let json = format!(r#"{{"productId":"burger","cantidad":{}}}"#, raw);
            let item: CartItemInput = serde_json::from_str(&json).unwrap();
            assert_eq!(item.units(), None, "cantidad {}", raw);
        }
    }

    #[test]
    fn test_cart_line_field_names() {
        let line = CartLine {
            product_id: "burger".into(),
            nombre: "Burger".into(),
            precio: 1000.0,
            cantidad: 2,
            subtotal: 2000.0,
            stock_disponible: 5,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productId"], "burger");
        assert_eq!(json["stock_disponible"], 5);
    }
}
