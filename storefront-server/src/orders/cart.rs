//! Cart validation shared by the pre-check and order creation
//!
//! Both paths run [`validate_lines`] against the same product snapshot, so a
//! cart that passes `calculate_cart` is exactly a cart `create_order` accepts
//! (as long as stock did not move in between).

use super::manager::OrderError;
use super::money::{line_total, to_f64};
use rust_decimal::Decimal;
use shared::models::{CartCalculation, CartItemInput, CartLine, Product};
use std::collections::HashMap;

/// A cart line that passed validation, priced at the current product price
#[derive(Debug, Clone)]
pub struct ValidLine {
    pub product_id: String,
    pub nombre: String,
    pub precio: f64,
    pub cantidad: u32,
    pub subtotal: Decimal,
    pub stock: u32,
}

/// Validate every line against `products`
///
/// Quantities of repeated product ids accumulate, so two lines for the same
/// product cannot together exceed its stock.
pub fn validate_lines(
    products: &[Product],
    items: &[CartItemInput],
) -> Vec<Result<ValidLine, OrderError>> {
    let mut requested: HashMap<&str, u64> = HashMap::new();

    items
        .iter()
        .map(|item| {
            let product = products
                .iter()
                .find(|p| p.id == item.product_id)
                .ok_or_else(|| OrderError::ProductNotFound(item.product_id.clone()))?;

            let cantidad = item.units().ok_or_else(|| OrderError::InvalidQuantity {
                nombre: product.nombre.clone(),
                cantidad: item.cantidad,
            })?;

            let total = requested.entry(product.id.as_str()).or_default();
            *total += u64::from(cantidad);
            if *total > u64::from(product.stock) {
                return Err(OrderError::InsufficientStock {
                    product_id: product.id.clone(),
                    nombre: product.nombre.clone(),
                    available: product.stock,
                    requested: *total,
                });
            }

            Ok(ValidLine {
                product_id: product.id.clone(),
                nombre: product.nombre.clone(),
                precio: product.precio,
                cantidad,
                subtotal: line_total(product.precio, cantidad),
                stock: product.stock,
            })
        })
        .collect()
}

/// Read-only cart pre-check
pub fn calculate(products: &[Product], items: &[CartItemInput]) -> CartCalculation {
    let mut calc = CartCalculation::default();
    let mut subtotal = Decimal::ZERO;

    for result in validate_lines(products, items) {
        match result {
            Ok(line) => {
                subtotal += line.subtotal;
                calc.items.push(CartLine {
                    product_id: line.product_id,
                    nombre: line.nombre,
                    precio: line.precio,
                    cantidad: line.cantidad,
                    subtotal: to_f64(line.subtotal),
                    stock_disponible: line.stock,
                });
            }
            Err(e) => calc.errors.push(e.to_string()),
        }
    }

    calc.subtotal = to_f64(subtotal);
    calc.total = calc.subtotal;
    calc.valid = calc.errors.is_empty();
    calc
}
