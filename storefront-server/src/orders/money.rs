//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;
use shared::models::OrderItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// `unit_price * quantity`, rounded to cents
///
/// Totals are sums of these rounded lines, so an order's `importe` always
/// equals the sum of its item subtotals.
pub fn line_total(unit_price: f64, quantity: u32) -> Decimal {
    round_money(to_decimal(unit_price) * Decimal::from(quantity))
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum of item subtotals with precise arithmetic
pub fn sum_subtotals(items: &[OrderItem]) -> f64 {
    let total: Decimal = items.iter().map(|i| to_decimal(i.subtotal)).sum();
    to_f64(total)
}

/// Two amounts differ by no more than 0.01
pub fn within_tolerance(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() <= MONEY_TOLERANCE
}
