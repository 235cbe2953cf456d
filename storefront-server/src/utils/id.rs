//! Identifier generation

use rand::Rng;

/// URL-safe alphabet used for order ids
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of generated order ids
pub const ORDER_ID_LEN: usize = 8;

/// Short random token used as order id
pub fn order_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ORDER_ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Payment correlation key: `ref_{orderId}_{millis}`
pub fn external_reference(order_id: &str, now_millis: i64) -> String {
    format!("ref_{}_{}", order_id, now_millis)
}

/// Product id derived from its name: lower-case, whitespace runs become `-`
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_shape() {
        let id = order_id();
        assert_eq!(id.len(), ORDER_ID_LEN);
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        assert_ne!(order_id(), order_id());
    }

    #[test]
    fn test_external_reference_format() {
        assert_eq!(
            external_reference("AbC123xy", 1700000000000),
            "ref_AbC123xy_1700000000000"
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hamburguesa Doble"), "hamburguesa-doble");
        assert_eq!(slugify("  Papas   Fritas "), "papas-fritas");
        assert_eq!(slugify("Coca"), "coca");
    }
}
