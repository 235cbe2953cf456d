use super::*;

#[test]
fn test_calculate_cart_does_not_touch_stock() {
    let (_dir, manager) = burger_shop();

    let calc = manager
        .calculate_cart(&[item("burger", 2), item("papas", 1)])
        .unwrap();

    assert!(calc.valid);
    assert_eq!(calc.total, 2450.5);
    assert_eq!(stock_of(&manager, "burger"), 5);
    assert!(manager.store().read(|docs| docs.orders.is_empty()));
}

#[test]
fn test_calculate_cart_reports_errors() {
    let (_dir, manager) = burger_shop();

    let calc = manager
        .calculate_cart(&[item("burger", 10), item("ghost", 1), item("papas", 1)])
        .unwrap();

    assert!(!calc.valid);
    assert_eq!(calc.errors.len(), 2);
    assert!(calc.errors[0].contains("Disponible: 5"));
    assert!(calc.errors[1].contains("ghost"));
    assert_eq!(calc.items.len(), 1);
    assert_eq!(calc.total, 450.5);
}

#[test]
fn test_calculate_cart_empty() {
    let (_dir, manager) = burger_shop();
    assert!(matches!(
        manager.calculate_cart(&[]),
        Err(OrderError::EmptyCart)
    ));
}

/// The pre-check and order creation agree on every cart
#[test]
fn test_calculate_and_create_agree() {
    let carts: Vec<Vec<CartItemInput>> = vec![
        vec![item("burger", 2)],
        vec![item("burger", 6)],
        vec![item("burger", 3), item("burger", 3)],
        vec![item("burger", 2), item("burger", 3)],
        vec![item("papas", 10), item("burger", 1)],
        vec![item("ghost", 1)],
        vec![item("burger", 0)],
        vec![CartItemInput {
            product_id: "papas".into(),
            cantidad: 2.5,
        }],
    ];

    for cart in carts {
        let (_dir, manager) = burger_shop();
        let calc = manager.calculate_cart(&cart).unwrap();
        let created = manager.create_order("Ana", &cart);

        assert_eq!(calc.valid, created.is_ok(), "cart {:?}", cart);
        if let Ok(order) = created {
            assert_eq!(order.importe, calc.total, "cart {:?}", cart);
        }
    }
}
