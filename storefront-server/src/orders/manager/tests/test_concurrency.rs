use super::*;
use std::thread;

#[test]
fn test_concurrent_orders_never_oversell() {
    let (_dir, manager) = create_test_manager(vec![product("ultima", 500.0, 1)]);
    let manager = Arc::new(manager);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let manager = manager.clone();
            thread::spawn(move || {
                manager
                    .create_order(&format!("cliente {}", i), &[item("ultima", 1)])
                    .is_ok()
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(stock_of(&manager, "ultima"), 0);
    assert_eq!(manager.store().read(|docs| docs.orders.len()), 1);
}

#[test]
fn test_concurrent_rejections_restock_once() {
    let (_dir, manager) = burger_shop();
    let (_order_id, reference) = checked_out_order(&manager, &[item("burger", 4)]);
    let manager = Arc::new(manager);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = manager.clone();
            let target = PaymentTarget::ByReference(reference.clone());
            thread::spawn(move || {
                manager
                    .process_payment_notification(&target, "rejected", None)
                    .unwrap()
                    .stock_restored
            })
        })
        .collect();

    let restocks = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|r| *r)
        .count();

    assert_eq!(restocks, 1);
    assert_eq!(stock_of(&manager, "burger"), 5);
}

#[test]
fn test_unique_order_ids() {
    let (_dir, manager) = create_test_manager(vec![product("agua", 100.0, 1000)]);
    let mut ids = std::collections::HashSet::new();
    for _ in 0..200 {
        let order = manager.create_order("", &[item("agua", 1)]).unwrap();
        assert!(ids.insert(order.id));
    }
}
