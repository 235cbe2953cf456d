use super::*;
use crate::payments::SimulatedGateway;
use shared::models::Product;
use tempfile::TempDir;

mod test_cart;
mod test_concurrency;

// ========================================================================
// Helpers
// ========================================================================

/// Manager over a fresh data directory; keep the `TempDir` alive
fn create_test_manager(products: Vec<Product>) -> (TempDir, OrdersManager) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonStore::open(dir.path()).unwrap());
    store
        .write(|docs| {
            docs.products = products;
            Ok::<_, crate::db::StorageError>(())
        })
        .unwrap();
    (dir, OrdersManager::new(store, Duration::from_secs(5)))
}

fn product(id: &str, precio: f64, stock: u32) -> Product {
    Product {
        id: id.to_string(),
        nombre: id.to_uppercase(),
        descripcion: String::new(),
        precio,
        categoria: "otros".to_string(),
        imagen: String::new(),
        stock,
        stock_min: 5,
    }
}

fn burger_shop() -> (TempDir, OrdersManager) {
    create_test_manager(vec![
        product("burger", 1000.0, 5),
        product("papas", 450.5, 10),
    ])
}

fn item(product_id: &str, cantidad: u32) -> CartItemInput {
    CartItemInput::new(product_id, cantidad)
}

fn stock_of(manager: &OrdersManager, product_id: &str) -> u32 {
    manager
        .store()
        .read(|docs| docs.product(product_id).map(|p| p.stock))
        .unwrap()
}

fn simulated() -> PaymentProvider {
    PaymentProvider::Simulated(SimulatedGateway::new("http://localhost:4000"))
}

/// Create an order and open a simulated checkout; returns (order_id, reference)
fn checked_out_order(manager: &OrdersManager, items: &[CartItemInput]) -> (String, String) {
    let order = manager.create_order("Ana", items).unwrap();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let outcome = rt
        .block_on(manager.start_checkout(&order.id, &simulated()))
        .unwrap();
    let reference = outcome.order.external_reference.clone().unwrap();
    (order.id, reference)
}
