//! Product Repository

use super::{RepoError, RepoResult, Repository};
use crate::db::JsonStore;
use crate::utils::id::slugify;
use shared::models::product::{DEFAULT_CATEGORY, DEFAULT_STOCK_MIN};
use shared::models::{Product, ProductCreate, ProductUpdate};
use std::sync::Arc;

#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<JsonStore>,
}

impl ProductRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

/// Image paths are stored relative to the image folder
fn normalize_image(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

fn to_stock(value: i64) -> RepoResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepoError::InvalidStock(format!("stock must be non-negative, got {}", value)))
}

impl Repository<Product, ProductCreate, ProductUpdate> for ProductRepository {
    fn find_all(&self) -> Vec<Product> {
        self.store.read(|docs| docs.products.clone())
    }

    fn find_by_id(&self, id: &str) -> Option<Product> {
        self.store.read(|docs| docs.product(id).cloned())
    }

    fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let nombre = data
            .nombre
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| RepoError::Validation("nombre is required".into()))?;
        let precio = data
            .precio
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| RepoError::InvalidPrice("precio must be a positive number".into()))?;

        let product = Product {
            id: data
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| slugify(&nombre)),
            nombre,
            descripcion: data.descripcion.unwrap_or_default(),
            precio,
            categoria: data
                .categoria
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            imagen: data.imagen.as_deref().map(normalize_image).unwrap_or_default(),
            stock: to_stock(data.stock.unwrap_or(0))?,
            stock_min: data.stock_min.unwrap_or(DEFAULT_STOCK_MIN),
        };

        self.store.write(|docs| {
            if docs.product(&product.id).is_some() {
                return Err(RepoError::Duplicate(product.id.clone()));
            }
            docs.products.push(product.clone());
            Ok(product)
        })
    }

    fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        if let Some(precio) = data.precio
            && !(precio.is_finite() && precio >= 0.0)
        {
            return Err(RepoError::InvalidPrice(format!(
                "precio must be a non-negative number, got {}",
                precio
            )));
        }
        let stock = data.stock.map(to_stock).transpose()?;

        self.store.write(|docs| {
            let product = docs
                .product_mut(id)
                .ok_or_else(|| RepoError::NotFound(id.to_string()))?;

            if let Some(nombre) = data.nombre {
                product.nombre = nombre;
            }
            if let Some(descripcion) = data.descripcion {
                product.descripcion = descripcion;
            }
            if let Some(precio) = data.precio {
                product.precio = precio;
            }
            if let Some(categoria) = data.categoria {
                product.categoria = categoria;
            }
            if let Some(imagen) = data.imagen.as_deref() {
                product.imagen = normalize_image(imagen);
            }
            if let Some(stock) = stock {
                product.stock = stock;
            }
            if let Some(stock_min) = data.stock_min {
                product.stock_min = stock_min;
            }
            Ok(product.clone())
        })
    }

    fn delete(&self, id: &str) -> RepoResult<bool> {
        self.store.write(|docs| {
            let before = docs.products.len();
            docs.products.retain(|p| p.id != id);
            Ok(docs.products.len() != before)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, ProductRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::open(dir.path()).unwrap());
        (dir, ProductRepository::new(store))
    }

    fn create_payload(nombre: &str, precio: f64) -> ProductCreate {
        ProductCreate {
            nombre: Some(nombre.into()),
            precio: Some(precio),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let (_dir, repo) = repo();
        let product = repo
            .create(ProductCreate {
                imagen: Some("/img/burger.webp".into()),
                ..create_payload("Hamburguesa Doble", 3500.0)
            })
            .unwrap();

        assert_eq!(product.id, "hamburguesa-doble");
        assert_eq!(product.categoria, "otros");
        assert_eq!(product.stock, 0);
        assert_eq!(product.stock_min, 5);
        assert_eq!(product.imagen, "img/burger.webp");
        assert_eq!(repo.find_all().len(), 1);
    }

    #[test]
    fn test_create_rejects_duplicates_and_bad_input() {
        let (_dir, repo) = repo();
        repo.create(create_payload("Burger", 1000.0)).unwrap();

        assert!(matches!(
            repo.create(create_payload("Burger", 1200.0)),
            Err(RepoError::Duplicate(id)) if id == "burger"
        ));
        assert!(matches!(
            repo.create(create_payload("Papas", 0.0)),
            Err(RepoError::InvalidPrice(_))
        ));
        assert!(matches!(
            repo.create(ProductCreate::default()),
            Err(RepoError::Validation(_))
        ));
        assert!(matches!(
            repo.create(ProductCreate {
                stock: Some(-1),
                ..create_payload("Coca", 800.0)
            }),
            Err(RepoError::InvalidStock(_))
        ));
    }

    #[test]
    fn test_update_is_partial() {
        let (_dir, repo) = repo();
        repo.create(create_payload("Burger", 1000.0)).unwrap();

        let updated = repo
            .update(
                "burger",
                ProductUpdate {
                    stock: Some(12),
                    imagen: Some("//fotos/b.png".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.stock, 12);
        assert_eq!(updated.precio, 1000.0);
        assert_eq!(updated.imagen, "fotos/b.png");

        assert!(matches!(
            repo.update("nope", ProductUpdate::default()),
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(
            repo.update(
                "burger",
                ProductUpdate {
                    stock: Some(-3),
                    ..Default::default()
                }
            ),
            Err(RepoError::InvalidStock(_))
        ));
    }

    #[test]
    fn test_delete() {
        let (_dir, repo) = repo();
        repo.create(create_payload("Burger", 1000.0)).unwrap();

        assert!(repo.delete("burger").unwrap());
        assert!(!repo.delete("burger").unwrap());
        assert!(repo.find_by_id("burger").is_none());
    }
}
