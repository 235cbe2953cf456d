//! JSON document store
//!
//! # Files
//!
//! | File | Content |
//! |------|---------|
//! | `products.json` | `Vec<Product>` |
//! | `orders.json` | `Vec<Order>` |
//!
//! Both documents are held in memory behind a single lock. Every mutation runs
//! inside [`JsonStore::write`]: the closure works on a draft copy, and only when
//! it succeeds are the changed documents written to disk (temp file + rename)
//! and the draft swapped in. Both temp files are written before either is
//! renamed. A failed closure or a failed write leaves memory and disk
//! untouched, so a stock reservation and the order it belongs to are
//! committed together or not at all.

pub mod repository;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Order, Product};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub const PRODUCTS_FILE: &str = "products.json";
pub const ORDERS_FILE: &str = "orders.json";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store task failed: {0}")]
    Task(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// In-memory copy of both documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Documents {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

impl Documents {
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn order_mut(&mut self, id: &str) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    pub fn order_by_reference_mut(&mut self, reference: &str) -> Option<&mut Order> {
        self.orders
            .iter_mut()
            .find(|o| o.external_reference.as_deref() == Some(reference))
    }
}

/// Flat-file store for products and orders
pub struct JsonStore {
    products_path: PathBuf,
    orders_path: PathBuf,
    state: Mutex<Documents>,
}

impl JsonStore {
    /// Open the store in `data_dir`, creating the directory and empty
    /// documents when missing
    pub fn open(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = data_dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let products_path = dir.join(PRODUCTS_FILE);
        let orders_path = dir.join(ORDERS_FILE);

        let documents = Documents {
            products: load_or_init(&products_path)?,
            orders: load_or_init(&orders_path)?,
        };

        tracing::info!(
            data_dir = %dir.display(),
            products = documents.products.len(),
            orders = documents.orders.len(),
            "JSON store opened"
        );

        Ok(Self {
            products_path,
            orders_path,
            state: Mutex::new(documents),
        })
    }

    /// Read both documents under the lock
    pub fn read<R>(&self, f: impl FnOnce(&Documents) -> R) -> R {
        let guard = self.state.lock();
        f(&guard)
    }

    /// Atomic read-modify-write over both documents
    ///
    /// The closure gets a draft. Changed documents are first written to temp
    /// files, then renamed over their targets; if a step fails, documents
    /// already renamed are written back from the previous state, and memory
    /// keeps the previous state. Concurrent writers are serialized.
    pub fn write<R, E>(&self, f: impl FnOnce(&mut Documents) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StorageError>,
    {
        let mut guard = self.state.lock();
        let mut draft = guard.clone();
        let result = f(&mut draft)?;

        // 1. stage
        let mut staged = Vec::with_capacity(2);
        if let Err(e) = self.stage_changed(&guard, &draft, &mut staged) {
            discard(&staged);
            return Err(e.into());
        }

        // 2. commit
        for (i, (tmp, target)) in staged.iter().enumerate() {
            if let Err(e) = commit(tmp, target) {
                discard(&staged[i..]);
                for (_, done) in &staged[..i] {
                    self.restore(done, &guard);
                }
                return Err(e.into());
            }
        }

        *guard = draft;
        Ok(result)
    }

    /// [`JsonStore::write`] on the blocking pool, for callers on the async
    /// workers
    pub async fn write_blocking<R, E, F>(self: &Arc<Self>, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Documents) -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: From<StorageError> + Send + 'static,
    {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.write(f))
            .await
            .map_err(|e| {
                tracing::error!("spawn_blocking join error: {e}");
                E::from(StorageError::Task(e.to_string()))
            })?
    }

    fn stage_changed<'a>(
        &'a self,
        previous: &Documents,
        draft: &Documents,
        staged: &mut Vec<(PathBuf, &'a Path)>,
    ) -> StorageResult<()> {
        if draft.products != previous.products {
            let tmp = stage(&self.products_path, &draft.products)?;
            staged.push((tmp, self.products_path.as_path()));
        }
        if draft.orders != previous.orders {
            let tmp = stage(&self.orders_path, &draft.orders)?;
            staged.push((tmp, self.orders_path.as_path()));
        }
        Ok(())
    }

    /// Write `target` back from `previous` after a failed commit
    fn restore(&self, target: &Path, previous: &Documents) {
        let restored = if target == self.products_path.as_path() {
            persist(target, &previous.products)
        } else {
            persist(target, &previous.orders)
        };
        if let Err(e) = restored {
            tracing::error!(path = %target.display(), error = %e, "failed to roll back document");
        }
    }
}

fn load_or_init<T>(path: &Path) -> StorageResult<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    if !path.exists() {
        let empty: Vec<T> = Vec::new();
        persist(path, &empty)?;
        return Ok(empty);
    }

    let raw = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|source| StorageError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document next to its target, then rename over it
fn persist<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    let tmp = stage(path, value)?;
    let committed = commit(&tmp, path);
    if committed.is_err() {
        discard(&[(tmp, path)]);
    }
    committed
}

/// Write `value` to `{path}.tmp` and flush it; returns the temp path
fn stage<T: Serialize>(path: &Path, value: &T) -> StorageResult<PathBuf> {
    let tmp = path.with_extension("json.tmp");
    let io_err = |source: std::io::Error| StorageError::Io {
        path: tmp.clone(),
        source,
    };

    let json = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;

    let mut file = std::fs::File::create(&tmp).map_err(io_err)?;
    file.write_all(&json).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;
    Ok(tmp)
}

fn commit(tmp: &Path, target: &Path) -> StorageResult<()> {
    std::fs::rename(tmp, target).map_err(|source| StorageError::Io {
        path: target.to_path_buf(),
        source,
    })
}

/// Best-effort removal of staged temp files
fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        let _ = std::fs::remove_file(tmp);
    }
}
