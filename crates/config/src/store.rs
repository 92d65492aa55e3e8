//! Catalog Store
//!
//! Shares one catalog snapshot between every session. Readers take an
//! `Arc` snapshot per call; `replace` and `reload` swap the snapshot so
//! edits show up without rebuilding the components that read it.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::ServiceCatalog;
use crate::error::Result;

pub struct CatalogStore {
    current: RwLock<Arc<ServiceCatalog>>,
    /// File the catalog was loaded from, if any
    source: Option<PathBuf>,
}

impl CatalogStore {
    /// Wrap an already validated catalog
    pub fn new(catalog: ServiceCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
            source: None,
        }
    }

    /// Store backed by the built-in catalog
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(ServiceCatalog::builtin()?))
    }

    /// Store backed by a YAML file that `reload` re-reads
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let catalog = ServiceCatalog::load(path.as_ref())?;
        Ok(Self {
            current: RwLock::new(Arc::new(catalog)),
            source: Some(path.as_ref().to_path_buf()),
        })
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Arc<ServiceCatalog> {
        Arc::clone(&self.current.read())
    }

    /// Swap in a new catalog after validating it
    pub fn replace(&self, catalog: ServiceCatalog) -> Result<()> {
        catalog.validate()?;
        *self.current.write() = Arc::new(catalog);
        tracing::debug!("Catalog snapshot replaced");
        Ok(())
    }

    /// Re-read the source file. Returns `false` for stores without one.
    ///
    /// On a load error the current snapshot stays in place.
    pub fn reload(&self) -> Result<bool> {
        let Some(ref path) = self.source else {
            return Ok(false);
        };

        let catalog = ServiceCatalog::load(path)?;
        *self.current.write() = Arc::new(catalog);
        Ok(true)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("services", &self.current.read().services.len())
            .field("source", &self.source)
            .finish()
    }
}
