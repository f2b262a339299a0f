use std::sync::Arc;

use sockwarehouse_infra::{InMemoryStockStore, InventoryService, StockStore, StoreError};
use sockwarehouse_observability::{Observer, TracingObserver};

use crate::config::ApiConfig;

pub type DynStockStore = Arc<dyn StockStore>;
pub type DynObserver = Arc<dyn Observer>;
pub type AppInventoryService = InventoryService<DynStockStore, DynObserver>;

/// Which store backs the running service.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres,
}

pub struct AppServices {
    inventory: AppInventoryService,
    backend: StoreBackend,
}

impl AppServices {
    pub fn new(store: DynStockStore, observer: DynObserver, backend: StoreBackend) -> Self {
        Self {
            inventory: InventoryService::new(store, observer),
            backend,
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory(observer: DynObserver) -> Self {
        Self::new(Arc::new(InMemoryStockStore::new()), observer, StoreBackend::InMemory)
    }

    pub fn inventory(&self) -> &AppInventoryService {
        &self.inventory
    }

    pub fn backend(&self) -> StoreBackend {
        self.backend
    }
}

pub async fn build_services(config: &ApiConfig) -> Result<AppServices, StoreError> {
    let observer: DynObserver = Arc::new(TracingObserver);

    if config.use_persistent_stores {
        #[cfg(feature = "postgres")]
        {
            return build_persistent_services(config, observer).await;
        }
        #[cfg(not(feature = "postgres"))]
        {
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but postgres feature not enabled, falling back to in-memory"
            );
        }
    }

    tracing::info!(backend = "in_memory", "stock store ready");
    Ok(AppServices::in_memory(observer))
}

#[cfg(feature = "postgres")]
async fn build_persistent_services(config: &ApiConfig, observer: DynObserver) -> Result<AppServices, StoreError> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| StoreError::Backend("DATABASE_URL is not configured".to_string()))?;

    let store = sockwarehouse_infra::PostgresStockStore::connect(database_url).await?;
    tracing::info!(backend = "postgres", "stock store ready");

    Ok(AppServices::new(Arc::new(store), observer, StoreBackend::Postgres))
}
