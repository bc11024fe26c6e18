//! Process bootstrap: open the store, register modules, serve until shutdown.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use librarian_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules::{
    self,
    books::routes::SharedStore,
    books::store::{MemoryBookStore, MongoBookStore},
};

/// Where books are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Mongo,
    /// Process-local store; nothing is persisted.
    Memory,
}

/// Open the store selected by `backend`.
pub async fn open_store(settings: &Settings, backend: StoreBackend) -> anyhow::Result<SharedStore> {
    let store: SharedStore = match backend {
        StoreBackend::Mongo => {
            let database = librarian_db::connect(&settings.database)
                .await
                .context("failed to connect to the document store")?;
            Arc::new(MongoBookStore::new(&database, &settings.database.collection))
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store; books are lost on exit");
            Arc::new(MemoryBookStore::new())
        }
    };
    Ok(store)
}

/// Registry holding every service module bound to `store`.
pub fn registry(store: SharedStore) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);
    registry
}

/// Full application router for `store`, without binding a listener.
pub fn app(store: SharedStore, settings: &Settings) -> Router {
    librarian_http::build_router(&registry(store), settings)
}

/// Run the service until a shutdown signal arrives.
pub async fn run(settings: Settings, backend: StoreBackend) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        database = %settings.database.name,
        ?backend,
        "librarian bootstrap starting"
    );

    let store = open_store(&settings, backend).await?;
    let registry = registry(store);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;
    tracing::info!("librarian bootstrap complete");

    let served = librarian_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
