use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Datelike;
use models::RecordStore;
use tokio::sync::{Mutex, RwLock};

use crate::config::Config;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Config,
    pub(crate) http_client: reqwest::Client,
    cache: Arc<RwLock<Option<CachedStore>>>,
    refresh_lock: Arc<Mutex<()>>,
}

#[derive(Clone)]
struct CachedStore {
    store: Arc<RecordStore>,
    loaded_at: Instant,
}

impl AppState {
    pub(crate) fn new(config: Config, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
            cache: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    pub(crate) async fn store_loaded(&self) -> bool {
        self.cache.read().await.is_some()
    }

    /// The cached record store, reloading the sheet when the cache is empty
    /// or older than the configured TTL. A failed refresh keeps serving the
    /// last-known-good store; a failed first load surfaces the cause.
    pub(crate) async fn store(&self) -> Result<Arc<RecordStore>> {
        let ttl = Duration::from_secs(self.config.cache_ttl_secs);

        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.loaded_at.elapsed() < ttl {
                return Ok(cached.store.clone());
            }
        }

        // One refresh in flight at a time; waiters reuse its result.
        let _guard = self.refresh_lock.lock().await;
        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.loaded_at.elapsed() < ttl {
                return Ok(cached.store.clone());
            }
        }

        let current_year = chrono::Local::now().year();
        match songsheet::fetch_records(&self.http_client, &self.config.sheet_url, current_year)
            .await
        {
            Ok(records) => {
                let store = Arc::new(RecordStore::new(records));
                *self.cache.write().await = Some(CachedStore {
                    store: store.clone(),
                    loaded_at: Instant::now(),
                });
                Ok(store)
            }
            Err(e) => {
                let stale = self.cache.read().await.as_ref().map(|c| c.store.clone());
                match stale {
                    Some(store) => {
                        tracing::warn!("Sheet refresh failed, serving last-known-good store: {e:#}");
                        Ok(store)
                    }
                    None => Err(AppError::Upstream(format!(
                        "failed to load performance sheet: {e:#}"
                    ))),
                }
            }
        }
    }
}
