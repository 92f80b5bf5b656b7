use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::cache::{InMemoryProgressCache, ProgressCache, RedisProgressCache};
use crate::config::Config;
use crate::enhancement::{DeltaTable, ResumeEnhancer, ScriptedEnhancer};
use crate::errors::AppError;
use crate::store::{RecordStore, SeedData};

/// Shared application state handed to every dashboard command.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<RecordStore>>,
    /// Progress cache. Default: in-memory. Redis when `REDIS_URL` is set.
    pub cache: Arc<dyn ProgressCache>,
    /// Pluggable enhancement backend. Default: ScriptedEnhancer.
    pub enhancer: Arc<dyn ResumeEnhancer>,
    pub deltas: DeltaTable,
    pub config: Config,
}

impl AppState {
    pub fn new(
        store: RecordStore,
        cache: Arc<dyn ProgressCache>,
        enhancer: Arc<dyn ResumeEnhancer>,
        config: Config,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            cache,
            enhancer,
            deltas: DeltaTable::default(),
            config,
        }
    }

    /// Seeds the store and picks the cache backend from `config`.
    pub fn bootstrap(config: Config) -> Result<Self> {
        let store = RecordStore::new(SeedData::mock(Utc::now()));

        let cache: Arc<dyn ProgressCache> = match &config.redis_url {
            Some(url) => {
                let redis = RedisProgressCache::open(url)
                    .with_context(|| format!("Failed to open Redis progress cache at {url}"))?;
                info!("Progress cache: redis");
                Arc::new(redis)
            }
            None => {
                info!("Progress cache: in-memory");
                Arc::new(InMemoryProgressCache::default())
            }
        };

        let enhancer = Arc::new(ScriptedEnhancer::new(config.required_skills.clone()));
        info!(
            "Enhancer: scripted ({} required skills, {}ms per step)",
            config.required_skills.len(),
            config.enhancement_step_delay_ms
        );

        Ok(Self::new(store, cache, enhancer, config))
    }

    /// Runs a synchronous command on tokio's blocking pool, so a
    /// network-backed cache does not stall the runtime's worker threads.
    pub async fn blocking<T, F>(&self, command: F) -> Result<T, AppError>
    where
        F: FnOnce(&AppState) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || command(&state))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("blocking command failed: {e}")))?
    }

    pub fn read_store(&self) -> Result<RwLockReadGuard<'_, RecordStore>, AppError> {
        self.store
            .read()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("record store lock poisoned")))
    }

    pub fn write_store(&self) -> Result<RwLockWriteGuard<'_, RecordStore>, AppError> {
        self.store
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("record store lock poisoned")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_defaults_to_memory_cache() {
        let state = AppState::bootstrap(Config::default()).unwrap();
        assert_eq!(state.read_store().unwrap().jobs().len(), 5);
        assert!(state.cache.get("fitment_progress_1").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blocking_runs_command_against_shared_state() {
        let state = AppState::bootstrap(Config::default()).unwrap();
        let name = state
            .blocking(|s| Ok(s.read_store()?.candidate("3")?.name.clone()))
            .await
            .unwrap();
        assert_eq!(name, state.read_store().unwrap().candidate("3").unwrap().name);

        let err = state
            .blocking(|s| s.read_store()?.job("missing").map(|j| j.id.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_bootstrap_rejects_bad_redis_url() {
        let config = Config {
            redis_url: Some("not a url".to_string()),
            ..Config::default()
        };
        assert!(AppState::bootstrap(config).is_err());
    }
}
