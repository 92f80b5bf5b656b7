use ::redis::Client as RedisClient;
use tracing::info;

use super::ProgressCache;
use crate::errors::AppError;

/// Redis-backed cache so several dashboard processes see the same progress.
/// Opens a connection per call; traffic is a handful of writes per session.
///
/// Every call blocks on the network. Async callers go through
/// `tokio::task::spawn_blocking`, see `AppState::blocking`.
pub struct RedisProgressCache {
    client: RedisClient,
}

impl RedisProgressCache {
    pub fn open(redis_url: &str) -> Result<Self, AppError> {
        let client = RedisClient::open(redis_url)?;
        info!("Redis progress cache initialized");
        Ok(Self { client })
    }
}

impl ProgressCache for RedisProgressCache {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut con = self.client.get_connection()?;
        Ok(::redis::cmd("GET").arg(key).query(&mut con)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut con = self.client.get_connection()?;
        ::redis::cmd("SET").arg(key).arg(value).query::<()>(&mut con)?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), AppError> {
        let mut con = self.client.get_connection()?;
        ::redis::cmd("DEL").arg(key).query::<()>(&mut con)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_malformed_url() {
        let result = RedisProgressCache::open("not a redis url");
        assert!(matches!(result, Err(AppError::Cache(_))));
    }
}
