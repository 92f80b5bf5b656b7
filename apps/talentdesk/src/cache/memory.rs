use std::collections::HashMap;
use std::sync::Mutex;

use super::ProgressCache;
use crate::errors::AppError;

/// Process-local backend; the default when no Redis URL is configured.
#[derive(Debug, Default)]
pub struct InMemoryProgressCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryProgressCache {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, AppError> {
        self.entries
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("progress cache lock poisoned")))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgressCache for InMemoryProgressCache {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), AppError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Test double: reads pass through, writes to keys starting with
/// `fail_prefix` fail. An empty prefix fails every write.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingWrites {
    pub inner: InMemoryProgressCache,
    pub fail_prefix: &'static str,
}

#[cfg(test)]
impl FailingWrites {
    pub fn on(fail_prefix: &'static str) -> Self {
        Self {
            inner: InMemoryProgressCache::default(),
            fail_prefix,
        }
    }
}

#[cfg(test)]
impl ProgressCache for FailingWrites {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        if key.starts_with(self.fail_prefix) {
            return Err(AppError::Internal(anyhow::anyhow!("backend down")));
        }
        self.inner.set(key, value)
    }

    fn clear(&self, key: &str) -> Result<(), AppError> {
        self.inner.clear(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let cache = InMemoryProgressCache::default();
        assert!(cache.is_empty());
        cache.set("k", "v").unwrap();
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("v"));
        cache.set("k", "w").unwrap();
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("w"));
        assert_eq!(cache.len(), 1);
        cache.clear("k").unwrap();
        assert!(cache.get("k").unwrap().is_none());
    }
}
