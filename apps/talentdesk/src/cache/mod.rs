//! Progress cache: the string key-value side channel shared by every open view.
//!
//! Backends implement `ProgressCache`; callers go through the typed helpers
//! `read_record` / `write_record`, which own the JSON encoding and the schema
//! version check. Entries are never expired here.

pub mod memory;
pub mod records;
pub mod redis;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;

pub use memory::InMemoryProgressCache;
#[cfg(test)]
pub(crate) use memory::FailingWrites;
pub use records::{EnhancedResumeRecord, FitmentProgress, SavedEnhancement};
pub use self::redis::RedisProgressCache;

/// Layout version written into every record.
pub const SCHEMA_VERSION: u32 = 1;

/// Raw string storage. Injected into `AppState` as `Arc<dyn ProgressCache>`.
pub trait ProgressCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn clear(&self, key: &str) -> Result<(), AppError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheKey<'a> {
    FitmentProgress(&'a str),
    ResumeEnhancements(&'a str),
    EnhancedResume(&'a str),
}

impl fmt::Display for CacheKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::FitmentProgress(id) => write!(f, "fitment_progress_{id}"),
            CacheKey::ResumeEnhancements(id) => write!(f, "resume_enhancements_{id}"),
            CacheKey::EnhancedResume(id) => write!(f, "enhanced_resume_{id}"),
        }
    }
}

/// Records that carry a `schemaVersion` field.
pub trait Versioned {
    fn schema_version(&self) -> u32;
}

/// Reads and decodes a record. `Ok(None)` when the key is absent;
/// `MalformedCachedState` when the JSON does not parse or comes from a newer layout.
pub fn read_record<T>(cache: &dyn ProgressCache, key: CacheKey<'_>) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Versioned,
{
    let key = key.to_string();
    let Some(raw) = cache.get(&key)? else {
        return Ok(None);
    };

    let record: T = serde_json::from_str(&raw).map_err(|e| AppError::malformed(&key, e))?;
    if record.schema_version() > SCHEMA_VERSION {
        return Err(AppError::malformed(
            &key,
            format!("unsupported schema version {}", record.schema_version()),
        ));
    }
    Ok(Some(record))
}

pub fn write_record<T: Serialize>(
    cache: &dyn ProgressCache,
    key: CacheKey<'_>,
    record: &T,
) -> Result<(), AppError> {
    let key = key.to_string();
    let raw = serde_json::to_string(record)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode {key}: {e}")))?;
    debug!("Cache write {key} ({} bytes)", raw.len());
    cache.set(&key, &raw)
}

/// Raw values of a set of keys, taken before a multi-key write so a failed
/// write can put every key back the way it was.
#[derive(Debug)]
pub struct CacheRollback {
    entries: Vec<(String, Option<String>)>,
}

impl CacheRollback {
    pub fn capture(cache: &dyn ProgressCache, keys: &[CacheKey<'_>]) -> Result<Self, AppError> {
        let entries = keys
            .iter()
            .map(|key| {
                let key = key.to_string();
                let value = cache.get(&key)?;
                Ok((key, value))
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(Self { entries })
    }

    /// Best effort: a key that cannot be restored is logged and skipped.
    pub fn restore(self, cache: &dyn ProgressCache) {
        for (key, value) in self.entries {
            let result = match &value {
                Some(raw) => cache.set(&key, raw),
                None => cache.clear(&key),
            };
            if let Err(e) = result {
                warn!("Could not restore cache key {key}: {e}");
            }
        }
    }
}

pub(crate) fn legacy_schema_version() -> u32 {
    SCHEMA_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(
            CacheKey::FitmentProgress("4").to_string(),
            "fitment_progress_4"
        );
        assert_eq!(
            CacheKey::ResumeEnhancements("4").to_string(),
            "resume_enhancements_4"
        );
        assert_eq!(CacheKey::EnhancedResume("4").to_string(), "enhanced_resume_4");
    }

    #[test]
    fn test_read_missing_key_is_none() {
        let cache = InMemoryProgressCache::default();
        let record: Option<FitmentProgress> =
            read_record(&cache, CacheKey::FitmentProgress("1")).unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn test_read_garbage_is_malformed() {
        let cache = InMemoryProgressCache::default();
        cache.set("fitment_progress_1", "{not json").unwrap();
        let err = read_record::<FitmentProgress>(&cache, CacheKey::FitmentProgress("1"))
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedCachedState { .. }));
    }

    #[test]
    fn test_newer_schema_is_malformed() {
        let cache = InMemoryProgressCache::default();
        cache
            .set(
                "fitment_progress_1",
                r#"{"schemaVersion":7,"currentScore":80,"timestamp":1}"#,
            )
            .unwrap();
        let err = read_record::<FitmentProgress>(&cache, CacheKey::FitmentProgress("1"))
            .unwrap_err();
        assert_eq!(err.code(), "MALFORMED_CACHED_STATE");
    }

    #[test]
    fn test_legacy_record_without_version_reads() {
        let cache = InMemoryProgressCache::default();
        cache
            .set(
                "fitment_progress_1",
                r#"{"currentScore":84,"timestamp":1700000000000}"#,
            )
            .unwrap();
        let record = read_record::<FitmentProgress>(&cache, CacheKey::FitmentProgress("1"))
            .unwrap()
            .unwrap();
        assert_eq!(record.current_score, 84);
        assert_eq!(record.schema_version, SCHEMA_VERSION);
        assert_eq!(record.revision, 0);
    }

    #[test]
    fn test_rollback_restores_and_clears() {
        let cache = InMemoryProgressCache::default();
        cache.set("fitment_progress_2", "before").unwrap();
        let rollback = CacheRollback::capture(
            &cache,
            &[CacheKey::FitmentProgress("2"), CacheKey::EnhancedResume("2")],
        )
        .unwrap();

        cache.set("fitment_progress_2", "after").unwrap();
        cache.set("enhanced_resume_2", "after").unwrap();
        rollback.restore(&cache);

        assert_eq!(cache.get("fitment_progress_2").unwrap().as_deref(), Some("before"));
        assert!(cache.get("enhanced_resume_2").unwrap().is_none());
    }
}
