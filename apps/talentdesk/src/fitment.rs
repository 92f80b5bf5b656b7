//! Fitment Mutation API: store updates written through to the progress cache.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::cache::{read_record, write_record, CacheKey, FitmentProgress, ProgressCache, SCHEMA_VERSION};
use crate::errors::AppError;
use crate::store::RecordStore;

/// Clamps `score` to [0, 100], updates the candidate, then records the new
/// score under `fitment_progress_<id>` with the next revision.
///
/// An unknown candidate fails with `NotFound` before anything is written.
/// When the progress write fails the candidate is restored and the error returned.
pub fn apply_fitment_update(
    store: &mut RecordStore,
    cache: &dyn ProgressCache,
    candidate_id: &str,
    score: i32,
    skills: Option<Vec<String>>,
    now: DateTime<Utc>,
) -> Result<FitmentProgress, AppError> {
    let score = score.clamp(0, 100) as u8;
    let previous = store.candidate(candidate_id)?.clone();
    let revision = progress_revision(cache, candidate_id) + 1;

    store.update_candidate_fitment(candidate_id, score, skills)?;

    let progress = FitmentProgress {
        schema_version: SCHEMA_VERSION,
        current_score: score,
        timestamp: now.timestamp_millis(),
        revision,
    };
    if let Err(e) = write_record(cache, CacheKey::FitmentProgress(candidate_id), &progress) {
        warn!("Progress write for candidate {candidate_id} failed, restoring store: {e}");
        store.update_candidate_fitment(candidate_id, previous.fitment_score, Some(previous.skills))?;
        return Err(e);
    }

    info!("Fitment for candidate {candidate_id} saved: {score} (revision {revision})");
    Ok(progress)
}

/// The score kanban cards show: the cached progress when readable, else the
/// store value.
pub fn current_fitment_score(
    store: &RecordStore,
    cache: &dyn ProgressCache,
    candidate_id: &str,
) -> Result<u8, AppError> {
    let stored = store.candidate(candidate_id)?.fitment_score;
    match read_record::<FitmentProgress>(cache, CacheKey::FitmentProgress(candidate_id)) {
        Ok(Some(progress)) => Ok(progress.current_score.min(100)),
        Ok(None) => Ok(stored),
        Err(e) => {
            warn!("Falling back to stored fitment for candidate {candidate_id}: {e}");
            Ok(stored)
        }
    }
}

/// Latest progress revision for a candidate; 0 when nothing readable is cached.
pub fn progress_revision(cache: &dyn ProgressCache, candidate_id: &str) -> u64 {
    match read_record::<FitmentProgress>(cache, CacheKey::FitmentProgress(candidate_id)) {
        Ok(progress) => progress.map(|p| p.revision).unwrap_or(0),
        Err(e) => {
            warn!("Unreadable fitment progress for candidate {candidate_id}: {e}");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FailingWrites, InMemoryProgressCache};
    use crate::store::SeedData;

    fn setup() -> (RecordStore, InMemoryProgressCache) {
        (
            RecordStore::new(SeedData::mock(Utc::now())),
            InMemoryProgressCache::default(),
        )
    }

    #[test]
    fn test_update_writes_through() {
        let (mut store, cache) = setup();
        let now = Utc::now();
        let progress = apply_fitment_update(&mut store, &cache, "4", 76, None, now).unwrap();

        assert_eq!(progress.current_score, 76);
        assert_eq!(progress.revision, 1);
        assert_eq!(progress.timestamp, now.timestamp_millis());
        assert_eq!(store.candidate("4").unwrap().fitment_score, 76);

        let raw = cache.get("fitment_progress_4").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["currentScore"], 76);
        assert_eq!(value["schemaVersion"], 1);
    }

    #[test]
    fn test_unknown_candidate_changes_nothing() {
        let (mut store, cache) = setup();
        let before = store.candidates().to_vec();

        let err =
            apply_fitment_update(&mut store, &cache, "nonexistent", 90, None, Utc::now()).unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.candidates(), before.as_slice());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_score_is_clamped_and_skills_replaced() {
        let (mut store, cache) = setup();
        let skills = vec!["Java".to_string(), "Git".to_string()];
        apply_fitment_update(&mut store, &cache, "1", 130, Some(skills.clone()), Utc::now()).unwrap();
        let candidate = store.candidate("1").unwrap();
        assert_eq!(candidate.fitment_score, 100);
        assert_eq!(candidate.skills, skills);

        apply_fitment_update(&mut store, &cache, "1", -5, None, Utc::now()).unwrap();
        assert_eq!(store.candidate("1").unwrap().fitment_score, 0);
        assert_eq!(store.candidate("1").unwrap().skills, skills);
    }

    #[test]
    fn test_failed_progress_write_restores_candidate() {
        let mut store = RecordStore::new(SeedData::mock(Utc::now()));
        let cache = FailingWrites::on("fitment_progress_");
        let before = store.candidate("4").unwrap().clone();

        let err = apply_fitment_update(
            &mut store,
            &cache,
            "4",
            90,
            Some(vec!["Rust".to_string()]),
            Utc::now(),
        )
        .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(store.candidate("4").unwrap(), &before);
        assert!(cache.get("fitment_progress_4").unwrap().is_none());
    }

    #[test]
    fn test_revision_increments_per_write() {
        let (mut store, cache) = setup();
        apply_fitment_update(&mut store, &cache, "3", 74, None, Utc::now()).unwrap();
        apply_fitment_update(&mut store, &cache, "3", 75, None, Utc::now()).unwrap();
        assert_eq!(progress_revision(&cache, "3"), 2);
        assert_eq!(progress_revision(&cache, "1"), 0);
    }

    #[test]
    fn test_displayed_score_prefers_cache() {
        let (mut store, cache) = setup();
        assert_eq!(current_fitment_score(&store, &cache, "5").unwrap(), 63);
        apply_fitment_update(&mut store, &cache, "5", 70, None, Utc::now()).unwrap();
        assert_eq!(current_fitment_score(&store, &cache, "5").unwrap(), 70);
    }

    #[test]
    fn test_malformed_progress_falls_back_to_store() {
        let (store, cache) = setup();
        cache.set("fitment_progress_6", "{\"currentScore\":").unwrap();
        assert_eq!(current_fitment_score(&store, &cache, "6").unwrap(), 58);
        assert_eq!(progress_revision(&cache, "6"), 0);
    }

    #[test]
    fn test_displayed_score_for_unknown_candidate() {
        let (store, cache) = setup();
        assert!(matches!(
            current_fitment_score(&store, &cache, "99"),
            Err(AppError::NotFound(_))
        ));
    }
}
