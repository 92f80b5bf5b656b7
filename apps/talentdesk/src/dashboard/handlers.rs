//! Inbound commands of the dashboard View Layer.
//!
//! Each command takes the shared `AppState` plus the per-view state it acts
//! on, and returns plain data the view renders. Failures are `AppError`s the
//! view shows through `AppError::to_body()`.

use chrono::Utc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cache::{
    read_record, write_record, CacheKey, CacheRollback, EnhancedResumeRecord, SavedEnhancement,
    SCHEMA_VERSION,
};
use crate::dashboard::{DashboardSession, JobTab};
use crate::enhancement::{
    runner, EnhancementResult, EnhancementSession, EntrySection, ProgressStep, SectionKey,
    SectionState,
};
use crate::errors::AppError;
use crate::fitment::{apply_fitment_update, current_fitment_score, progress_revision};
use crate::models::{Candidate, Job, NewJob, ResumeRecord, Stage};
use crate::query::{candidates_by_stage, candidates_for_job, filtered_sorted_jobs};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBoard {
    pub jobs: Vec<Job>,
    pub has_active_filters: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanCard {
    pub candidate: Candidate,
    /// Cached progress when present, else the stored score.
    pub displayed_score: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanColumn {
    pub stage: Stage,
    pub title: &'static str,
    pub cards: Vec<KanbanCard>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUpdate {
    pub key: SectionKey,
    pub state: SectionState,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillToggle {
    pub skill: String,
    pub selected: bool,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub candidate_id: String,
    pub score: u8,
    pub skills: Vec<String>,
    pub revision: u64,
}

// ────────────────────────────────────────────────────────────────────────────
// Job list and selection
// ────────────────────────────────────────────────────────────────────────────

/// Creates a job from the form and prepends it to the list.
pub fn create_job(state: &AppState, form: NewJob) -> Result<Job, AppError> {
    let job = state.write_store()?.create_job(form, Utc::now())?;
    info!("Job {} created: {}", job.id, job.title);
    Ok(job)
}

pub fn select_job(
    state: &AppState,
    session: &mut DashboardSession,
    job_id: &str,
) -> Result<Job, AppError> {
    let job = state.read_store()?.job(job_id)?.clone();
    session.selected_job_id = Some(job.id.clone());
    Ok(job)
}

pub fn select_tab(session: &mut DashboardSession, tab: JobTab) {
    session.selected_tab = tab;
}

/// The sidebar list under the session's search, filters and sort.
pub fn job_board(state: &AppState, session: &DashboardSession) -> Result<JobBoard, AppError> {
    let store = state.read_store()?;
    Ok(JobBoard {
        jobs: filtered_sorted_jobs(
            store.jobs(),
            &session.search_term,
            &session.filters,
            session.sort_by,
        ),
        has_active_filters: session.has_active_filters(),
    })
}

/// The selected job, or `None` when nothing is selected or it no longer exists.
pub fn selected_job(state: &AppState, session: &DashboardSession) -> Result<Option<Job>, AppError> {
    let Some(job_id) = session.selected_job_id.as_deref() else {
        return Ok(None);
    };
    Ok(state.read_store()?.job(job_id).ok().cloned())
}

// ────────────────────────────────────────────────────────────────────────────
// Candidates
// ────────────────────────────────────────────────────────────────────────────

/// Candidates of the selected job grouped into the three stage columns.
pub fn kanban(state: &AppState, session: &DashboardSession) -> Result<Vec<KanbanColumn>, AppError> {
    let job_id = session
        .selected_job_id
        .as_deref()
        .ok_or_else(|| AppError::Validation("No job selected".to_string()))?;

    let store = state.read_store()?;
    let candidates = candidates_for_job(store.candidates(), job_id);

    Stage::ALL
        .iter()
        .map(|stage| -> Result<KanbanColumn, AppError> {
            let cards = candidates_by_stage(&candidates, *stage)
                .into_iter()
                .map(|candidate| -> Result<KanbanCard, AppError> {
                    let displayed_score =
                        current_fitment_score(&store, state.cache.as_ref(), &candidate.id)?;
                    Ok(KanbanCard {
                        candidate,
                        displayed_score,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(KanbanColumn {
                stage: *stage,
                title: stage.title(),
                cards,
            })
        })
        .collect()
}

pub fn move_candidate(state: &AppState, candidate_id: &str, stage: Stage) -> Result<Candidate, AppError> {
    let mut store = state.write_store()?;
    Ok(store.move_candidate(candidate_id, stage)?.clone())
}

/// Replaces a candidate's skill list.
pub fn update_candidate_skills(
    state: &AppState,
    candidate_id: &str,
    skills: Vec<String>,
) -> Result<Candidate, AppError> {
    let mut store = state.write_store()?;
    let candidate = store.update_candidate_skills(candidate_id, skills)?;
    info!("Candidate {candidate_id} skills set to {:?}", candidate.skills);
    Ok(candidate.clone())
}

/// The résumé the viewer shows: the last saved enhancement when readable,
/// else the seeded one.
pub fn view_resume(state: &AppState, candidate_id: &str) -> Result<ResumeRecord, AppError> {
    let store = state.read_store()?;
    store.candidate(candidate_id)?;

    match read_record::<EnhancedResumeRecord>(state.cache.as_ref(), CacheKey::EnhancedResume(candidate_id)) {
        Ok(Some(record)) => return Ok(record.resume),
        Ok(None) => {}
        Err(e) => warn!("Showing seeded résumé for candidate {candidate_id}: {e}"),
    }
    Ok(store.resume(candidate_id)?.clone())
}

// ────────────────────────────────────────────────────────────────────────────
// Enhancement dialog
// ────────────────────────────────────────────────────────────────────────────

/// Opens the enhancer for a candidate, re-entering any saved session.
pub fn open_enhancer(state: &AppState, candidate_id: &str) -> Result<EnhancementSession, AppError> {
    let store = state.read_store()?;
    let candidate = store.candidate(candidate_id)?;
    let resume = store.resume(candidate_id)?.clone();

    let cache = state.cache.as_ref();
    let saved = match read_record::<SavedEnhancement>(cache, CacheKey::ResumeEnhancements(candidate_id)) {
        Ok(saved) => saved,
        Err(e) => {
            warn!("Ignoring saved enhancement for candidate {candidate_id}: {e}");
            None
        }
    };
    let revision = progress_revision(cache, candidate_id);

    Ok(EnhancementSession::open(candidate, resume, state.deltas.clone(), saved)
        .with_opened_revision(revision))
}

/// Runs the configured enhancer with progress steps and loads its suggestions
/// into the session. A cancelled run leaves the session untouched.
pub async fn run_enhancement<F>(
    state: &AppState,
    session: &mut EnhancementSession,
    cancel: &CancellationToken,
    on_progress: F,
) -> Result<EnhancementResult, AppError>
where
    F: FnMut(&ProgressStep),
{
    let input = session.enhancement_input();
    let result = runner::run_enhancement(
        state.enhancer.as_ref(),
        &input,
        state.config.step_delay(),
        cancel,
        on_progress,
    )
    .await?;
    session.apply_enhancement(&result);
    Ok(result)
}

fn section_update(session: &EnhancementSession, key: SectionKey) -> Result<SectionUpdate, AppError> {
    Ok(SectionUpdate {
        key,
        state: session.state(&key)?,
        score: session.score(),
    })
}

pub fn accept_section(session: &mut EnhancementSession, key: SectionKey) -> Result<SectionUpdate, AppError> {
    session.accept(key)?;
    section_update(session, key)
}

pub fn reject_section(session: &mut EnhancementSession, key: SectionKey) -> Result<SectionUpdate, AppError> {
    session.reject(key)?;
    section_update(session, key)
}

pub fn edit_section(session: &mut EnhancementSession, key: SectionKey) -> Result<SectionUpdate, AppError> {
    session.edit(key)?;
    section_update(session, key)
}

pub fn update_section_draft(
    session: &mut EnhancementSession,
    key: SectionKey,
    text: &str,
) -> Result<SectionUpdate, AppError> {
    session.update_draft(key, text)?;
    section_update(session, key)
}

pub fn save_section_edit(session: &mut EnhancementSession, key: SectionKey) -> Result<SectionUpdate, AppError> {
    session.save_edit(key)?;
    section_update(session, key)
}

pub fn undo_section(session: &mut EnhancementSession, key: SectionKey) -> Result<SectionUpdate, AppError> {
    session.undo(key)?;
    section_update(session, key)
}

pub fn cancel_section_edit(session: &mut EnhancementSession, key: SectionKey) -> Result<SectionUpdate, AppError> {
    session.cancel_edit(key)?;
    section_update(session, key)
}

pub fn add_section_entry(session: &mut EnhancementSession, section: EntrySection) -> Result<SectionUpdate, AppError> {
    let key = session.add_entry(section);
    section_update(session, key)
}

pub fn toggle_skill(session: &mut EnhancementSession, skill: &str) -> Result<SkillToggle, AppError> {
    let selected = session.toggle_skill(skill)?;
    Ok(SkillToggle {
        skill: skill.to_string(),
        selected,
        score: session.score(),
    })
}

/// Persists the session: candidate score and skills in the store, then the
/// progress, session snapshot and enhanced résumé in the cache.
///
/// Fails with `VersionConflict` when another view saved this candidate after
/// the session was opened. When any write fails, the candidate and all three
/// cache records are put back as they were.
pub fn save_enhancement(state: &AppState, session: &mut EnhancementSession) -> Result<SaveReceipt, AppError> {
    if !session.is_enhanced() {
        return Err(AppError::Validation(
            "Run the enhancement before saving".to_string(),
        ));
    }

    let mut store = state.write_store()?;
    let cache = state.cache.as_ref();
    let candidate_id = session.candidate_id().to_string();

    let found = progress_revision(cache, &candidate_id);
    if found != session.opened_revision() {
        warn!(
            "Rejecting stale enhancement save for candidate {candidate_id}: opened at revision {}, now {found}",
            session.opened_revision()
        );
        return Err(AppError::VersionConflict {
            key: CacheKey::FitmentProgress(&candidate_id).to_string(),
            expected: session.opened_revision(),
            found,
        });
    }

    let previous = store.candidate(&candidate_id)?.clone();
    let rollback = CacheRollback::capture(
        cache,
        &[
            CacheKey::FitmentProgress(&candidate_id),
            CacheKey::ResumeEnhancements(&candidate_id),
            CacheKey::EnhancedResume(&candidate_id),
        ],
    )?;

    let now = Utc::now();
    let outcome = session.finish(now);
    let progress = apply_fitment_update(
        &mut store,
        cache,
        &candidate_id,
        i32::from(outcome.score),
        outcome.skills.clone(),
        now,
    )?;

    let resume_record = EnhancedResumeRecord {
        schema_version: SCHEMA_VERSION,
        resume: outcome.enhanced_resume,
    };
    let written = write_record(cache, CacheKey::ResumeEnhancements(&candidate_id), &outcome.saved)
        .and_then(|()| write_record(cache, CacheKey::EnhancedResume(&candidate_id), &resume_record));
    if let Err(e) = written {
        warn!("Enhancement save for candidate {candidate_id} failed, rolling back: {e}");
        store.update_candidate_fitment(&candidate_id, previous.fitment_score, Some(previous.skills))?;
        rollback.restore(cache);
        return Err(e);
    }
    session.mark_saved(progress.revision);

    info!(
        "Enhancement saved for candidate {candidate_id}: score {} (revision {})",
        outcome.score, progress.revision
    );
    Ok(SaveReceipt {
        skills: store.candidate(&candidate_id)?.skills.clone(),
        candidate_id,
        score: outcome.score,
        revision: progress.revision,
    })
}
