//! Enhancement session: the per-section review state machine of one open
//! enhancer dialog.
//!
//! Transitions per section:
//!
//! | from     | accept   | reject   | edit    | save_edit | undo / cancel_edit |
//! |----------|----------|----------|---------|-----------|--------------------|
//! | original | accepted | rejected | editing | -         | (no-op)            |
//! | accepted | (no-op)  | rejected | editing | -         | original           |
//! | rejected | accepted | (no-op)  | editing | -         | original           |
//! | editing  | -        | -        | -       | accepted  | original           |
//!
//! Score bookkeeping: entering a counted state credits the section's delta,
//! clamped to [0, 100], and records the amount actually applied. Leaving it
//! debits exactly that amount. So the running score is always
//! `base + Σ applied credits` and accept-then-undo restores the prior score.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::{SavedEnhancement, SCHEMA_VERSION};
use crate::enhancement::scripted::{EnhancementInput, EnhancementResult};
use crate::enhancement::section::{
    apply_section_text, entry_list_mut, section_text, DeltaTable, EntrySection, FixedSection,
    SectionKey, SectionSnapshot, SectionState, SkillCredit,
};
use crate::errors::AppError;
use crate::models::{Candidate, ResumeRecord};

const MAX_SCORE: i32 = 100;

/// What a finished session persists: the store update plus the cache records.
#[derive(Debug, Clone, Serialize)]
pub struct EnhancementOutcome {
    pub candidate_id: String,
    pub score: u8,
    /// Replacement skills for the candidate, when the session changed them.
    pub skills: Option<Vec<String>>,
    pub enhanced_resume: ResumeRecord,
    pub saved: SavedEnhancement,
    /// Progress revision observed when the session opened.
    pub opened_revision: u64,
}

#[derive(Debug, Clone)]
pub struct EnhancementSession {
    candidate_id: String,
    base_score: u8,
    score: u8,
    deltas: DeltaTable,
    original: ResumeRecord,
    states: HashMap<SectionKey, SectionState>,
    content: HashMap<SectionKey, String>,
    drafts: HashMap<SectionKey, String>,
    credits: HashMap<SectionKey, i32>,
    entries: Vec<SectionKey>,
    suggested_skills: Vec<String>,
    selected_skills: Vec<SkillCredit>,
    summary: String,
    enhanced: bool,
    /// Set once this session, or the one it restores, decided the candidate's skills.
    owns_skills: bool,
    opened_revision: u64,
}

impl EnhancementSession {
    /// Opens a session at the candidate's score with every section `original`,
    /// or re-enters the state of a previously saved session.
    pub fn open(
        candidate: &Candidate,
        original: ResumeRecord,
        deltas: DeltaTable,
        saved: Option<SavedEnhancement>,
    ) -> Self {
        let content = FixedSection::ALL
            .iter()
            .map(|s| (SectionKey::from(*s), section_text(&original, *s)))
            .collect();

        let mut session = Self {
            candidate_id: candidate.id.clone(),
            base_score: candidate.fitment_score.min(MAX_SCORE as u8),
            score: candidate.fitment_score.min(MAX_SCORE as u8),
            deltas,
            original,
            states: HashMap::new(),
            content,
            drafts: HashMap::new(),
            credits: HashMap::new(),
            entries: Vec::new(),
            suggested_skills: Vec::new(),
            selected_skills: Vec::new(),
            summary: String::new(),
            enhanced: false,
            owns_skills: false,
            opened_revision: 0,
        };

        if let Some(saved) = saved {
            session.restore(saved);
        }
        session
    }

    /// Remembers the progress revision seen at open, for conflict checks on save.
    pub fn with_opened_revision(mut self, revision: u64) -> Self {
        self.opened_revision = revision;
        self
    }

    /// Moves the conflict baseline forward after this session's own save.
    pub fn mark_saved(&mut self, revision: u64) {
        self.opened_revision = revision;
    }

    fn restore(&mut self, saved: SavedEnhancement) {
        self.summary = saved.summary;
        self.enhanced = saved.enhanced_resume.is_some();

        if saved.sections.is_empty() {
            // Older records only hold the rewritten résumé.
            if let Some(resume) = &saved.enhanced_resume {
                for section in FixedSection::ALL {
                    self.content
                        .insert(section.into(), section_text(resume, section));
                }
            }
            return;
        }

        if let Some(base) = saved.base_score {
            self.base_score = base.min(MAX_SCORE as u8);
        }

        for snapshot in saved.sections {
            if let SectionKey::Entry { .. } = snapshot.key {
                self.entries.push(snapshot.key);
            }
            if let Some(applied) = snapshot.credited {
                self.credits.insert(snapshot.key, applied);
            }
            if snapshot.state == SectionState::Editing {
                self.drafts.insert(snapshot.key, snapshot.content.clone());
            }
            self.states.insert(snapshot.key, snapshot.state);
            self.content.insert(snapshot.key, snapshot.content);
        }
        self.suggested_skills = saved.suggested_skills;
        self.selected_skills = saved.selected_skills;
        self.owns_skills = !self.selected_skills.is_empty()
            || self.states.get(&SectionKey::from(FixedSection::Skills)) == Some(&SectionState::Accepted);

        let recomputed = self.base_score as i32
            + self.credits.values().sum::<i32>()
            + self.selected_skills.iter().map(|s| s.applied).sum::<i32>();
        let recomputed = recomputed.clamp(0, MAX_SCORE) as u8;
        if recomputed != saved.fitment_score {
            warn!(
                "Saved enhancement for candidate {} recorded score {} but credits sum to {}",
                self.candidate_id, saved.fitment_score, recomputed
            );
        }
        self.score = recomputed;
    }

    pub fn candidate_id(&self) -> &str {
        &self.candidate_id
    }

    pub fn base_score(&self) -> u8 {
        self.base_score
    }

    /// The running fitment score shown in the dialog header.
    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhanced
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn opened_revision(&self) -> u64 {
        self.opened_revision
    }

    pub fn original(&self) -> &ResumeRecord {
        &self.original
    }

    /// Dynamic entries in the order they were added.
    pub fn entries(&self) -> &[SectionKey] {
        &self.entries
    }

    pub fn suggested_skills(&self) -> &[String] {
        &self.suggested_skills
    }

    pub fn selected_skills(&self) -> impl Iterator<Item = &str> {
        self.selected_skills.iter().map(|s| s.skill.as_str())
    }

    pub fn state(&self, key: &SectionKey) -> Result<SectionState, AppError> {
        self.ensure_known(key)?;
        Ok(self.states.get(key).copied().unwrap_or_default())
    }

    pub fn content(&self, key: &SectionKey) -> Result<&str, AppError> {
        self.ensure_known(key)?;
        Ok(self.content.get(key).map(String::as_str).unwrap_or_default())
    }

    pub fn draft(&self, key: &SectionKey) -> Option<&str> {
        self.drafts.get(key).map(String::as_str)
    }

    /// Input for an enhancement run over this session's résumé.
    pub fn enhancement_input(&self) -> EnhancementInput {
        EnhancementInput {
            candidate_id: self.candidate_id.clone(),
            base_score: self.base_score,
            resume: self.original.clone(),
        }
    }

    /// Loads the suggestions of a finished run. Sections the reviewer already
    /// accepted or is editing keep their content.
    pub fn apply_enhancement(&mut self, result: &EnhancementResult) {
        for section in FixedSection::ALL {
            let key = SectionKey::from(section);
            match self.states.get(&key).copied().unwrap_or_default() {
                SectionState::Accepted | SectionState::Editing => continue,
                SectionState::Original | SectionState::Rejected => {
                    self.content
                        .insert(key, section_text(&result.enhanced_resume, section));
                }
            }
        }
        for skill in &result.missing_skills {
            if !self.suggested_skills.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
                self.suggested_skills.push(skill.clone());
            }
        }
        self.summary = result.summary.clone();
        self.enhanced = true;
    }

    pub fn accept(&mut self, key: SectionKey) -> Result<u8, AppError> {
        match self.state(&key)? {
            SectionState::Accepted => return Ok(self.score),
            SectionState::Original | SectionState::Rejected => {}
            SectionState::Editing => return Err(self.invalid(key, SectionState::Editing, "accept")),
        }
        self.states.insert(key, SectionState::Accepted);
        self.credit(key);
        Ok(self.score)
    }

    pub fn reject(&mut self, key: SectionKey) -> Result<u8, AppError> {
        match self.state(&key)? {
            SectionState::Rejected => return Ok(self.score),
            SectionState::Original | SectionState::Accepted => {}
            SectionState::Editing => return Err(self.invalid(key, SectionState::Editing, "reject")),
        }
        self.states.insert(key, SectionState::Rejected);
        self.debit(&key);
        Ok(self.score)
    }

    /// Starts editing the section's current content. The score is unchanged.
    pub fn edit(&mut self, key: SectionKey) -> Result<u8, AppError> {
        let from = self.state(&key)?;
        if from == SectionState::Editing {
            return Err(self.invalid(key, from, "edit"));
        }
        let snapshot = self.content.get(&key).cloned().unwrap_or_default();
        self.drafts.insert(key, snapshot);
        self.states.insert(key, SectionState::Editing);
        Ok(self.score)
    }

    pub fn update_draft(&mut self, key: SectionKey, text: impl Into<String>) -> Result<(), AppError> {
        let from = self.state(&key)?;
        if from != SectionState::Editing {
            return Err(self.invalid(key, from, "update the draft of"));
        }
        self.drafts.insert(key, text.into());
        Ok(())
    }

    /// Commits the draft and accepts the section.
    pub fn save_edit(&mut self, key: SectionKey) -> Result<u8, AppError> {
        let from = self.state(&key)?;
        if from != SectionState::Editing {
            return Err(self.invalid(key, from, "save"));
        }
        let draft = self.drafts.remove(&key).unwrap_or_default();
        self.content.insert(key, draft);
        self.states.insert(key, SectionState::Accepted);
        self.credit(key);
        Ok(self.score)
    }

    /// Returns the section to `original`, dropping any draft and credit.
    pub fn undo(&mut self, key: SectionKey) -> Result<u8, AppError> {
        if self.state(&key)? == SectionState::Original {
            return Ok(self.score);
        }
        self.drafts.remove(&key);
        self.states.insert(key, SectionState::Original);
        self.debit(&key);
        Ok(self.score)
    }

    pub fn cancel_edit(&mut self, key: SectionKey) -> Result<u8, AppError> {
        let from = self.state(&key)?;
        if from != SectionState::Editing {
            return Err(self.invalid(key, from, "cancel editing"));
        }
        self.undo(key)
    }

    /// Adds an empty entry to a dynamic section and opens it for editing.
    pub fn add_entry(&mut self, section: EntrySection) -> SectionKey {
        let key = SectionKey::Entry {
            section,
            entry_id: Uuid::new_v4(),
        };
        self.entries.push(key);
        self.states.insert(key, SectionState::Editing);
        self.content.insert(key, String::new());
        self.drafts.insert(key, String::new());
        debug!("Added {key} to enhancement session {}", self.candidate_id);
        key
    }

    /// Selects or deselects a suggested skill (±1). Returns whether it is now selected.
    pub fn toggle_skill(&mut self, skill: &str) -> Result<bool, AppError> {
        let Some(suggested) = self
            .suggested_skills
            .iter()
            .find(|s| s.eq_ignore_ascii_case(skill))
            .cloned()
        else {
            return Err(AppError::NotFound(format!(
                "Skill '{skill}' is not a suggestion for candidate {}",
                self.candidate_id
            )));
        };

        if let Some(pos) = self
            .selected_skills
            .iter()
            .position(|s| s.skill == suggested)
        {
            self.owns_skills = true;
            let credit = self.selected_skills.remove(pos);
            self.shift(-credit.applied);
            Ok(false)
        } else {
            self.owns_skills = true;
            let applied = self.shift(1);
            self.selected_skills.push(SkillCredit {
                skill: suggested,
                applied,
            });
            Ok(true)
        }
    }

    /// Builds what a save persists. Only accepted sections and selected
    /// skills reach the enhanced résumé. Once the session owns the skill
    /// list, every save writes it back, so deselecting a saved skill removes
    /// it from the candidate too.
    pub fn finish(&self, now: DateTime<Utc>) -> EnhancementOutcome {
        let mut enhanced = self.original.clone();
        let mut skills_changed = self.owns_skills;

        for section in FixedSection::ALL {
            let key = SectionKey::from(section);
            if self.states.get(&key) == Some(&SectionState::Accepted) {
                let text = self.content.get(&key).map(String::as_str).unwrap_or_default();
                apply_section_text(&mut enhanced, section, text);
                skills_changed |= section == FixedSection::Skills;
            }
        }

        for key in &self.entries {
            if let SectionKey::Entry { section, .. } = key {
                if self.states.get(key) == Some(&SectionState::Accepted) {
                    let text = self.content.get(key).cloned().unwrap_or_default();
                    if !text.trim().is_empty() {
                        entry_list_mut(&mut enhanced, *section).push(text.trim().to_string());
                    }
                }
            }
        }

        for credit in &self.selected_skills {
            if !enhanced
                .skills
                .iter()
                .any(|s| s.eq_ignore_ascii_case(&credit.skill))
            {
                enhanced.skills.push(credit.skill.clone());
            }
        }

        let saved = SavedEnhancement {
            schema_version: SCHEMA_VERSION,
            fitment_score: self.score,
            base_score: Some(self.base_score),
            summary: self.summary.clone(),
            enhanced_resume: Some(enhanced.clone()),
            sections: self.snapshots(),
            suggested_skills: self.suggested_skills.clone(),
            selected_skills: self.selected_skills.clone(),
            timestamp: now.timestamp_millis(),
        };

        EnhancementOutcome {
            candidate_id: self.candidate_id.clone(),
            score: self.score,
            skills: skills_changed.then(|| enhanced.skills.clone()),
            enhanced_resume: enhanced,
            saved,
            opened_revision: self.opened_revision,
        }
    }

    fn snapshots(&self) -> Vec<SectionSnapshot> {
        let fixed = FixedSection::ALL.iter().map(|s| SectionKey::from(*s));
        fixed
            .chain(self.entries.iter().copied())
            .map(|key| {
                let state = self.states.get(&key).copied().unwrap_or_default();
                let content = if state == SectionState::Editing {
                    self.drafts.get(&key)
                } else {
                    self.content.get(&key)
                };
                SectionSnapshot {
                    key,
                    state,
                    content: content.cloned().unwrap_or_default(),
                    credited: self.credits.get(&key).copied(),
                }
            })
            .collect()
    }

    fn ensure_known(&self, key: &SectionKey) -> Result<(), AppError> {
        match key {
            SectionKey::Fixed { .. } => Ok(()),
            SectionKey::Entry { .. } if self.entries.contains(key) => Ok(()),
            SectionKey::Entry { .. } => Err(AppError::NotFound(format!(
                "Section {key} not found in enhancement session {}",
                self.candidate_id
            ))),
        }
    }

    fn invalid(&self, key: SectionKey, from: SectionState, action: &'static str) -> AppError {
        AppError::InvalidTransition {
            section: key.to_string(),
            from: from.to_string(),
            action,
        }
    }

    fn credit(&mut self, key: SectionKey) {
        if self.credits.contains_key(&key) {
            return;
        }
        let applied = self.shift(self.deltas.delta_for(&key));
        self.credits.insert(key, applied);
    }

    fn debit(&mut self, key: &SectionKey) {
        if let Some(applied) = self.credits.remove(key) {
            self.shift(-applied);
        }
    }

    /// Moves the score by `delta`, clamped; returns the change actually applied.
    fn shift(&mut self, delta: i32) -> i32 {
        let before = self.score as i32;
        let after = (before + delta).clamp(0, MAX_SCORE);
        self.score = after as u8;
        after - before
    }
}
