use serde::{Deserialize, Serialize};

use super::{legacy_schema_version, Versioned};
use crate::enhancement::section::{SectionSnapshot, SkillCredit};
use crate::models::ResumeRecord;

/// `fitment_progress_<candidateId>`: the latest saved score for kanban cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitmentProgress {
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    pub current_score: u8,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Bumped on every write; compared on save to detect concurrent writers.
    #[serde(default)]
    pub revision: u64,
}

/// `resume_enhancements_<candidateId>`: a saved enhancement session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEnhancement {
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    pub fitment_score: u8,
    /// Score before any section was accepted. Absent in records that predate it.
    #[serde(default)]
    pub base_score: Option<u8>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub enhanced_resume: Option<ResumeRecord>,
    #[serde(default)]
    pub sections: Vec<SectionSnapshot>,
    #[serde(default)]
    pub suggested_skills: Vec<String>,
    #[serde(default)]
    pub selected_skills: Vec<SkillCredit>,
    pub timestamp: i64,
}

/// `enhanced_resume_<candidateId>`: the résumé the viewer shows after a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedResumeRecord {
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    #[serde(flatten)]
    pub resume: ResumeRecord,
}

impl Versioned for FitmentProgress {
    fn schema_version(&self) -> u32 {
        self.schema_version
    }
}

impl Versioned for SavedEnhancement {
    fn schema_version(&self) -> u32 {
        self.schema_version
    }
}

impl Versioned for EnhancedResumeRecord {
    fn schema_version(&self) -> u32 {
        self.schema_version
    }
}
