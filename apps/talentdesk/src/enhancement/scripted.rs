//! Résumé enhancement backends: pluggable, trait-based, swapped at startup.
//!
//! Default: `ScriptedEnhancer`, a fixed rewrite driven by a required-skill list.
//! No model is consulted; the same input always yields the same output.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::ResumeRecord;

pub const DEFAULT_REQUIRED_SKILLS: [&str; 4] = ["Java", "React", "SQL", "Git"];

/// Projected score gained for every required skill the résumé lacked.
const SCORE_PER_MISSING_SKILL: u32 = 5;
/// Projections never promise more than this.
const PROJECTED_SCORE_CAP: u32 = 95;

const SUMMARY_SUFFIX: &str =
    " Demonstrated proficiency in full-stack development with strong problem-solving abilities.";
const EXPERIENCE_LINE: &str =
    "Completed additional coursework in missing technical areas to strengthen job readiness";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancementInput {
    pub candidate_id: String,
    pub base_score: u8,
    pub resume: ResumeRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementResult {
    pub enhanced_resume: ResumeRecord,
    /// Required skills the résumé did not mention; offered as suggested skills.
    pub missing_skills: Vec<String>,
    pub projected_score: u8,
    pub summary: String,
    pub backend: String,
}

/// Implement this to swap the enhancement backend without touching the
/// session or the dashboard commands. Carried in `AppState` as
/// `Arc<dyn ResumeEnhancer>`.
#[async_trait]
pub trait ResumeEnhancer: Send + Sync {
    async fn enhance(&self, input: &EnhancementInput) -> Result<EnhancementResult, AppError>;
}

pub struct ScriptedEnhancer {
    required_skills: Vec<String>,
}

impl ScriptedEnhancer {
    pub fn new(required_skills: Vec<String>) -> Self {
        Self { required_skills }
    }
}

impl Default for ScriptedEnhancer {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_SKILLS.iter().map(|s| s.to_string()).collect())
    }
}

#[async_trait]
impl ResumeEnhancer for ScriptedEnhancer {
    async fn enhance(&self, input: &EnhancementInput) -> Result<EnhancementResult, AppError> {
        Ok(compute_scripted_enhancement(input, &self.required_skills))
    }
}

fn compute_scripted_enhancement(
    input: &EnhancementInput,
    required_skills: &[String],
) -> EnhancementResult {
    let original = &input.resume;
    let missing_skills: Vec<String> = required_skills
        .iter()
        .filter(|skill| !original.has_skill(skill))
        .cloned()
        .collect();

    let mut enhanced = original.clone();
    enhanced.skills.extend(missing_skills.iter().cloned());
    enhanced.summary = format!("{}{}", original.summary, SUMMARY_SUFFIX);
    enhanced.experience.push(EXPERIENCE_LINE.to_string());
    if enhanced.github.trim().is_empty() {
        let handle: String = original
            .name
            .to_lowercase()
            .split_whitespace()
            .collect();
        enhanced.github = format!("github.com/{handle}");
    }
    if !missing_skills.is_empty() {
        enhanced.projects.push(format!(
            "Personal Learning Projects - Self-directed study in {}",
            missing_skills.join(", ")
        ));
    }

    let projected = (input.base_score as u32
        + missing_skills.len() as u32 * SCORE_PER_MISSING_SKILL)
        .min(PROJECTED_SCORE_CAP.max(input.base_score as u32));
    let projected_score = projected.min(100) as u8;

    let summary = format!(
        "Enhanced resume by adding {} missing skills ({}), improved professional summary, and strengthened project portfolio. Fitment score improved from {}% to {}%.",
        missing_skills.len(),
        missing_skills.join(", "),
        input.base_score,
        projected_score
    );

    EnhancementResult {
        enhanced_resume: enhanced,
        missing_skills,
        projected_score,
        summary,
        backend: "scripted".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SeedData;
    use chrono::Utc;

    fn input(candidate_id: &str, base_score: u8) -> EnhancementInput {
        let seed = SeedData::mock(Utc::now());
        EnhancementInput {
            candidate_id: candidate_id.to_string(),
            base_score,
            resume: seed.resumes[candidate_id].clone(),
        }
    }

    fn required() -> Vec<String> {
        DEFAULT_REQUIRED_SKILLS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_git_only() {
        let result = compute_scripted_enhancement(&input("1", 80), &required());
        assert_eq!(result.missing_skills, vec!["Git".to_string()]);
        assert_eq!(result.projected_score, 85);
        assert_eq!(result.enhanced_resume.skills, vec!["Java", "React", "SQL", "Git"]);
        assert_eq!(result.enhanced_resume.github, "github.com/janhavisharma");
        assert!(result.summary.contains("from 80% to 85%"));
    }

    #[test]
    fn test_skill_match_is_case_insensitive_substring() {
        // "MySQL" covers "SQL"
        let mut inp = input("6", 58);
        inp.resume.skills = vec!["mysql".to_string(), "JAVA".to_string()];
        let result = compute_scripted_enhancement(&inp, &required());
        assert_eq!(result.missing_skills, vec!["React".to_string(), "Git".to_string()]);
    }

    #[test]
    fn test_projection_capped_at_95() {
        let result = compute_scripted_enhancement(&input("4", 88), &required());
        // "JavaScript" counts as Java; React, SQL and Git are missing
        assert_eq!(result.missing_skills, vec!["React", "SQL", "Git"]);
        assert_eq!(result.projected_score, 95);
    }

    #[test]
    fn test_projection_never_lowers_a_high_base() {
        let result = compute_scripted_enhancement(&input("1", 98), &required());
        assert_eq!(result.projected_score, 98);
    }

    #[test]
    fn test_existing_github_kept_and_no_learning_line_without_gaps() {
        let mut inp = input("2", 85);
        inp.resume.skills = required();
        let result = compute_scripted_enhancement(&inp, &required());
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.enhanced_resume.github, "github.com/aarya");
        assert_eq!(result.enhanced_resume.projects, inp.resume.projects);
        assert_eq!(result.enhanced_resume.experience.len(), 3);
    }

    #[tokio::test]
    async fn test_scripted_backend_label() {
        let enhancer = ScriptedEnhancer::default();
        let result = enhancer.enhance(&input("3", 72)).await.unwrap();
        assert_eq!(result.backend, "scripted");
    }
}
