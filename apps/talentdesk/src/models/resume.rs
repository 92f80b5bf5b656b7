use serde::{Deserialize, Serialize};

/// A candidate résumé as shown in the viewer and rewritten by the enhancer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub linkedin: String,
    /// Empty when the candidate has no GitHub profile.
    pub github: String,
    pub education: String,
    pub summary: String,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub achievements: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub research: Vec<String>,
    #[serde(default)]
    pub volunteering: Vec<String>,
}

impl ResumeRecord {
    pub fn has_skill(&self, skill: &str) -> bool {
        let needle = skill.to_lowercase();
        self.skills
            .iter()
            .any(|s| s.to_lowercase().contains(&needle))
    }
}
