use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ResumeRecord;

/// Score contribution of every dynamically added entry.
pub const ENTRY_DELTA: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedSection {
    Education,
    Summary,
    Experience,
    Projects,
    Skills,
    Achievements,
}

impl FixedSection {
    pub const ALL: [FixedSection; 6] = [
        FixedSection::Education,
        FixedSection::Summary,
        FixedSection::Experience,
        FixedSection::Projects,
        FixedSection::Skills,
        FixedSection::Achievements,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FixedSection::Education => "education",
            FixedSection::Summary => "summary",
            FixedSection::Experience => "experience",
            FixedSection::Projects => "projects",
            FixedSection::Skills => "skills",
            FixedSection::Achievements => "achievements",
        }
    }

    fn default_delta(self) -> i32 {
        match self {
            FixedSection::Education => 2,
            FixedSection::Summary => 3,
            FixedSection::Experience => 4,
            FixedSection::Projects => 3,
            FixedSection::Skills => 4,
            FixedSection::Achievements => 1,
        }
    }
}

/// Sections whose entries are added one at a time during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySection {
    Certifications,
    Research,
    Volunteering,
}

impl EntrySection {
    pub fn as_str(self) -> &'static str {
        match self {
            EntrySection::Certifications => "certifications",
            EntrySection::Research => "research",
            EntrySection::Volunteering => "volunteering",
        }
    }
}

/// Identifies one reviewable block of the résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionKey {
    Fixed { section: FixedSection },
    Entry { section: EntrySection, entry_id: Uuid },
}

impl SectionKey {
    pub fn fixed(section: FixedSection) -> Self {
        SectionKey::Fixed { section }
    }
}

impl From<FixedSection> for SectionKey {
    fn from(section: FixedSection) -> Self {
        SectionKey::Fixed { section }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKey::Fixed { section } => f.write_str(section.as_str()),
            SectionKey::Entry { section, entry_id } => {
                write!(f, "{}_{}", section.as_str(), entry_id)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionState {
    #[default]
    Original,
    Accepted,
    Rejected,
    Editing,
}

impl fmt::Display for SectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SectionState::Original => "original",
            SectionState::Accepted => "accepted",
            SectionState::Rejected => "rejected",
            SectionState::Editing => "editing",
        };
        f.write_str(label)
    }
}

/// Score contribution of accepting each section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaTable {
    fixed: HashMap<FixedSection, i32>,
    entry: i32,
}

impl Default for DeltaTable {
    fn default() -> Self {
        Self {
            fixed: FixedSection::ALL
                .iter()
                .map(|s| (*s, s.default_delta()))
                .collect(),
            entry: ENTRY_DELTA,
        }
    }
}

impl DeltaTable {
    pub fn with_delta(mut self, section: FixedSection, delta: i32) -> Self {
        self.fixed.insert(section, delta);
        self
    }

    pub fn delta_for(&self, key: &SectionKey) -> i32 {
        match key {
            SectionKey::Fixed { section } => self.fixed.get(section).copied().unwrap_or(0),
            SectionKey::Entry { .. } => self.entry,
        }
    }
}

/// Persisted view of one section, enough to re-enter the session later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSnapshot {
    pub key: SectionKey,
    pub state: SectionState,
    pub content: String,
    /// Score this section actually added while counted.
    #[serde(default)]
    pub credited: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCredit {
    pub skill: String,
    pub applied: i32,
}

/// Editable text of a fixed section; list sections are one item per line.
pub fn section_text(resume: &ResumeRecord, section: FixedSection) -> String {
    match section {
        FixedSection::Education => resume.education.clone(),
        FixedSection::Summary => resume.summary.clone(),
        FixedSection::Experience => resume.experience.join("\n"),
        FixedSection::Projects => resume.projects.join("\n"),
        FixedSection::Skills => resume.skills.join("\n"),
        FixedSection::Achievements => resume.achievements.join("\n"),
    }
}

pub fn apply_section_text(resume: &mut ResumeRecord, section: FixedSection, text: &str) {
    let lines = || -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    };
    match section {
        FixedSection::Education => resume.education = text.trim().to_string(),
        FixedSection::Summary => resume.summary = text.trim().to_string(),
        FixedSection::Experience => resume.experience = lines(),
        FixedSection::Projects => resume.projects = lines(),
        FixedSection::Skills => resume.skills = lines(),
        FixedSection::Achievements => resume.achievements = lines(),
    }
}

pub fn entry_list_mut(resume: &mut ResumeRecord, section: EntrySection) -> &mut Vec<String> {
    match section {
        EntrySection::Certifications => &mut resume.certifications,
        EntrySection::Research => &mut resume.research,
        EntrySection::Volunteering => &mut resume.volunteering,
    }
}
