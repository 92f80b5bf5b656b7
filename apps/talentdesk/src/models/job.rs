use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Paused,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Qualification {
    pub text: String,
    pub mandatory: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub location: String,
    pub work_type: String,
    pub status: JobStatus,
    pub candidate_count: u32,
    pub experience: String,
    pub experience_required: String,
    pub employment: String,
    pub budget: String,
    pub budget_range: Option<String>,
    pub industry: String,
    /// Display label only ("0 day ago"); sorting uses `posted_at`.
    pub posted_date: String,
    pub posted_at: DateTime<Utc>,
    pub description: String,
    pub qualifications: Vec<Qualification>,
    pub skills: Vec<String>,
    pub recruiter_notes: String,
    pub total_candidates: u32,
    pub shortlisted: u32,
    pub in_screening: u32,
    pub offers_sent: u32,
    pub last_updated: String,
    pub priority: Option<Priority>,
    pub expected_joining: Option<NaiveDate>,
    pub hiring_manager: Option<String>,
    pub project: Option<String>,
}

impl Job {
    /// Priority rank used for sorting; a job without priority ranks as medium.
    pub fn priority_rank(&self) -> u8 {
        self.priority.unwrap_or(Priority::Medium).rank()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    Internship,
}

impl EmploymentType {
    pub fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::Internship => "Internship",
        }
    }
}

/// Fields of the "create job" form. Qualifications and skills arrive as
/// comma-separated text, exactly as typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub location: String,
    pub hiring_manager: String,
    #[serde(default)]
    pub department: String,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub estimated_salary: String,
    #[serde(default = "default_industry")]
    pub industry: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub qualifications: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub hybrid_work: bool,
    #[serde(default)]
    pub project: Option<String>,
}

fn default_priority() -> Priority {
    Priority::Medium
}

fn default_industry() -> String {
    "Technology".to_string()
}
