//! Record Store: the owned in-memory collections of jobs, candidates and résumés.
//!
//! Seeded once through `SeedData` and mutated only through the methods below.
//! Every mutator validates first and writes last, so a failed call leaves the
//! store untouched.

pub mod seed;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{Candidate, Job, JobStatus, NewJob, Qualification, ResumeRecord, Stage};

pub use seed::SeedData;

/// Days between job creation and the default expected joining date.
const DEFAULT_JOINING_LEAD_DAYS: i64 = 30;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    jobs: Vec<Job>,
    candidates: Vec<Candidate>,
    resumes: HashMap<String, ResumeRecord>,
}

impl RecordStore {
    pub fn new(seed: SeedData) -> Self {
        info!(
            "Record store seeded with {} jobs, {} candidates",
            seed.jobs.len(),
            seed.candidates.len()
        );
        Self {
            jobs: seed.jobs,
            candidates: seed.candidates,
            resumes: seed.resumes,
        }
    }

    /// Jobs in display order (newest first, before any sort).
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn job(&self, job_id: &str) -> Result<&Job, AppError> {
        self.jobs
            .iter()
            .find(|j| j.id == job_id)
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
    }

    pub fn candidate(&self, candidate_id: &str) -> Result<&Candidate, AppError> {
        self.candidates
            .iter()
            .find(|c| c.id == candidate_id)
            .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))
    }

    /// The seeded résumé for a candidate.
    pub fn resume(&self, candidate_id: &str) -> Result<&ResumeRecord, AppError> {
        self.resumes
            .get(candidate_id)
            .ok_or_else(|| AppError::NotFound(format!("Resume for candidate {candidate_id} not found")))
    }

    /// Prepends a job. The caller supplies the id; a collision is rejected.
    pub fn add_job(&mut self, job: Job) -> Result<(), AppError> {
        if self.jobs.iter().any(|j| j.id == job.id) {
            return Err(AppError::DuplicateIdentity(format!(
                "Job {} already exists",
                job.id
            )));
        }
        info!("Adding job {} ({})", job.id, job.title);
        self.jobs.insert(0, job);
        Ok(())
    }

    /// Builds a job from the create-job form, assigns it a fresh
    /// timestamp-derived id and prepends it.
    pub fn create_job(&mut self, form: NewJob, now: DateTime<Utc>) -> Result<Job, AppError> {
        for (field, value) in [
            ("title", &form.title),
            ("location", &form.location),
            ("hiringManager", &form.hiring_manager),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} is required")));
            }
        }

        let id = self.fresh_job_id(now);
        let job = build_job(id, form, now);
        self.add_job(job.clone())?;
        Ok(job)
    }

    fn fresh_job_id(&self, now: DateTime<Utc>) -> String {
        let mut stamp = now.timestamp_millis();
        while self.jobs.iter().any(|j| j.id == stamp.to_string()) {
            stamp += 1;
        }
        stamp.to_string()
    }

    /// Replaces a candidate's fitment score, and their skills when given.
    /// The score is stored as-is; callers clamp beforehand.
    pub fn update_candidate_fitment(
        &mut self,
        candidate_id: &str,
        new_score: u8,
        new_skills: Option<Vec<String>>,
    ) -> Result<&Candidate, AppError> {
        let candidate = self.candidate_mut(candidate_id)?;
        candidate.fitment_score = new_score;
        if let Some(skills) = new_skills {
            candidate.skills = skills;
        }
        debug!("Candidate {candidate_id} fitment set to {new_score}");
        Ok(candidate)
    }

    pub fn update_candidate_skills(
        &mut self,
        candidate_id: &str,
        skills: Vec<String>,
    ) -> Result<&Candidate, AppError> {
        let candidate = self.candidate_mut(candidate_id)?;
        candidate.skills = skills;
        Ok(candidate)
    }

    /// Moves a candidate to any stage; there is no transition table.
    pub fn move_candidate(&mut self, candidate_id: &str, stage: Stage) -> Result<&Candidate, AppError> {
        let candidate = self.candidate_mut(candidate_id)?;
        debug!(
            "Candidate {candidate_id} moved {:?} -> {:?}",
            candidate.stage, stage
        );
        candidate.stage = stage;
        Ok(candidate)
    }

    fn candidate_mut(&mut self, candidate_id: &str) -> Result<&mut Candidate, AppError> {
        self.candidates
            .iter_mut()
            .find(|c| c.id == candidate_id)
            .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn build_job(id: String, form: NewJob, now: DateTime<Utc>) -> Job {
    let work_type = if form.hybrid_work {
        "Hybrid".to_string()
    } else {
        form.location.clone()
    };
    let salary = form.estimated_salary;

    Job {
        id,
        title: form.title,
        location: form.location,
        work_type,
        status: JobStatus::Active,
        candidate_count: 0,
        experience: form.experience.clone(),
        experience_required: form.experience,
        employment: form.employment_type.label().to_string(),
        budget: salary.clone(),
        budget_range: Some(salary),
        industry: form.industry,
        posted_date: "0 day ago".to_string(),
        posted_at: now,
        description: form.description,
        qualifications: split_list(&form.qualifications)
            .map(|text| Qualification {
                text,
                mandatory: true,
            })
            .collect(),
        skills: split_list(&form.skills).collect(),
        recruiter_notes: String::new(),
        total_candidates: 0,
        shortlisted: 0,
        in_screening: 0,
        offers_sent: 0,
        last_updated: "Just now".to_string(),
        priority: Some(form.priority),
        expected_joining: Some((now + Duration::days(DEFAULT_JOINING_LEAD_DAYS)).date_naive()),
        hiring_manager: Some(form.hiring_manager),
        project: Some(form.project.unwrap_or_else(|| "New Project".to_string())),
    }
}
