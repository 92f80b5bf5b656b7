//! Query Engine: pure filter/sort views over the store's collections.

pub mod filters;

use chrono::NaiveDate;

use crate::models::{Candidate, Job, Stage};

pub use filters::{FilterCategory, JobFilters, SortKey};

/// Applies search, the four filter categories and the sort, in that order.
/// Returns clones of the matching jobs; nothing is fabricated or reordered
/// beyond the stable sort.
pub fn filtered_sorted_jobs(
    jobs: &[Job],
    search_term: &str,
    filters: &JobFilters,
    sort_by: SortKey,
) -> Vec<Job> {
    let search = search_term.to_lowercase();
    let employment = lowered(&filters.employment_type);
    let locations = lowered(&filters.location);
    let managers = lowered(&filters.hiring_manager);
    let projects = lowered(&filters.project);

    let mut result: Vec<Job> = jobs
        .iter()
        .filter(|job| search.is_empty() || matches_search(job, &search))
        .filter(|job| employment.is_empty() || employment.contains(&job.employment.to_lowercase()))
        .filter(|job| {
            if locations.is_empty() {
                return true;
            }
            let location = job.location.to_lowercase();
            let work_type = job.work_type.to_lowercase();
            locations
                .iter()
                .any(|loc| location.contains(loc.as_str()) || work_type.contains(loc.as_str()))
        })
        .filter(|job| managers.is_empty() || is_member(&managers, job.hiring_manager.as_deref()))
        .filter(|job| projects.is_empty() || is_member(&projects, job.project.as_deref()))
        .cloned()
        .collect();

    // sort_by_key is stable, so equal keys keep collection order
    match sort_by {
        SortKey::Priority => result.sort_by_key(|job| std::cmp::Reverse(job.priority_rank())),
        SortKey::Aging => result.sort_by_key(|job| job.posted_at),
        SortKey::Joining => {
            result.sort_by_key(|job| job.expected_joining.unwrap_or(NaiveDate::MAX))
        }
        SortKey::Unsorted => {}
    }

    result
}

/// Candidates attached to a job, in collection order.
pub fn candidates_for_job(candidates: &[Candidate], job_id: &str) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| c.job_id == job_id)
        .cloned()
        .collect()
}

/// One kanban column.
pub fn candidates_by_stage(candidates: &[Candidate], stage: Stage) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| c.stage == stage)
        .cloned()
        .collect()
}

fn lowered(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

fn matches_search(job: &Job, needle: &str) -> bool {
    job.title.to_lowercase().contains(needle)
        || job.description.to_lowercase().contains(needle)
        || job.skills.iter().any(|s| s.to_lowercase().contains(needle))
}

fn is_member(set: &[String], value: Option<&str>) -> bool {
    value
        .map(|v| set.contains(&v.to_lowercase()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::store::SeedData;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    fn seeded_jobs() -> Vec<Job> {
        SeedData::mock(now()).jobs
    }

    fn ids(jobs: &[Job]) -> Vec<&str> {
        jobs.iter().map(|j| j.id.as_str()).collect()
    }

    fn job(id: &str, employment: &str, priority: Option<Priority>) -> Job {
        let mut job = seeded_jobs().remove(0);
        job.id = id.to_string();
        job.employment = employment.to_string();
        job.priority = priority;
        job
    }

    #[test]
    fn test_employment_filter_keeps_only_internship() {
        let jobs = vec![
            job("1", "Full-time", Some(Priority::High)),
            job("2", "Internship", Some(Priority::Low)),
        ];
        let filters = JobFilters {
            employment_type: vec!["Internship".to_string()],
            ..Default::default()
        };
        let result = filtered_sorted_jobs(&jobs, "", &filters, SortKey::Priority);
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_priority_sort_high_medium_low() {
        let jobs = vec![
            job("low", "Full-time", Some(Priority::Low)),
            job("high", "Full-time", Some(Priority::High)),
            job("medium", "Full-time", Some(Priority::Medium)),
        ];
        let result = filtered_sorted_jobs(&jobs, "", &JobFilters::default(), SortKey::Priority);
        assert_eq!(ids(&result), vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_missing_priority_ranks_as_medium_and_sort_is_stable() {
        let jobs = vec![
            job("a", "Full-time", Some(Priority::Low)),
            job("b", "Full-time", None),
            job("c", "Full-time", Some(Priority::Medium)),
        ];
        let result = filtered_sorted_jobs(&jobs, "", &JobFilters::default(), SortKey::Priority);
        assert_eq!(ids(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_search_matches_title_description_and_skills_case_insensitive() {
        let jobs = seeded_jobs();
        let by_skill = filtered_sorted_jobs(&jobs, "pytorch", &JobFilters::default(), SortKey::Unsorted);
        assert_eq!(ids(&by_skill), vec!["3"]);

        let by_title = filtered_sorted_jobs(&jobs, "TEST ENG", &JobFilters::default(), SortKey::Unsorted);
        assert_eq!(ids(&by_title), vec!["1"]);

        let by_description =
            filtered_sorted_jobs(&jobs, "full-stack", &JobFilters::default(), SortKey::Unsorted);
        assert_eq!(ids(&by_description), vec!["4"]);
    }

    #[test]
    fn test_location_filter_matches_work_type_substring() {
        let jobs = seeded_jobs();
        let filters = JobFilters {
            location: vec!["Mumbai".to_string()],
            ..Default::default()
        };
        assert_eq!(
            ids(&filtered_sorted_jobs(&jobs, "", &filters, SortKey::Unsorted)),
            vec!["4"]
        );

        // job 4 sits in Mumbai but its work type mentions Pune
        let filters = JobFilters {
            location: vec!["pune/hybrid".to_string()],
            ..Default::default()
        };
        assert_eq!(
            ids(&filtered_sorted_jobs(&jobs, "", &filters, SortKey::Unsorted)),
            vec!["2", "4"]
        );
    }

    #[test]
    fn test_categories_are_conjunctive() {
        let jobs = seeded_jobs();
        let filters = JobFilters {
            hiring_manager: vec!["John Doe".to_string(), "Mike Johnson".to_string()],
            project: vec!["AI Platform".to_string()],
            employment_type: vec!["full-time".to_string()],
            ..Default::default()
        };
        let result = filtered_sorted_jobs(&jobs, "", &filters, SortKey::Unsorted);
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn test_job_without_hiring_manager_fails_manager_filter() {
        let mut jobs = seeded_jobs();
        jobs[0].hiring_manager = None;
        let filters = JobFilters {
            hiring_manager: vec!["John Doe".to_string()],
            ..Default::default()
        };
        assert!(filtered_sorted_jobs(&jobs, "", &filters, SortKey::Unsorted).is_empty());
    }

    #[test]
    fn test_aging_sorts_oldest_first() {
        let mut jobs = seeded_jobs();
        jobs[0].posted_at = now();
        jobs[1].posted_at = now() - Duration::days(3);
        jobs[2].posted_at = now() - Duration::days(1);
        let result = filtered_sorted_jobs(&jobs[..3], "", &JobFilters::default(), SortKey::Aging);
        assert_eq!(ids(&result), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_joining_sorts_missing_date_last() {
        let mut jobs = seeded_jobs();
        jobs[1].expected_joining = None;
        let result = filtered_sorted_jobs(&jobs, "", &JobFilters::default(), SortKey::Joining);
        assert_eq!(ids(&result), vec!["1", "4", "3", "5", "2"]);
    }

    #[test]
    fn test_unsorted_keeps_collection_order() {
        let jobs = seeded_jobs();
        let result = filtered_sorted_jobs(&jobs, "", &JobFilters::default(), SortKey::parse("salary"));
        assert_eq!(ids(&result), ids(&jobs));
    }

    #[test]
    fn test_results_are_subset_and_idempotent() {
        let jobs = seeded_jobs();
        let filters = JobFilters {
            location: vec!["Pune".to_string()],
            ..Default::default()
        };
        let first = filtered_sorted_jobs(&jobs, "developer", &filters, SortKey::Joining);
        let second = filtered_sorted_jobs(&jobs, "developer", &filters, SortKey::Joining);
        assert_eq!(first, second);
        assert!(first.iter().all(|j| jobs.contains(j)));
    }

    #[test]
    fn test_candidates_for_job_preserves_order() {
        let candidates = SeedData::mock(now()).candidates;
        let for_job: Vec<String> = candidates_for_job(&candidates, "2")
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(for_job, vec!["1", "3", "4", "5", "6", "2"]);
        assert!(candidates_for_job(&candidates, "1").is_empty());
    }

    #[test]
    fn test_candidates_by_stage() {
        let candidates = SeedData::mock(now()).candidates;
        assert_eq!(candidates_by_stage(&candidates, Stage::Fitment).len(), 5);
        assert_eq!(candidates_by_stage(&candidates, Stage::Technical).len(), 1);
        assert!(candidates_by_stage(&candidates, Stage::BasicScreening).is_empty());
    }
}
