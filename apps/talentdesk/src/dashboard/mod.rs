//! Dashboard: per-view state and the inbound commands of the View Layer.

pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::query::{FilterCategory, JobFilters, SortKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobTab {
    #[default]
    Information,
    Candidates,
    Persona,
}

/// What one dashboard view is looking at. Not shared between views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSession {
    pub selected_job_id: Option<String>,
    pub selected_tab: JobTab,
    pub search_term: String,
    pub sort_by: SortKey,
    pub filters: JobFilters,
}

impl DashboardSession {
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort(&mut self, raw: &str) {
        self.sort_by = SortKey::parse(raw);
    }

    pub fn set_filters(&mut self, filters: JobFilters) {
        self.filters = filters;
    }

    pub fn toggle_filter(&mut self, category: FilterCategory, value: &str, checked: bool) {
        self.filters.toggle(category, value, checked);
    }

    /// Resets search, sort and filters. The selected job is kept.
    pub fn clear_all_filters(&mut self) {
        self.search_term.clear();
        self.sort_by = SortKey::Priority;
        self.filters = JobFilters::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active_filters(&self.search_term)
    }

    /// Back to the job list.
    pub fn clear_selection(&mut self) {
        self.selected_job_id = None;
    }
}
