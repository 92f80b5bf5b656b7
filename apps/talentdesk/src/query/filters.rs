use serde::{Deserialize, Serialize};

/// Sort order selected in the job list. Unrecognised keys leave the order alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Priority,
    Aging,
    Joining,
    #[serde(other)]
    Unsorted,
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "priority" => SortKey::Priority,
            "aging" => SortKey::Aging,
            "joining" => SortKey::Joining,
            _ => SortKey::Unsorted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterCategory {
    EmploymentType,
    Location,
    HiringManager,
    Project,
}

/// Checkbox filters of the search panel. Values within a category are OR-ed,
/// categories are AND-ed, and an empty category matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFilters {
    pub employment_type: Vec<String>,
    pub location: Vec<String>,
    pub hiring_manager: Vec<String>,
    pub project: Vec<String>,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 4] = [
        FilterCategory::EmploymentType,
        FilterCategory::Location,
        FilterCategory::HiringManager,
        FilterCategory::Project,
    ];
}

impl JobFilters {
    pub fn values(&self, category: FilterCategory) -> &[String] {
        match category {
            FilterCategory::EmploymentType => &self.employment_type,
            FilterCategory::Location => &self.location,
            FilterCategory::HiringManager => &self.hiring_manager,
            FilterCategory::Project => &self.project,
        }
    }

    fn values_mut(&mut self, category: FilterCategory) -> &mut Vec<String> {
        match category {
            FilterCategory::EmploymentType => &mut self.employment_type,
            FilterCategory::Location => &mut self.location,
            FilterCategory::HiringManager => &mut self.hiring_manager,
            FilterCategory::Project => &mut self.project,
        }
    }

    /// Checks or unchecks one value of a category.
    pub fn toggle(&mut self, category: FilterCategory, value: &str, checked: bool) {
        let values = self.values_mut(category);
        if checked {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        } else {
            values.retain(|v| v != value);
        }
    }

    pub fn is_empty(&self) -> bool {
        FilterCategory::ALL
            .iter()
            .all(|category| self.values(*category).is_empty())
    }

    /// True when the panel should offer "clear all".
    pub fn has_active_filters(&self, search_term: &str) -> bool {
        !search_term.is_empty() || !self.is_empty()
    }
}
