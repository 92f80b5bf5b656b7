use serde::{Deserialize, Serialize};

/// Pipeline bucket. The store places no constraint on moves between stages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fitment,
    BasicScreening,
    Technical,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Fitment, Stage::BasicScreening, Stage::Technical];

    pub fn title(self) -> &'static str {
        match self {
            Stage::Fitment => "Fitment",
            Stage::BasicScreening => "Basic Screening",
            Stage::Technical => "Technical",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Yellow,
    Green,
    Blue,
    Red,
    Gray,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    /// Not checked against the job collection; orphans are tolerated.
    pub job_id: String,
    pub stage: Stage,
    pub status: String,
    pub status_color: StatusColor,
    pub skills: Vec<String>,
    pub fitment_score: u8,
    pub fitment_summary: String,
    pub profile_image: String,
}
