use crate::domain::model::{Area, Table};
use crate::domain::time::clock_format;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Per-component sub-scores, each on a 0–100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub capacity_fit: f64,
    pub area_match: f64,
    pub shape_match: f64,
    pub location_match: f64,
    pub accessibility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub table: Table,
    pub area: Area,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
    pub date: NaiveDate,
    #[serde(with = "clock_format")]
    pub time: NaiveTime,
    pub party_size: u32,
    pub duration: u32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub assigned: bool,
    pub table: Table,
    pub score: f64,
    pub reasons: ScoreBreakdown,
    pub alternatives: Vec<Table>,
    pub reservation_details: ReservationDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(with = "clock_format")]
    pub time: NaiveTime,
    pub available: bool,
    pub tables_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unassigned {
    pub assigned: bool,
    pub reason: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssignmentResult {
    Assigned(Assignment),
    Unassigned(Unassigned),
}

impl AssignmentResult {
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignmentResult::Assigned(_))
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            AssignmentResult::Assigned(assignment) => Some(assignment),
            AssignmentResult::Unassigned(_) => None,
        }
    }

    pub fn unassigned(&self) -> Option<&Unassigned> {
        match self {
            AssignmentResult::Assigned(_) => None,
            AssignmentResult::Unassigned(unassigned) => Some(unassigned),
        }
    }
}
