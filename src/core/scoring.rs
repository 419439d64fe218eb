//! Weighted fitness score for candidate tables.
//!
//! Every component contributes its full weight when it matches and nothing
//! otherwise, except capacity fit which scales with how little of the table
//! goes unused. With the default weights the total is out of 100.

use crate::domain::model::TableAvailability;
use crate::domain::request::AssignmentRequest;
use crate::domain::result::{ScoreBreakdown, ScoredCandidate};
use crate::utils::error::{AssignError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub capacity_fit: f64,
    pub area_match: f64,
    pub shape_match: f64,
    pub location_match: f64,
    pub accessibility_match: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            capacity_fit: 40.0,
            area_match: 30.0,
            shape_match: 10.0,
            location_match: 10.0,
            accessibility_match: 10.0,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.capacity_fit
            + self.area_match
            + self.shape_match
            + self.location_match
            + self.accessibility_match
    }
}

impl Validate for ScoringWeights {
    fn validate(&self) -> Result<()> {
        let named = [
            ("scoring.capacity_fit", self.capacity_fit),
            ("scoring.area_match", self.area_match),
            ("scoring.shape_match", self.shape_match),
            ("scoring.location_match", self.location_match),
            ("scoring.accessibility_match", self.accessibility_match),
        ];
        for (field, weight) in named {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AssignError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: weight.to_string(),
                    reason: "Weight must be a non-negative number".to_string(),
                });
            }
        }

        if (self.total() - 100.0).abs() > WEIGHT_TOLERANCE {
            return Err(AssignError::ConfigValidationError {
                field: "scoring".to_string(),
                message: format!("weights must add up to 100, got {}", self.total()),
            });
        }
        Ok(())
    }
}

/// `1 - (capacity - party_size) / capacity`, in `[0, 1]` for a table that seats the party.
pub fn capacity_fit(capacity: u32, party_size: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    let wasted = f64::from(capacity.saturating_sub(party_size));
    (1.0 - wasted / f64::from(capacity)).clamp(0.0, 1.0)
}

fn matched(hit: bool) -> f64 {
    if hit {
        1.0
    } else {
        0.0
    }
}

pub fn score_table(
    entry: &TableAvailability,
    request: &AssignmentRequest,
    weights: &ScoringWeights,
) -> ScoredCandidate {
    let table = &entry.table;
    let prefs = &request.preferences;

    let fit = capacity_fit(table.capacity, request.party_size);
    let area = matched(prefs.area_id.as_deref() == Some(table.area_id.as_str()));
    let shape = matched(prefs.shape == Some(table.shape));
    let location = matched(prefs.location.as_deref().is_some_and(|needle| {
        entry
            .area
            .name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }));
    let accessibility = matched(request.is_accessible && table.is_accessible);

    let score = weights.capacity_fit * fit
        + weights.area_match * area
        + weights.shape_match * shape
        + weights.location_match * location
        + weights.accessibility_match * accessibility;

    ScoredCandidate {
        table: table.clone(),
        area: entry.area.clone(),
        score,
        breakdown: ScoreBreakdown {
            capacity_fit: fit * 100.0,
            area_match: area * 100.0,
            shape_match: shape * 100.0,
            location_match: location * 100.0,
            accessibility: accessibility * 100.0,
        },
    }
}

/// 先依容量由小到大、再依區域名稱（不分大小寫）排序；同分時保留此順序
pub fn pre_order(candidates: &mut [&TableAvailability]) {
    candidates.sort_by(|a, b| {
        a.table
            .capacity
            .cmp(&b.table.capacity)
            .then_with(|| a.area.name.to_lowercase().cmp(&b.area.name.to_lowercase()))
            .then_with(|| a.area.name.cmp(&b.area.name))
    });
}

pub fn score_candidates(
    mut candidates: Vec<&TableAvailability>,
    request: &AssignmentRequest,
    weights: &ScoringWeights,
) -> Vec<ScoredCandidate> {
    pre_order(&mut candidates);
    candidates
        .into_iter()
        .map(|entry| score_table(entry, request, weights))
        .collect()
}
