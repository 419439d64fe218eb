use crate::domain::model::Table;
use crate::domain::request::AssignmentRequest;
use crate::domain::result::ScoredCandidate;
use crate::domain::time::format_clock;

pub const DEFAULT_MAX_ALTERNATIVES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Selected {
        best: ScoredCandidate,
        alternatives: Vec<Table>,
    },
    Empty {
        reason: String,
    },
}

/// Picks the highest score. `scored` must already be in pre-order; the sort
/// is stable so equal scores keep that order.
pub fn select(
    mut scored: Vec<ScoredCandidate>,
    request: &AssignmentRequest,
    max_alternatives: usize,
) -> Selection {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut ranked = scored.into_iter();
    let Some(best) = ranked.next() else {
        return Selection::Empty {
            reason: no_table_reason(request),
        };
    };
    let alternatives = ranked
        .take(max_alternatives)
        .map(|candidate| candidate.table)
        .collect();

    Selection::Selected { best, alternatives }
}

fn no_table_reason(request: &AssignmentRequest) -> String {
    format!(
        "No available table for a party of {} on {} at {} ({} minutes)",
        request.party_size,
        request.date,
        format_clock(request.time),
        request.duration_minutes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Area, TableShape};
    use crate::domain::request::Preferences;
    use crate::domain::result::ScoreBreakdown;
    use chrono::{NaiveDate, NaiveTime};

    fn candidate(id: &str, score: f64) -> ScoredCandidate {
        ScoredCandidate {
            table: Table {
                id: id.to_string(),
                area_id: "main".to_string(),
                number: 1,
                capacity: 4,
                min_capacity: 1,
                shape: TableShape::Square,
                is_accessible: false,
                is_active: true,
            },
            area: Area {
                id: "main".to_string(),
                name: "Main".to_string(),
                restaurant_id: "r1".to_string(),
            },
            score,
            breakdown: ScoreBreakdown::default(),
        }
    }

    fn request() -> AssignmentRequest {
        AssignmentRequest {
            restaurant_id: "r1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            party_size: 2,
            duration_minutes: 120,
            area_id: None,
            is_accessible: false,
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn test_empty_list_is_unassigned_with_reason() {
        match select(vec![], &request(), DEFAULT_MAX_ALTERNATIVES) {
            Selection::Empty { reason } => {
                assert!(reason.contains("party of 2"));
                assert!(reason.contains("20:00"));
            }
            other => panic!("expected empty selection, got {:?}", other),
        }
    }

    #[test]
    fn test_highest_score_wins_and_ties_keep_order() {
        let scored = vec![
            candidate("a", 20.0),
            candidate("b", 35.0),
            candidate("c", 35.0),
            candidate("d", 10.0),
            candidate("e", 30.0),
        ];

        match select(scored, &request(), DEFAULT_MAX_ALTERNATIVES) {
            Selection::Selected { best, alternatives } => {
                assert_eq!(best.table.id, "b");
                let ids: Vec<&str> = alternatives.iter().map(|t| t.id.as_str()).collect();
                assert_eq!(ids, vec!["c", "e", "a"]);
            }
            other => panic!("expected selection, got {:?}", other),
        }
    }

    #[test]
    fn test_alternatives_capped() {
        let scored = (0..3).map(|i| candidate(&i.to_string(), 10.0)).collect();
        match select(scored, &request(), 1) {
            Selection::Selected { alternatives, .. } => assert_eq!(alternatives.len(), 1),
            other => panic!("expected selection, got {:?}", other),
        }
    }
}
