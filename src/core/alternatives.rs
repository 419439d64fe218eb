use crate::core::conflict::BlockingPolicy;
use crate::core::filter::{free_candidates, CandidateCriteria};
use crate::domain::model::TableAvailability;
use crate::domain::ports::{AvailabilitySource, TableQuery};
use crate::domain::request::AssignmentRequest;
use crate::domain::result::Suggestion;
use crate::domain::time::TimeWindow;
use crate::utils::error::Result;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OFFSETS_MINUTES: [i64; 4] = [-60, -30, 30, 60];
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSettings {
    pub offsets_minutes: Vec<i64>,
    pub max_suggestions: usize,
    /// 各時段查詢是否並行執行（結果仍依偏移順序排列）
    pub concurrent: bool,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            offsets_minutes: DEFAULT_OFFSETS_MINUTES.to_vec(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            concurrent: true,
        }
    }
}

/// Shifted copies of `original`, one per offset, in offset order.
///
/// A zero offset is the slot that already failed and is skipped. So is any
/// offset that moves the start onto another date.
pub fn probe_windows(original: &TimeWindow, offsets: &[i64]) -> Vec<TimeWindow> {
    let date = original.start().date();
    offsets
        .iter()
        .filter(|&&offset| offset != 0)
        .map(|&offset| original.shifted(offset))
        .filter(|window| window.start().date() == date)
        .collect()
}

/// Counts free tables for one shifted window. No scoring.
pub fn probe(
    tables: &[TableAvailability],
    criteria: &CandidateCriteria<'_>,
    window: &TimeWindow,
    policy: BlockingPolicy,
) -> Option<Suggestion> {
    let tables_count = free_candidates(tables, criteria, window, policy).len();
    (tables_count > 0).then(|| Suggestion {
        time: window.start().time(),
        available: true,
        tables_count,
    })
}

/// Suggestions computed against an already loaded snapshot.
pub fn find_alternatives(
    tables: &[TableAvailability],
    request: &AssignmentRequest,
    settings: &SuggestionSettings,
    policy: BlockingPolicy,
) -> Vec<Suggestion> {
    let criteria = CandidateCriteria::from(request);
    probe_windows(&request.window(), &settings.offsets_minutes)
        .iter()
        .filter_map(|window| probe(tables, &criteria, window, policy))
        .take(settings.max_suggestions)
        .collect()
}

fn query_for(request: &AssignmentRequest, window: &TimeWindow) -> TableQuery {
    TableQuery {
        restaurant_id: request.restaurant_id.clone(),
        date: window.start().date(),
        area_id: request.area_id.clone(),
        accessible_only: request.is_accessible,
        min_capacity: Some(request.party_size),
        until: Some(window.end()),
    }
}

/// Suggestions with one fresh read per shifted window.
///
/// Any read failure fails the whole search; callers decide how to degrade.
pub async fn search_source<S>(
    source: &S,
    request: &AssignmentRequest,
    settings: &SuggestionSettings,
    policy: BlockingPolicy,
) -> Result<Vec<Suggestion>>
where
    S: AvailabilitySource + ?Sized,
{
    let criteria = CandidateCriteria::from(request);
    let windows = probe_windows(&request.window(), &settings.offsets_minutes);
    let mut suggestions = Vec::new();

    if settings.concurrent {
        // join_all 依輸入順序回傳，不受完成順序影響
        let loads = join_all(
            windows
                .iter()
                .map(|window| async move { source.load_tables(&query_for(request, window)).await }),
        )
        .await;

        for (window, loaded) in windows.iter().zip(loads) {
            let tables = loaded?;
            if let Some(suggestion) = probe(&tables, &criteria, window, policy) {
                suggestions.push(suggestion);
            }
        }
        suggestions.truncate(settings.max_suggestions);
    } else {
        for window in &windows {
            if suggestions.len() >= settings.max_suggestions {
                break;
            }
            let tables = source.load_tables(&query_for(request, window)).await?;
            if let Some(suggestion) = probe(&tables, &criteria, window, policy) {
                suggestions.push(suggestion);
            }
        }
    }

    Ok(suggestions)
}
