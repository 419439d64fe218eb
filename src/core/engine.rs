use crate::config::toml_config::EngineConfig;
use crate::core::alternatives::{find_alternatives, search_source};
use crate::core::conflict::{conflicts_for, Conflict};
use crate::core::filter::{free_candidates, CandidateCriteria};
use crate::core::scoring::{pre_order, score_candidates};
use crate::core::selector::{select, Selection};
use crate::domain::model::{Table, TableAvailability};
use crate::domain::ports::{AvailabilitySource, TableQuery};
use crate::domain::request::{AssignmentRequest, AssignmentRequestPayload};
use crate::domain::result::{
    Assignment, AssignmentResult, ReservationDetails, Suggestion, Unassigned,
};
use crate::domain::time::{format_clock, TimeWindow};
use crate::utils::error::{AssignError, Result};
use chrono::{NaiveDate, NaiveTime};

/// Filter, conflict check, scoring and selection over one snapshot.
/// `Err` carries the human-readable reason for an unassigned outcome.
fn decide(
    request: &AssignmentRequest,
    tables: &[TableAvailability],
    config: &EngineConfig,
) -> std::result::Result<Assignment, String> {
    let criteria = CandidateCriteria::from(request);
    let window = request.window();
    let policy = config.assignment.blocking_policy;

    let survivors = free_candidates(tables, &criteria, &window, policy);
    tracing::debug!(
        "🪑 {} of {} tables free for {}",
        survivors.len(),
        tables.len(),
        window
    );

    let scored = score_candidates(survivors, request, &config.scoring);
    match select(scored, request, config.assignment.max_alternatives) {
        Selection::Selected { best, alternatives } => Ok(Assignment {
            assigned: true,
            table: best.table,
            score: best.score,
            reasons: best.breakdown,
            alternatives,
            reservation_details: ReservationDetails {
                date: request.date,
                time: request.time,
                party_size: request.party_size,
                duration: request.duration_minutes,
                start_time: window.start(),
                end_time: window.end(),
            },
        }),
        Selection::Empty { reason } => Err(reason),
    }
}

/// Runs the whole decision against an already loaded snapshot. Suggestions
/// are probed against the same snapshot. Deterministic for a given input.
pub fn evaluate(
    request: &AssignmentRequest,
    tables: &[TableAvailability],
    config: &EngineConfig,
) -> AssignmentResult {
    match decide(request, tables, config) {
        Ok(assignment) => AssignmentResult::Assigned(assignment),
        Err(reason) => AssignmentResult::Unassigned(Unassigned {
            assigned: false,
            reason,
            suggestions: find_alternatives(
                tables,
                request,
                &config.suggestions,
                config.assignment.blocking_policy,
            ),
        }),
    }
}

pub struct AssignmentEngine<S: AvailabilitySource> {
    source: S,
    config: EngineConfig,
}

impl<S: AvailabilitySource> AssignmentEngine<S> {
    /// Trusts `config` as given; use `try_new` for configs from outside.
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self { source, config }
    }

    /// 建立引擎前先驗證設定（權重總和、建議數量等）
    pub fn try_new(source: S, config: EngineConfig) -> Result<Self> {
        config.validate_config()?;
        Ok(Self::new(source, config))
    }

    pub fn with_defaults(source: S) -> Self {
        Self::new(source, EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 驗證原始請求後執行自動配桌
    pub async fn assign(&self, payload: &AssignmentRequestPayload) -> Result<AssignmentResult> {
        let request =
            AssignmentRequest::from_payload(payload, self.config.assignment.default_duration_minutes)?;
        self.assign_request(&request).await
    }

    pub async fn assign_request(&self, request: &AssignmentRequest) -> Result<AssignmentResult> {
        tracing::info!(
            "🔎 Auto-assign: restaurant={} date={} time={} party={} duration={}m",
            request.restaurant_id,
            request.date,
            format_clock(request.time),
            request.party_size,
            request.duration_minutes
        );

        let tables = self.source.load_tables(&self.primary_query(request)).await?;

        match decide(request, &tables, &self.config) {
            Ok(assignment) => {
                tracing::info!(
                    "✅ Assigned table {} (score {:.1}, {} alternatives)",
                    assignment.table.id,
                    assignment.score,
                    assignment.alternatives.len()
                );
                Ok(AssignmentResult::Assigned(assignment))
            }
            Err(reason) => {
                tracing::info!("⚠️ {}", reason);
                let suggestions = self.suggest_alternatives(request).await;
                Ok(AssignmentResult::Unassigned(Unassigned {
                    assigned: false,
                    reason,
                    suggestions,
                }))
            }
        }
    }

    /// Best-effort: a failed search yields no suggestions instead of an error.
    pub async fn suggest_alternatives(&self, request: &AssignmentRequest) -> Vec<Suggestion> {
        match search_source(
            &self.source,
            request,
            &self.config.suggestions,
            self.config.assignment.blocking_policy,
        )
        .await
        {
            Ok(suggestions) => {
                tracing::debug!("💡 {} alternative slots found", suggestions.len());
                suggestions
            }
            Err(e) => {
                tracing::warn!("❌ Alternative slot search failed, returning none: {}", e);
                Vec::new()
            }
        }
    }

    /// Every free table for the request, tightest fit first. No scoring.
    pub async fn available_tables(&self, payload: &AssignmentRequestPayload) -> Result<Vec<Table>> {
        let request =
            AssignmentRequest::from_payload(payload, self.config.assignment.default_duration_minutes)?;
        let tables = self.source.load_tables(&self.primary_query(&request)).await?;

        let mut free = free_candidates(
            &tables,
            &CandidateCriteria::from(&request),
            &request.window(),
            self.config.assignment.blocking_policy,
        );
        pre_order(&mut free);
        tracing::info!("🪑 {} tables available", free.len());

        Ok(free.into_iter().map(|entry| entry.table.clone()).collect())
    }

    /// Conflicts on one table for a window, for explaining why it is blocked.
    pub async fn table_conflicts(
        &self,
        restaurant_id: &str,
        table_id: &str,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: Option<u32>,
    ) -> Result<Vec<Conflict>> {
        let duration = duration_minutes.unwrap_or(self.config.assignment.default_duration_minutes);
        if duration == 0 {
            return Err(AssignError::invalid_request(
                "duration",
                "0 is not a positive number of minutes",
            ));
        }
        let window = TimeWindow::starting_at(date.and_time(time), duration);

        let tables = self
            .source
            .load_tables(&TableQuery::for_date(restaurant_id, date).until(window.end()))
            .await?;
        let entry = tables
            .iter()
            .find(|entry| entry.table.id == table_id)
            .ok_or_else(|| {
                AssignError::invalid_request("tableId", format!("unknown table '{}'", table_id))
            })?;

        Ok(conflicts_for(entry, &window, self.config.assignment.blocking_policy))
    }

    fn primary_query(&self, request: &AssignmentRequest) -> TableQuery {
        TableQuery {
            restaurant_id: request.restaurant_id.clone(),
            date: request.date,
            area_id: request.area_id.clone(),
            accessible_only: request.is_accessible,
            min_capacity: Some(request.party_size),
            until: Some(request.window().end()),
        }
    }
}
