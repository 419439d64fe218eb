mod common;

use anyhow::Result;
use async_trait::async_trait;
use common::{payload, SnapshotBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use table_assign::config::toml_config::EngineConfig;
use table_assign::core::conflict::BlockingPolicy;
use table_assign::domain::model::{MaintenanceStatus, ReservationStatus, TableAvailability};
use table_assign::domain::ports::{AvailabilitySource, TableQuery};
use table_assign::{AssignError, AssignmentEngine, InMemorySource};

/// 記錄每次查詢，用來確認替代時段的探測次數
struct RecordingSource {
    inner: InMemorySource,
    queries: Mutex<Vec<TableQuery>>,
}

#[async_trait]
impl AvailabilitySource for RecordingSource {
    async fn load_tables(&self, query: &TableQuery) -> table_assign::Result<Vec<TableAvailability>> {
        self.queries.lock().unwrap().push(query.clone());
        self.inner.load_tables(query).await
    }
}

/// The first read succeeds, every later one fails.
struct FlakySource {
    inner: InMemorySource,
    calls: AtomicUsize,
}

#[async_trait]
impl AvailabilitySource for FlakySource {
    async fn load_tables(&self, query: &TableQuery) -> table_assign::Result<Vec<TableAvailability>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.inner.load_tables(query).await
        } else {
            Err(AssignError::source("database went away"))
        }
    }
}

fn times(result: &table_assign::AssignmentResult) -> Vec<String> {
    result
        .unassigned()
        .expect("expected unassigned result")
        .suggestions
        .iter()
        .map(|s| s.time.format("%H:%M").to_string())
        .collect()
}

fn busy_evening() -> SnapshotBuilder {
    SnapshotBuilder::new()
        .area("main", "Main Hall")
        .table("t1", "main", 4)
        .reservation("t1", "21:00", "23:00", ReservationStatus::Confirmed)
}

#[tokio::test]
async fn test_all_four_offsets_are_probed() -> Result<()> {
    let source = Arc::new(RecordingSource {
        inner: InMemorySource::new(busy_evening().build())?,
        queries: Mutex::new(Vec::new()),
    });
    let engine = AssignmentEngine::with_defaults(Arc::clone(&source));

    let result = engine.assign(&payload("20:00", 2)).await?;
    assert_eq!(times(&result), vec!["19:00"]);

    // 1 次主查詢 + 4 個偏移量
    assert_eq!(source.queries.lock().unwrap().len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_probe_reads_are_counted() -> Result<()> {
    let source = RecordingSource {
        inner: InMemorySource::new(busy_evening().build())?,
        queries: Mutex::new(Vec::new()),
    };
    let request = table_assign::AssignmentRequest::from_payload(&payload("20:00", 2), 120)?;
    let suggestions = table_assign::core::alternatives::search_source(
        &source,
        &request,
        &Default::default(),
        BlockingPolicy::default(),
    )
    .await?;

    assert_eq!(suggestions.len(), 1);
    let queries = source.queries.lock().unwrap();
    assert_eq!(queries.len(), 4);
    assert!(queries.iter().all(|q| q.date == common::date()));
    assert!(queries.iter().all(|q| q.min_capacity == Some(2)));
    Ok(())
}

#[tokio::test]
async fn test_suggestion_failure_degrades_to_empty_list() -> Result<()> {
    let source = FlakySource {
        inner: InMemorySource::new(busy_evening().build())?,
        calls: AtomicUsize::new(0),
    };
    let engine = AssignmentEngine::with_defaults(source);

    let result = engine.assign(&payload("20:00", 2)).await?;
    let unassigned = result.unassigned().expect("expected unassigned result");
    assert!(!unassigned.assigned);
    assert!(unassigned.suggestions.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sequential_and_concurrent_search_agree() -> Result<()> {
    let snapshot = SnapshotBuilder::new()
        .area("main", "Main Hall")
        .table("t1", "main", 2)
        .table("t2", "main", 2)
        .reservation("t1", "19:00", "21:00", ReservationStatus::Confirmed)
        .reservation("t2", "19:30", "20:30", ReservationStatus::Seated)
        .build();

    let concurrent = AssignmentEngine::with_defaults(InMemorySource::new(snapshot.clone())?);

    let mut config = EngineConfig::default();
    config.suggestions.concurrent = false;
    let sequential = AssignmentEngine::new(InMemorySource::new(snapshot)?, config);

    let a = concurrent.assign(&payload("20:00", 2)).await?;
    let b = sequential.assign(&payload("20:00", 2)).await?;
    assert_eq!(a, b);
    assert_eq!(times(&a), vec!["20:30", "21:00"]);
    let counts: Vec<usize> = a
        .unassigned()
        .map(|u| u.suggestions.iter().map(|s| s.tables_count).collect())
        .unwrap_or_default();
    assert_eq!(counts, vec![1, 2]);
    Ok(())
}

#[tokio::test]
async fn test_at_most_three_suggestions_in_offset_order() -> Result<()> {
    // 20:00 被維修與訂位佔用，其他時段都空著
    let snapshot = SnapshotBuilder::new()
        .area("main", "Main Hall")
        .table("t1", "main", 4)
        .table("t2", "main", 4)
        .maintenance("t1", "20:00", "20:30", MaintenanceStatus::Scheduled)
        .reservation("t2", "20:00", "20:15", ReservationStatus::Confirmed);

    let engine = AssignmentEngine::with_defaults(InMemorySource::new(snapshot.build())?);
    let mut request = payload("20:00", 2);
    request.duration = Some(serde_json::json!(30));
    let result = engine.assign(&request).await?;

    assert_eq!(times(&result), vec!["19:00", "19:30", "20:30"]);
    let counts: Vec<usize> = result
        .unassigned()
        .map(|u| u.suggestions.iter().map(|s| s.tables_count).collect())
        .unwrap_or_default();
    assert_eq!(counts, vec![2, 2, 2]);
    Ok(())
}

#[tokio::test]
async fn test_in_progress_maintenance_blocks_every_slot() -> Result<()> {
    let snapshot = SnapshotBuilder::new()
        .area("main", "Main Hall")
        .table("t1", "main", 4)
        .maintenance("t1", "08:00", "09:00", MaintenanceStatus::InProgress);

    let engine = AssignmentEngine::with_defaults(InMemorySource::new(snapshot.build())?);
    let result = engine.assign(&payload("20:00", 2)).await?;

    assert!(!result.is_assigned());
    assert!(times(&result).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_pending_policy_is_configurable() -> Result<()> {
    let snapshot = SnapshotBuilder::new()
        .area("main", "Main Hall")
        .table("t1", "main", 4)
        .reservation("t1", "19:00", "21:00", ReservationStatus::Pending)
        .build();

    let default_engine = AssignmentEngine::with_defaults(InMemorySource::new(snapshot.clone())?);
    assert!(default_engine.assign(&payload("20:00", 2)).await?.is_assigned());

    let mut config = EngineConfig::default();
    config.assignment.blocking_policy = BlockingPolicy::IncludePending;
    let strict_engine = AssignmentEngine::new(InMemorySource::new(snapshot)?, config);
    let result = strict_engine.assign(&payload("20:00", 2)).await?;
    assert!(!result.is_assigned());
    assert_eq!(times(&result), vec!["21:00"]);
    Ok(())
}
