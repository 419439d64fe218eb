use crate::domain::model::{MaintenanceStatus, RestaurantSnapshot, TableAvailability};
use crate::domain::ports::{AvailabilitySource, TableQuery};
use crate::domain::time::TimeWindow;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveTime};

/// Answers a `TableQuery` from a loaded snapshot.
///
/// Commitments are kept when they touch the requested date or the day after
/// it, so windows that run past midnight still see late bookings. A query
/// whose `until` lies further out widens that range to reach it.
pub fn query_snapshot(snapshot: &RestaurantSnapshot, query: &TableQuery) -> Vec<TableAvailability> {
    let day_start = query.date.and_time(NaiveTime::MIN);
    let default_end = day_start + Duration::days(2);
    let horizon_end = query.until.map_or(default_end, |until| until.max(default_end));
    let horizon = TimeWindow::new(day_start, horizon_end);

    let areas = snapshot.areas.iter().filter(|area| {
        area.restaurant_id == query.restaurant_id
            && query.area_id.as_deref().map_or(true, |id| area.id == id)
    });

    let mut result = Vec::new();
    for area in areas {
        let tables = snapshot.tables.iter().filter(|table| {
            table.area_id == area.id
                && table.is_active
                && (!query.accessible_only || table.is_accessible)
                && query.min_capacity.map_or(true, |min| table.capacity >= min)
        });

        for table in tables {
            let reservations = snapshot
                .reservations
                .iter()
                .filter(|r| r.table_id == table.id && r.window().overlaps(&horizon))
                .cloned()
                .collect();
            let maintenance = snapshot
                .maintenance
                .iter()
                .filter(|m| {
                    m.table_id == table.id
                        && (m.status == MaintenanceStatus::InProgress || m.window().overlaps(&horizon))
                })
                .cloned()
                .collect();

            result.push(TableAvailability {
                table: table.clone(),
                area: area.clone(),
                reservations,
                maintenance,
            });
        }
    }
    result
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshot: RestaurantSnapshot,
}

impl InMemorySource {
    pub fn new(snapshot: RestaurantSnapshot) -> Result<Self> {
        snapshot.validate()?;
        Ok(Self { snapshot })
    }
}

#[async_trait]
impl AvailabilitySource for InMemorySource {
    async fn load_tables(&self, query: &TableQuery) -> Result<Vec<TableAvailability>> {
        Ok(query_snapshot(&self.snapshot, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        Area, MaintenanceRecord, Reservation, ReservationStatus, Table, TableShape,
    };
    use crate::domain::time::parse_clock;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn table(id: &str, area: &str, capacity: u32) -> Table {
        Table {
            id: id.to_string(),
            area_id: area.to_string(),
            number: 1,
            capacity,
            min_capacity: 1,
            shape: TableShape::Rectangle,
            is_accessible: false,
            is_active: true,
        }
    }

    fn reservation(table_id: &str, on: NaiveDate, start: &str, end: &str) -> Reservation {
        Reservation {
            id: None,
            table_id: table_id.to_string(),
            date: on,
            start_time: parse_clock(start).unwrap(),
            end_time: parse_clock(end).unwrap(),
            status: ReservationStatus::Confirmed,
        }
    }

    fn snapshot() -> RestaurantSnapshot {
        RestaurantSnapshot {
            areas: vec![
                Area {
                    id: "main".to_string(),
                    name: "Main Hall".to_string(),
                    restaurant_id: "r1".to_string(),
                },
                Area {
                    id: "other".to_string(),
                    name: "Elsewhere".to_string(),
                    restaurant_id: "r2".to_string(),
                },
            ],
            tables: vec![table("t1", "main", 4), table("t2", "main", 2), table("x1", "other", 4)],
            reservations: vec![
                reservation("t1", date(), "19:00", "21:00"),
                reservation("t1", date().pred_opt().unwrap(), "23:00", "01:00"),
                reservation("t1", NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(), "19:00", "21:00"),
            ],
            maintenance: vec![MaintenanceRecord {
                id: None,
                table_id: "t2".to_string(),
                scheduled_start: NaiveDate::from_ymd_opt(2025, 6, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                scheduled_end: NaiveDate::from_ymd_opt(2025, 6, 1)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap(),
                status: MaintenanceStatus::InProgress,
            }],
        }
    }

    #[tokio::test]
    async fn test_joins_tables_with_relevant_commitments() {
        let source = InMemorySource::new(snapshot()).unwrap();
        let tables = source
            .load_tables(&TableQuery::for_date("r1", date()))
            .await
            .unwrap();

        assert_eq!(tables.len(), 2);
        let t1 = tables.iter().find(|t| t.table.id == "t1").unwrap();
        // 當日訂位與前一晚跨夜的訂位，不含一週後的
        assert_eq!(t1.reservations.len(), 2);

        let t2 = tables.iter().find(|t| t.table.id == "t2").unwrap();
        assert_eq!(t2.maintenance.len(), 1);
    }

    #[tokio::test]
    async fn test_query_hints_filter_tables() {
        let source = InMemorySource::new(snapshot()).unwrap();
        let mut query = TableQuery::for_date("r1", date());
        query.min_capacity = Some(3);

        let tables = source.load_tables(&query).await.unwrap();
        let ids: Vec<&str> = tables.iter().map(|t| t.table.id.as_str()).collect();
        assert_eq!(ids, vec!["t1"]);
    }

    #[tokio::test]
    async fn test_until_widens_commitment_range() {
        let source = InMemorySource::new(snapshot()).unwrap();
        let far = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap().and_time(NaiveTime::MIN);

        let tables = source
            .load_tables(&TableQuery::for_date("r1", date()).until(far))
            .await
            .unwrap();
        let t1 = tables.iter().find(|t| t.table.id == "t1").unwrap();
        // 一週後的訂位也落在查詢範圍內
        assert_eq!(t1.reservations.len(), 3);

        // 比預設範圍短的 until 不會縮小範圍
        let near = date().and_time(NaiveTime::MIN) + Duration::hours(3);
        let tables = source
            .load_tables(&TableQuery::for_date("r1", date()).until(near))
            .await
            .unwrap();
        let t1 = tables.iter().find(|t| t.table.id == "t1").unwrap();
        assert_eq!(t1.reservations.len(), 2);
    }

    #[test]
    fn test_rejects_invalid_snapshot() {
        let mut bad = snapshot();
        bad.tables.push(table("orphan", "missing-area", 4));
        assert!(InMemorySource::new(bad).is_err());
    }
}
