#![allow(dead_code)]

use chrono::NaiveDate;
use table_assign::domain::model::{
    Area, MaintenanceRecord, MaintenanceStatus, Reservation, ReservationStatus,
    RestaurantSnapshot, Table, TableShape,
};
use table_assign::domain::time::parse_clock;
use table_assign::AssignmentRequestPayload;

pub const RESTAURANT: &str = "bistro";
pub const DATE: &str = "2025-06-14";

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
}

/// 測試用餐廳資料建構器
#[derive(Default)]
pub struct SnapshotBuilder {
    snapshot: RestaurantSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(mut self, id: &str, name: &str) -> Self {
        self.snapshot.areas.push(Area {
            id: id.to_string(),
            name: name.to_string(),
            restaurant_id: RESTAURANT.to_string(),
        });
        self
    }

    pub fn table(self, id: &str, area_id: &str, capacity: u32) -> Self {
        self.table_with(id, area_id, capacity, |_| {})
    }

    pub fn table_with(
        mut self,
        id: &str,
        area_id: &str,
        capacity: u32,
        customize: impl FnOnce(&mut Table),
    ) -> Self {
        let mut table = Table {
            id: id.to_string(),
            area_id: area_id.to_string(),
            number: self.snapshot.tables.len() as u32 + 1,
            capacity,
            min_capacity: 1,
            shape: TableShape::Rectangle,
            is_accessible: false,
            is_active: true,
        };
        customize(&mut table);
        self.snapshot.tables.push(table);
        self
    }

    pub fn reservation(
        self,
        table_id: &str,
        start: &str,
        end: &str,
        status: ReservationStatus,
    ) -> Self {
        self.reservation_on(table_id, date(), start, end, status)
    }

    pub fn reservation_on(
        mut self,
        table_id: &str,
        on: NaiveDate,
        start: &str,
        end: &str,
        status: ReservationStatus,
    ) -> Self {
        self.snapshot.reservations.push(Reservation {
            id: Some(format!("res-{}", self.snapshot.reservations.len() + 1)),
            table_id: table_id.to_string(),
            date: on,
            start_time: parse_clock(start).unwrap(),
            end_time: parse_clock(end).unwrap(),
            status,
        });
        self
    }

    pub fn maintenance(
        mut self,
        table_id: &str,
        start: &str,
        end: &str,
        status: MaintenanceStatus,
    ) -> Self {
        self.snapshot.maintenance.push(MaintenanceRecord {
            id: Some(format!("mnt-{}", self.snapshot.maintenance.len() + 1)),
            table_id: table_id.to_string(),
            scheduled_start: date().and_time(parse_clock(start).unwrap()),
            scheduled_end: date().and_time(parse_clock(end).unwrap()),
            status,
        });
        self
    }

    pub fn build(self) -> RestaurantSnapshot {
        self.snapshot
    }
}

pub fn payload(time: &str, party_size: u32) -> AssignmentRequestPayload {
    AssignmentRequestPayload {
        restaurant_id: Some(RESTAURANT.to_string()),
        date: Some(DATE.to_string()),
        time: Some(time.to_string()),
        party_size: Some(serde_json::json!(party_size)),
        ..Default::default()
    }
}
