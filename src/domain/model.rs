use crate::domain::time::{clock_format, TimeWindow};
use crate::utils::error::{AssignError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    Rectangle,
    Circle,
    Square,
}

impl FromStr for TableShape {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" => Ok(TableShape::Rectangle),
            "circle" => Ok(TableShape::Circle),
            "square" => Ok(TableShape::Square),
            other => Err(AssignError::invalid_request(
                "preferences.shape",
                format!("unknown shape '{}', expected rectangle, circle or square", other),
            )),
        }
    }
}

fn default_min_capacity() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// 實體桌位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub area_id: String,
    pub number: u32,
    pub capacity: u32,
    #[serde(default = "default_min_capacity")]
    pub min_capacity: u32,
    pub shape: TableShape,
    #[serde(default)]
    pub is_accessible: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Table {
    /// `min_capacity <= capacity` must hold for every table.
    pub fn validate(&self) -> Result<()> {
        if self.min_capacity > self.capacity {
            return Err(AssignError::InvariantViolation {
                message: format!(
                    "table {} has min_capacity {} above capacity {}",
                    self.id, self.min_capacity, self.capacity
                ),
            });
        }
        Ok(())
    }

    pub fn seats(&self, party_size: u32) -> bool {
        self.capacity >= party_size && self.min_capacity <= party_size
    }
}

/// 用餐區域（大廳、露台、包廂等）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: String,
    pub name: String,
    pub restaurant_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default)]
    pub id: Option<String>,
    pub table_id: String,
    pub date: NaiveDate,
    #[serde(with = "clock_format")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_format")]
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::on_date(self.date, self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub table_id: String,
    pub scheduled_start: NaiveDateTime,
    pub scheduled_end: NaiveDateTime,
    pub status: MaintenanceStatus,
}

impl MaintenanceRecord {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.scheduled_start, self.scheduled_end)
    }
}

/// One table joined with its area and everything booked on it for the
/// requested date. This is the unit the availability source hands back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAvailability {
    pub table: Table,
    pub area: Area,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceRecord>,
}

/// Everything a restaurant owns, as loaded from a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSnapshot {
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceRecord>,
}

impl RestaurantSnapshot {
    pub fn validate(&self) -> Result<()> {
        for table in &self.tables {
            table.validate()?;
            if !self.areas.iter().any(|area| area.id == table.area_id) {
                return Err(AssignError::InvariantViolation {
                    message: format!("table {} references unknown area {}", table.id, table.area_id),
                });
            }
        }
        Ok(())
    }
}
