use crate::domain::model::TableShape;
use crate::domain::time::{parse_clock, parse_date, TimeWindow};
use crate::utils::error::{AssignError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_required_field};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION_MINUTES: u32 = 120;

/// 請求原始格式（API 傳入，欄位皆可能缺漏）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequestPayload {
    pub restaurant_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub party_size: Option<serde_json::Value>,
    pub duration: Option<serde_json::Value>,
    pub area_id: Option<String>,
    pub is_accessible: Option<bool>,
    pub preferences: Option<PreferencesPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPayload {
    pub area_id: Option<String>,
    pub shape: Option<String>,
    pub location: Option<String>,
}

/// Soft preferences. They only influence scoring, never filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub area_id: Option<String>,
    pub shape: Option<TableShape>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRequest {
    pub restaurant_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u32,
    pub duration_minutes: u32,
    pub area_id: Option<String>,
    pub is_accessible: bool,
    pub preferences: Preferences,
}

impl AssignmentRequest {
    /// 驗證並轉換原始請求，任何欄位錯誤都在計算前回報
    pub fn from_payload(payload: &AssignmentRequestPayload, default_duration: u32) -> Result<Self> {
        let restaurant_id = validate_required_field("restaurantId", &payload.restaurant_id)?;
        validate_non_empty_string("restaurantId", restaurant_id)?;

        let raw_date = validate_required_field("date", &payload.date)?;
        let date = parse_date(raw_date).ok_or_else(|| {
            AssignError::invalid_request("date", format!("'{}' is not a YYYY-MM-DD date", raw_date))
        })?;

        let raw_time = validate_required_field("time", &payload.time)?;
        let time = parse_clock(raw_time).ok_or_else(|| {
            AssignError::invalid_request("time", format!("'{}' is not an HH:MM time", raw_time))
        })?;

        let party_size =
            parse_positive_int("partySize", validate_required_field("partySize", &payload.party_size)?)?;

        let duration_minutes = match &payload.duration {
            None | Some(serde_json::Value::Null) => default_duration,
            Some(minutes) => parse_positive_int("duration", minutes)?,
        };

        let preferences = match &payload.preferences {
            Some(raw) => Preferences {
                area_id: non_blank(raw.area_id.as_deref()),
                shape: non_blank(raw.shape.as_deref())
                    .map(|shape| shape.parse::<TableShape>())
                    .transpose()?,
                location: non_blank(raw.location.as_deref()),
            },
            None => Preferences::default(),
        };

        Ok(Self {
            restaurant_id: restaurant_id.trim().to_string(),
            date,
            time,
            party_size,
            duration_minutes,
            area_id: non_blank(payload.area_id.as_deref()),
            is_accessible: payload.is_accessible.unwrap_or(false),
            preferences,
        })
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::starting_at(self.date.and_time(self.time), self.duration_minutes)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// partySize 與 duration 可為整數或數字字串，但必須是正整數
fn parse_positive_int(field: &str, value: &serde_json::Value) -> Result<u32> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match parsed {
        Some(size) if size > 0 && size <= u64::from(u32::MAX) => Ok(size as u32),
        _ => Err(AssignError::invalid_request(
            field,
            format!("{} is not a positive integer", value),
        )),
    }
}
