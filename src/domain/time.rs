use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// 營業時間以 "HH:MM" 表示，也接受 "HH:MM:SS"
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// serde helpers for `NaiveTime` fields written as "HH:MM".
pub mod clock_format {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time '{}', expected HH:MM", raw)))
    }
}

/// A half-open window `[start, end)` on the wall clock.
///
/// The end instant is not occupied, so a booking ending at 21:00 and another
/// starting at 21:00 do not collide. A window whose end does not come after
/// its start is empty and overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    start_inclusive: NaiveDateTime,
    end_exclusive: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start_inclusive: NaiveDateTime, end_exclusive: NaiveDateTime) -> Self {
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    pub fn starting_at(start: NaiveDateTime, duration_minutes: u32) -> Self {
        Self::new(start, start + Duration::minutes(i64::from(duration_minutes)))
    }

    /// Clock times on a given date. An end at or before the start rolls over
    /// to the next day (late sittings past midnight).
    pub fn on_date(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        let start_at = date.and_time(start);
        let mut end_at = date.and_time(end);
        if end < start {
            end_at += Duration::days(1);
        }
        Self::new(start_at, end_at)
    }

    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.start_inclusive
    }

    #[inline]
    pub fn end(&self) -> NaiveDateTime {
        self.end_exclusive
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end_exclusive <= self.start_inclusive
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_exclusive - self.start_inclusive).num_minutes()
    }

    /// `[a, b)` and `[c, d)` overlap iff `a < d && c < b`.
    #[inline]
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.start_inclusive < other.end_exclusive && other.start_inclusive < self.end_exclusive
    }

    pub fn shifted(&self, minutes: i64) -> Self {
        let delta = Duration::minutes(minutes);
        Self::new(self.start_inclusive + delta, self.end_exclusive + delta)
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start_inclusive.format("%Y-%m-%d %H:%M"),
            self.end_exclusive.format("%Y-%m-%d %H:%M")
        )
    }
}
