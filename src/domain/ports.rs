use crate::domain::model::TableAvailability;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

/// 查詢條件：某餐廳某日期的可用桌位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub restaurant_id: String,
    pub date: NaiveDate,
    pub area_id: Option<String>,
    pub accessible_only: bool,
    pub min_capacity: Option<u32>,
    /// 查詢時段的結束時間；超過兩天的時段需要載入更遠的訂位
    pub until: Option<NaiveDateTime>,
}

impl TableQuery {
    pub fn for_date(restaurant_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            date,
            area_id: None,
            accessible_only: false,
            min_capacity: None,
            until: None,
        }
    }

    /// Extends the query so commitments up to `end` are loaded.
    pub fn until(mut self, end: NaiveDateTime) -> Self {
        self.until = Some(end);
        self
    }
}

/// Read-only access to the persistence store.
///
/// Implementations return active tables of the restaurant joined with the
/// reservations and maintenance records relevant to `query.date`, and to
/// every instant up to `query.until` when it reaches further. The engine
/// never writes through this port.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    async fn load_tables(&self, query: &TableQuery) -> Result<Vec<TableAvailability>>;
}

#[async_trait]
impl<T: AvailabilitySource + ?Sized> AvailabilitySource for std::sync::Arc<T> {
    async fn load_tables(&self, query: &TableQuery) -> Result<Vec<TableAvailability>> {
        (**self).load_tables(query).await
    }
}
