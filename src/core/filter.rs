use crate::core::conflict::{is_blocked, BlockingPolicy};
use crate::domain::model::TableAvailability;
use crate::domain::request::AssignmentRequest;
use crate::domain::time::TimeWindow;

/// Hard constraints a table must meet before it is considered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateCriteria<'a> {
    pub restaurant_id: &'a str,
    pub party_size: u32,
    pub area_id: Option<&'a str>,
    pub accessible_only: bool,
}

impl<'a> From<&'a AssignmentRequest> for CandidateCriteria<'a> {
    fn from(request: &'a AssignmentRequest) -> Self {
        Self {
            restaurant_id: &request.restaurant_id,
            party_size: request.party_size,
            area_id: request.area_id.as_deref(),
            accessible_only: request.is_accessible,
        }
    }
}

impl CandidateCriteria<'_> {
    pub fn admits(&self, entry: &TableAvailability) -> bool {
        let table = &entry.table;
        table.is_active
            && entry.area.restaurant_id == self.restaurant_id
            && table.area_id == entry.area.id
            && table.seats(self.party_size)
            && self.area_id.map_or(true, |area| table.area_id == area)
            && (!self.accessible_only || table.is_accessible)
    }
}

pub fn filter_candidates<'t>(
    tables: &'t [TableAvailability],
    criteria: &CandidateCriteria<'_>,
) -> Vec<&'t TableAvailability> {
    tables.iter().filter(|entry| criteria.admits(entry)).collect()
}

/// 通過硬性條件且在時段內沒有衝突的桌位
pub fn free_candidates<'t>(
    tables: &'t [TableAvailability],
    criteria: &CandidateCriteria<'_>,
    window: &TimeWindow,
    policy: BlockingPolicy,
) -> Vec<&'t TableAvailability> {
    tables
        .iter()
        .filter(|entry| criteria.admits(entry) && !is_blocked(entry, window, policy))
        .collect()
}
