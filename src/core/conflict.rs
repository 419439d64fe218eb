use crate::domain::model::{
    MaintenanceRecord, MaintenanceStatus, Reservation, ReservationStatus, TableAvailability,
};
use crate::domain::time::TimeWindow;
use serde::{Deserialize, Serialize};

/// Which reservation statuses hold a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockingPolicy {
    /// Only `confirmed` and `seated` reservations block.
    #[default]
    ConfirmedAndSeated,
    /// `pending` reservations block as well.
    IncludePending,
}

impl BlockingPolicy {
    pub fn blocks(&self, status: ReservationStatus) -> bool {
        match status {
            ReservationStatus::Confirmed | ReservationStatus::Seated => true,
            ReservationStatus::Pending => matches!(self, BlockingPolicy::IncludePending),
            ReservationStatus::Completed
            | ReservationStatus::Cancelled
            | ReservationStatus::NoShow => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    Reservation {
        reservation_id: Option<String>,
        status: ReservationStatus,
        window: TimeWindow,
    },
    Maintenance {
        maintenance_id: Option<String>,
        status: MaintenanceStatus,
        window: TimeWindow,
    },
}

pub fn reservation_blocks(
    reservation: &Reservation,
    window: &TimeWindow,
    policy: BlockingPolicy,
) -> bool {
    policy.blocks(reservation.status) && reservation.window().overlaps(window)
}

/// 維修中一律封鎖；已排程的維修只有時段重疊才封鎖
pub fn maintenance_blocks(record: &MaintenanceRecord, window: &TimeWindow) -> bool {
    match record.status {
        MaintenanceStatus::InProgress => true,
        MaintenanceStatus::Scheduled => record.window().overlaps(window),
        MaintenanceStatus::Completed | MaintenanceStatus::Cancelled => false,
    }
}

fn own_reservations<'a>(entry: &'a TableAvailability) -> impl Iterator<Item = &'a Reservation> {
    entry
        .reservations
        .iter()
        .filter(move |r| r.table_id == entry.table.id)
}

fn own_maintenance<'a>(
    entry: &'a TableAvailability,
) -> impl Iterator<Item = &'a MaintenanceRecord> {
    entry
        .maintenance
        .iter()
        .filter(move |m| m.table_id == entry.table.id)
}

/// Existence check: stops at the first commitment that blocks `window`.
pub fn is_blocked(entry: &TableAvailability, window: &TimeWindow, policy: BlockingPolicy) -> bool {
    own_maintenance(entry).any(|m| maintenance_blocks(m, window))
        || own_reservations(entry).any(|r| reservation_blocks(r, window, policy))
}

/// Every commitment that blocks `window`, reservations first.
pub fn conflicts_for(
    entry: &TableAvailability,
    window: &TimeWindow,
    policy: BlockingPolicy,
) -> Vec<Conflict> {
    let reservations = own_reservations(entry)
        .filter(|r| reservation_blocks(r, window, policy))
        .map(|r| Conflict::Reservation {
            reservation_id: r.id.clone(),
            status: r.status,
            window: r.window(),
        });

    let maintenance = own_maintenance(entry)
        .filter(|m| maintenance_blocks(m, window))
        .map(|m| Conflict::Maintenance {
            maintenance_id: m.id.clone(),
            status: m.status,
            window: m.window(),
        });

    reservations.chain(maintenance).collect()
}
