//! Read-only room and service-booking snapshots
//!
//! Rooms and extra-service bookings are owned by their own modules; the
//! reporter consumes point-in-time views of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{GuestId, Money, RoomId, ServiceBookingId};
use domain_billing::SettlementStatus;

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Deluxe,
    Suite,
}

/// Operational room state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Booked,
    Maintenance,
}

/// A point-in-time view of one room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    /// Door number, e.g. "204"
    pub number: String,
    pub room_type: RoomType,
    pub status: RoomStatus,
}

/// Extra-service booking state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

/// A point-in-time view of one extra-service booking (spa, laundry, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBookingSnapshot {
    pub id: ServiceBookingId,
    pub guest_id: GuestId,
    /// Service category, e.g. "Spa", "Laundry"
    pub category: String,
    pub amount: Money,
    pub status: ServiceStatus,
    pub payment_status: SettlementStatus,
    pub booked_at: DateTime<Utc>,
}
