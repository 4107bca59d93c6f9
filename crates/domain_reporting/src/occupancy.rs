//! Occupancy report types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::Money;

use crate::snapshot::RoomType;

/// Per-room-type usage over the window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTypeUsage {
    /// Bookings checked in during the window
    pub bookings: usize,
    /// Room revenue of those bookings
    pub revenue: Money,
}

/// The occupancy section of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyReport {
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub available_rooms: usize,
    pub maintenance_rooms: usize,
    /// occupied / total as a percentage, zero when the property has no rooms
    pub occupancy_rate: Decimal,
    /// Check-ins falling inside the window
    pub check_ins: usize,
    /// Check-outs falling inside the window
    pub check_outs: usize,
    pub by_room_type: BTreeMap<RoomType, RoomTypeUsage>,
}
