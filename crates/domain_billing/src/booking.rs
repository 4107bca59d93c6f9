//! Read-only booking snapshots
//!
//! Bookings are owned by the front-office reservation module; this core
//! only ever reads them. The snapshot carries the fields invoicing and
//! reporting need, and nothing here writes back.

use serde::{Deserialize, Serialize};

use core_kernel::{BookingId, GuestId, Money, RoomId, StayPeriod};

use crate::invoice::SettlementStatus;

/// Reservation lifecycle state, as reported by the booking module
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

/// A point-in-time view of one booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSnapshot {
    /// Booking identifier
    pub booking_id: BookingId,
    /// Guest who made the booking
    pub guest_id: GuestId,
    /// Room the booking occupies
    pub room_id: RoomId,
    /// Check-in/check-out pair
    pub stay: StayPeriod,
    /// Total room charge for the whole stay
    pub total_amount: Money,
    /// Reservation state
    pub status: BookingStatus,
    /// Settlement progress as tracked by the booking module
    pub payment_status: SettlementStatus,
}

impl BookingSnapshot {
    /// Billable nights for this stay
    pub fn nights(&self) -> u32 {
        self.stay.nights()
    }
}

/// Lookup contract implemented by the external booking service
pub trait BookingSource {
    /// Returns the current snapshot for a booking, if it exists
    fn booking(&self, id: BookingId) -> Option<BookingSnapshot>;
}
