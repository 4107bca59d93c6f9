//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::{DateTime, Duration, Utc};
use rust_decimal_macros::dec;
use std::collections::HashMap;

use core_kernel::{
    BookingId, Currency, GuestId, Money, RoomId, ServiceBookingId, StayPeriod,
};
use domain_billing::{BookingSnapshot, BookingSource, BookingStatus, SettlementStatus};
use domain_reporting::{RoomSnapshot, RoomStatus, RoomType, ServiceBookingSnapshot, ServiceStatus};

use crate::fixtures::TemporalFixtures;

/// Builder for booking snapshots
pub struct TestBookingBuilder {
    booking_id: BookingId,
    guest_id: GuestId,
    room_id: RoomId,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    total_amount: Money,
    status: BookingStatus,
    payment_status: SettlementStatus,
}

impl Default for TestBookingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBookingBuilder {
    /// Creates a builder for a confirmed three-night stay
    pub fn new() -> Self {
        Self {
            booking_id: BookingId::new(),
            guest_id: GuestId::new(),
            room_id: RoomId::new(),
            check_in: TemporalFixtures::check_in(),
            check_out: TemporalFixtures::check_out(),
            total_amount: Money::new(dec!(3000), Currency::INR),
            status: BookingStatus::Confirmed,
            payment_status: SettlementStatus::Pending,
        }
    }

    pub fn with_booking_id(mut self, id: BookingId) -> Self {
        self.booking_id = id;
        self
    }

    pub fn with_guest_id(mut self, id: GuestId) -> Self {
        self.guest_id = id;
        self
    }

    pub fn with_room_id(mut self, id: RoomId) -> Self {
        self.room_id = id;
        self
    }

    pub fn with_check_in(mut self, check_in: DateTime<Utc>) -> Self {
        let stay = self.check_out - self.check_in;
        self.check_in = check_in;
        self.check_out = check_in + stay;
        self
    }

    pub fn with_check_out(mut self, check_out: DateTime<Utc>) -> Self {
        self.check_out = check_out;
        self
    }

    /// Sets the stay length, keeping the check-in
    pub fn with_nights(mut self, nights: i64) -> Self {
        self.check_out = self.check_in + Duration::days(nights);
        self
    }

    pub fn with_total_amount(mut self, total: Money) -> Self {
        self.total_amount = total;
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_payment_status(mut self, payment_status: SettlementStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    /// Builds the booking snapshot
    pub fn build(self) -> BookingSnapshot {
        BookingSnapshot {
            booking_id: self.booking_id,
            guest_id: self.guest_id,
            room_id: self.room_id,
            stay: StayPeriod::new(self.check_in, self.check_out)
                .expect("TestBookingBuilder produced an inverted stay"),
            total_amount: self.total_amount,
            status: self.status,
            payment_status: self.payment_status,
        }
    }
}

/// Builder for room snapshots
pub struct TestRoomBuilder {
    room_id: RoomId,
    number: String,
    room_type: RoomType,
    status: RoomStatus,
}

impl Default for TestRoomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoomBuilder {
    /// Creates a builder for an available double room
    pub fn new() -> Self {
        Self {
            room_id: RoomId::new(),
            number: "101".to_string(),
            room_type: RoomType::Double,
            status: RoomStatus::Available,
        }
    }

    pub fn with_room_id(mut self, id: RoomId) -> Self {
        self.room_id = id;
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }

    pub fn with_status(mut self, status: RoomStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.room_id,
            number: self.number,
            room_type: self.room_type,
            status: self.status,
        }
    }
}

/// Builder for extra-service booking snapshots
pub struct TestServiceBookingBuilder {
    id: ServiceBookingId,
    guest_id: GuestId,
    category: String,
    amount: Money,
    status: ServiceStatus,
    payment_status: SettlementStatus,
    booked_at: DateTime<Utc>,
}

impl Default for TestServiceBookingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestServiceBookingBuilder {
    /// Creates a builder for a completed spa booking
    pub fn new() -> Self {
        Self {
            id: ServiceBookingId::new(),
            guest_id: GuestId::new(),
            category: "Spa".to_string(),
            amount: Money::new(dec!(500), Currency::INR),
            status: ServiceStatus::Completed,
            payment_status: SettlementStatus::Paid,
            booked_at: TemporalFixtures::report_clock(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_status(mut self, status: ServiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_payment_status(mut self, payment_status: SettlementStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    pub fn with_booked_at(mut self, booked_at: DateTime<Utc>) -> Self {
        self.booked_at = booked_at;
        self
    }

    pub fn build(self) -> ServiceBookingSnapshot {
        ServiceBookingSnapshot {
            id: self.id,
            guest_id: self.guest_id,
            category: self.category,
            amount: self.amount,
            status: self.status,
            payment_status: self.payment_status,
            booked_at: self.booked_at,
        }
    }
}

/// In-memory booking directory implementing [`BookingSource`]
#[derive(Default)]
pub struct InMemoryBookingDirectory {
    bookings: HashMap<BookingId, BookingSnapshot>,
}

impl InMemoryBookingDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(bookings: Vec<BookingSnapshot>) -> Self {
        Self {
            bookings: bookings.into_iter().map(|b| (b.booking_id, b)).collect(),
        }
    }

    pub fn insert(&mut self, booking: BookingSnapshot) {
        self.bookings.insert(booking.booking_id, booking);
    }
}

impl BookingSource for InMemoryBookingDirectory {
    fn booking(&self, id: BookingId) -> Option<BookingSnapshot> {
        self.bookings.get(&id).cloned()
    }
}
