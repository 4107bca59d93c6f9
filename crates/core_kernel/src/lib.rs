//! Core Kernel - Foundational types and utilities for the hotel operations system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Temporal types for stay periods and timezone-aligned reporting windows
//! - Strongly-typed entity identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{Timezone, DateRange, StayPeriod, TemporalError};
pub use identifiers::{
    BookingId, GuestId, RoomId, InvoiceId, PaymentId,
    TransactionId, VendorId, ServiceBookingId, StaffId,
};
