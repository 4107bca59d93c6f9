//! Shared test utilities for the hotel operations test suite
//!
//! Fixtures provide predictable standalone values; builders construct
//! snapshot data with sensible defaults so tests only spell out what they
//! are actually testing.

pub mod fixtures;
pub mod builders;

pub use fixtures::{MoneyFixtures, TemporalFixtures};
pub use builders::{
    InMemoryBookingDirectory, TestBookingBuilder, TestRoomBuilder, TestServiceBookingBuilder,
};
