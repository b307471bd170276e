//! Infrastructure adapters. Implement outbound ports.
//!
//! Timetable and notice files, wall clock, terminal. Map errors to DomainError.

pub mod clock;
pub mod feed;
pub mod persistence;
pub mod ui;
