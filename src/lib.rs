//! masjid-tv: prayer-time countdown and rotating notice board for unattended
//! mosque displays, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
