//! Notice feed adapters. Implement `NoticeSource`.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileNoticeFeed;
pub use memory::MemoryNoticeFeed;
