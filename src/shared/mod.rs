//! Cross-cutting pieces shared by the binary and the adapters.

pub mod config;
