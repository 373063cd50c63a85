//! I/O helpers for the migrator.

pub mod config;
pub mod discover;
pub mod write;
