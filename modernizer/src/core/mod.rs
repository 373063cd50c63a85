//! Deterministic, pure logic for the migration pipeline.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! text and paths and return deterministic outputs suitable for tests.

pub mod exclusion;
pub mod lexer;
pub mod report;
pub mod rules;
