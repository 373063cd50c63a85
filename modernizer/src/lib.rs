//! One-shot migration of deprecated Flutter API usage in Dart sources.
//!
//! The migrator walks a directory tree, applies a fixed, ordered list of
//! regex rewrites to every `.dart` file, and overwrites the files that
//! changed. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (rules, lexer, exclusion, report).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, traversal, atomic writes).
//!
//! [`migrate`] ties the two together into the scan-transform-write pipeline.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod migrate;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
