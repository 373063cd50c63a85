//! Stable exit codes for the migrator CLI.

/// Run completed, whether or not any file changed.
pub const OK: i32 = 0;
/// Invalid arguments or config, or an I/O or decode error aborted the run.
pub const FAILED: i32 = 1;
