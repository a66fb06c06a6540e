//! Stable exit codes for harness CLI commands.

/// Command succeeded; for test commands, all tests passed.
pub const OK: i32 = 0;
/// Command failed due to invalid layout/config or any hard error (including
/// a document-compiler failure).
pub const INVALID: i32 = 1;
/// The source-repository sync step failed; no tests were executed.
pub const SYNC_FAILED: i32 = 2;
/// The test runner or suite script reported failure.
pub const TESTS_FAILED: i32 = 3;
