//! Build/test harness for a book repository.
//!
//! Compiles per-chapter markup files (`chapter_N.asciidoc`) into HTML pages
//! through an external document compiler, and runs each chapter's companion
//! test file through an external test runner, gated on a source-repository
//! sync step. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (naming, staleness planning).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (discovery, config, process
//!   execution, the external tool adapters). Isolated to enable faking in
//!   tests.
//!
//! Orchestration modules ([`build`], [`suite`], [`clean`], [`status`])
//! coordinate core logic with I/O to implement CLI commands.

pub mod build;
pub mod clean;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod status;
pub mod suite;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
