//! Side-effecting operations: discovery, config, and the external tools.
//!
//! The document compiler, sync script, and test runner live behind trait
//! seams so orchestration tests can fake them without spawning processes.

pub mod compiler;
pub mod config;
pub mod discover;
pub mod init;
pub mod process;
pub mod sync;
pub mod test_runner;
