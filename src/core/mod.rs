//! Pure, deterministic harness logic.
//!
//! No I/O in this module tree: naming rules and build planning operate on
//! values the [`crate::io`] layer observed from disk.

pub mod chapter;
pub mod plan;
