//! Shared utilities for the surveillance workspace: logger setup and
//! epoch-millisecond time helpers used by every member crate.

pub mod logger;
pub mod time;
