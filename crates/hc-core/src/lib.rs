//! Health-check report CLI library.
//!
//! This library provides the command-line plumbing around `hc-report`:
//! - Exit codes for CLI operations
//! - Configuration file resolution and overrides
//! - Logging initialization
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod exit_codes;
pub mod logging;
