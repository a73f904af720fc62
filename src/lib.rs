// ABOUTME: Library root for kubeship - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cleanup;
pub mod cluster;
pub mod config;
pub mod context;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod report;
pub mod types;
