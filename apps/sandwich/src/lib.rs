//! # Sandwich Library
//!
//! This library exposes the HTTP API and CLI modules for testing.
//!
//! The binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;

// Re-export sandwich_core for convenience
pub use sandwich_core;
