//! Orchestration layer for the credential sweep
//!
//! This module drives the per-account loop: install one account's
//! credentials, then run one scan, strictly in that order.

pub mod mass_scanner;

// Re-export main types for convenience
pub use mass_scanner::{AccountResult, MassScanner, SweepReport};
