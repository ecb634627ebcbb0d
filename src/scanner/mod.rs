//! Scan invocation seam and exit-code classification
//!
//! The orchestrator talks to the external scanner through the
//! [`ScanRunner`] capability trait so tests can substitute a fake
//! runner returning controlled outcomes without spawning processes.

pub mod prowler;

pub use prowler::ProwlerRunner;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Exit code Prowler uses for "scan completed, failed checks found"
///
/// Distinct from an operational failure: the scan itself succeeded, it
/// just has findings to report.
pub const PROWLER_FINDINGS_EXIT_CODE: i32 = 3;

/// Classified result of one scan invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanOutcome {
    /// Exit code 0: all checks passed
    Passed,

    /// The designated findings exit code: completed with findings
    FindingsPresent,

    /// Any other non-zero exit code
    Failed(i32),
}

impl ScanOutcome {
    /// Classify a raw process exit code
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Passed,
            PROWLER_FINDINGS_EXIT_CODE => Self::FindingsPresent,
            other => Self::Failed(other),
        }
    }

    /// Whether the scan itself ran to completion (passed or findings)
    pub fn completed(&self) -> bool {
        matches!(self, Self::Passed | Self::FindingsPresent)
    }
}

/// Capability interface for running one scan
///
/// `run_scan` blocks until the external process terminates. That is a
/// deliberate synchronization point: the next account's credential
/// install must not begin while a scan could still observe the current
/// identity.
#[async_trait]
pub trait ScanRunner: Send + Sync {
    /// Run one scan against the currently-installed default credentials
    ///
    /// # Arguments
    ///
    /// * `region` - AWS region to scan, passed through uninterpreted
    /// * `account_name` - label attached to the scan's output artifacts
    ///
    /// # Errors
    ///
    /// Returns an error if the scanner process cannot be spawned or
    /// waited on. Callers treat that as recoverable for the current
    /// account, never as fatal to the run.
    async fn run_scan(&self, region: &str, account_name: &str) -> anyhow::Result<ScanOutcome>;
}
