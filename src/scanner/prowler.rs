//! Prowler Runner - Invokes the Prowler CLI for one account
//!
//! Runs `prowler aws -f <region> -F <account_name>` with inherited
//! stdout/stderr so scan progress streams to the console in real time,
//! uncaptured and untransformed. The `-F` label makes Prowler name its
//! output artifacts after the account
//! (`./output/{account}.{ocsf.json,csv,html}` and `./output/compliance/`).

use crate::scanner::{ScanOutcome, ScanRunner};
use anyhow::Context;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Default scanner binary name, resolved via `PATH`
const PROWLER_BINARY: &str = "prowler";

/// Production [`ScanRunner`] backed by the Prowler CLI
#[derive(Debug, Clone)]
pub struct ProwlerRunner {
    binary: String,
}

impl Default for ProwlerRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProwlerRunner {
    /// Create a runner invoking `prowler` from `PATH`
    pub fn new() -> Self {
        Self::with_binary(PROWLER_BINARY)
    }

    /// Create a runner invoking an explicit binary
    pub fn with_binary<S: Into<String>>(binary: S) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The command line this runner would execute for a given scan
    pub fn command_line(&self, region: &str, account_name: &str) -> String {
        format!("{} aws -f {} -F {}", self.binary, region, account_name)
    }
}

#[async_trait]
impl ScanRunner for ProwlerRunner {
    async fn run_scan(&self, region: &str, account_name: &str) -> anyhow::Result<ScanOutcome> {
        // No timeout: the scan runs to natural completion. External
        // supervision is the operator's concern.
        let status = Command::new(&self.binary)
            .args(["aws", "-f", region, "-F", account_name])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("failed to launch {}", self.binary))?;

        // Termination by signal has no exit code; classify as a failure
        Ok(ScanOutcome::from_code(status.code().unwrap_or(-1)))
    }
}
