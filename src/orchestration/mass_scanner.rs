//! Mass Scanner - Sequential credential-rotation-and-scan loop
//!
//! Features:
//! - One install + one scan per valid CSV row, strictly back-to-back
//! - Per-record isolation: a failed install, read-back, or scan never
//!   stops the run; every later record gets its own attempt
//! - Fatal handling only for argument/input errors, before any side
//!   effect
//! - Run summary with per-class tallies
//!
//! The install/scan pair is a synchronization point, not an
//! optimization target: the credentials file is a single mutable slot,
//! and overlapping work across records would detach "identity in the
//! file" from "account being scanned". The loop is therefore fully
//! sequential even though everything runs on the async runtime.

use crate::core::error::ScanError;
use crate::core::records::{RecordSource, RowOutcome};
use crate::core::state_machine::{SweepState, SweepStateMachine};
use crate::credentials::CredentialInstaller;
use crate::scanner::{ScanOutcome, ScanRunner};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Outcome of one account's install + scan attempt
#[derive(Debug, Clone, Serialize)]
pub struct AccountResult {
    /// Account display name from the CSV
    pub account_name: String,

    /// Classified scan outcome; `None` if the scan never started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ScanOutcome>,

    /// Install or spawn error that prevented or replaced the outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report for one whole sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Region every scan in this sweep targeted
    pub region: String,

    /// Per-account results in processing order
    pub results: Vec<AccountResult>,

    /// Data rows skipped for missing/empty required fields
    pub skipped_rows: usize,

    /// Completion timestamp
    pub completed_at: DateTime<Utc>,
}

impl SweepReport {
    /// Accounts whose scan passed with no findings
    pub fn passed(&self) -> usize {
        self.count(|r| r.outcome == Some(ScanOutcome::Passed))
    }

    /// Accounts whose scan completed with findings
    pub fn findings(&self) -> usize {
        self.count(|r| r.outcome == Some(ScanOutcome::FindingsPresent))
    }

    /// Accounts whose scan failed or never started
    pub fn failed(&self) -> usize {
        self.count(|r| matches!(r.outcome, Some(ScanOutcome::Failed(_))) || r.error.is_some())
    }

    fn count<F: Fn(&AccountResult) -> bool>(&self, predicate: F) -> usize {
        self.results.iter().filter(|r| predicate(r)).count()
    }
}

/// MassScanner - Drives the sweep across every account in the CSV
pub struct MassScanner {
    installer: CredentialInstaller,
    runner: Box<dyn ScanRunner>,
    state: SweepStateMachine,
}

impl MassScanner {
    /// Create a new MassScanner
    ///
    /// # Arguments
    ///
    /// * `installer` - owner of the default credential slot
    /// * `runner` - scan capability (the Prowler CLI in production)
    pub fn new(installer: CredentialInstaller, runner: Box<dyn ScanRunner>) -> Self {
        Self {
            installer,
            runner,
            state: SweepStateMachine::new(),
        }
    }

    /// Current workflow state
    pub fn state(&self) -> SweepState {
        self.state.state()
    }

    /// Run the whole sweep: one install + one scan per valid CSV row
    ///
    /// # Arguments
    ///
    /// * `csv_path` - account list, header-addressed CSV
    /// * `region` - AWS region passed through to every scan
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ScanError`] for a missing or unreadable CSV;
    /// nothing has been installed or scanned when the input itself is
    /// missing, and a mid-stream read error stops before the next
    /// record. All other failures are contained within the record that
    /// caused them.
    pub async fn sweep(&mut self, csv_path: &Path, region: &str) -> Result<SweepReport, ScanError> {
        self.state.transition(SweepState::ValidatingArguments);

        if !csv_path.is_file() {
            self.state.transition(SweepState::Failed);
            return Err(ScanError::CsvNotFound {
                path: csv_path.to_path_buf(),
            });
        }

        println!("📋 Account list: {}", csv_path.display());
        println!("🌐 Region: {}", region);
        println!(
            "⚠️  Every install overwrites {} in full; other profiles in that file are discarded\n",
            self.installer.path().display()
        );

        self.state.transition(SweepState::ReadingRecords);
        let source = match RecordSource::open(csv_path) {
            Ok(source) => source,
            Err(e) => {
                self.state.transition(SweepState::Failed);
                return Err(e);
            }
        };

        let mut results = Vec::new();
        let mut skipped_rows = 0;

        for item in source {
            match item {
                Err(e) => {
                    self.state.transition(SweepState::Failed);
                    return Err(e);
                }
                Ok(RowOutcome::Skipped(skip)) => {
                    println!("⚠️  Skipping row {}: {}", skip.row, skip.reason);
                    skipped_rows += 1;
                }
                Ok(RowOutcome::Valid(record)) => {
                    println!("\n🚀 Processing account: {}", record.account_name);

                    self.state.transition(SweepState::InstallingCredentials);
                    if let Err(e) = self.installer.install(&record).await {
                        // Without a completed install the scan would run
                        // against the previous account's identity; skip
                        // the scan, keep the run alive.
                        eprintln!("❌ {}", e);
                        results.push(AccountResult {
                            account_name: record.account_name,
                            outcome: None,
                            error: Some(e.to_string()),
                        });
                        continue;
                    }
                    println!("🔐 Default profile credentials updated");

                    match self.installer.read_back().await {
                        Ok(echo) => {
                            println!("Current credentials file content:");
                            println!("{}", echo);
                        }
                        Err(e) => {
                            // Verification only; the write already
                            // succeeded and the scan still proceeds
                            eprintln!("❌ {}", e);
                        }
                    }

                    self.state.transition(SweepState::Scanning);
                    let result = self.scan_account(region, &record.account_name).await;
                    results.push(result);
                }
            }
        }

        self.state.transition(SweepState::Done);

        let report = SweepReport {
            region: region.to_string(),
            results,
            skipped_rows,
            completed_at: Utc::now(),
        };

        Self::print_summary(&report);

        Ok(report)
    }

    /// Run and classify one scan; never fails the run
    async fn scan_account(&self, region: &str, account_name: &str) -> AccountResult {
        match self.runner.run_scan(region, account_name).await {
            Ok(outcome) => {
                match outcome {
                    ScanOutcome::Passed => {
                        println!("✅ Scan completed for account: {}", account_name);
                    }
                    ScanOutcome::FindingsPresent => {
                        println!(
                            "⚠️  Scan completed with findings for account: {}",
                            account_name
                        );
                    }
                    ScanOutcome::Failed(code) => {
                        eprintln!(
                            "❌ Scan failed for account: {} (exit code {})",
                            account_name, code
                        );
                    }
                }
                AccountResult {
                    account_name: account_name.to_string(),
                    outcome: Some(outcome),
                    error: None,
                }
            }
            Err(e) => {
                eprintln!("❌ Scan could not run for account {}: {}", account_name, e);
                AccountResult {
                    account_name: account_name.to_string(),
                    outcome: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Print sweep summary
    fn print_summary(report: &SweepReport) {
        println!("\n{}", "=".repeat(60));
        println!("📊 Sweep Summary ({})", report.region);
        println!("{}", "=".repeat(60));

        println!("\n✅ Passed: {}", report.passed());
        println!("⚠️  Findings: {}", report.findings());
        println!("❌ Failed: {}", report.failed());
        if report.skipped_rows > 0 {
            println!("⏭️  Skipped rows: {}", report.skipped_rows);
        }

        for result in &report.results {
            match (&result.outcome, &result.error) {
                (Some(ScanOutcome::Passed), _) => {
                    println!("   - {}: passed", result.account_name);
                }
                (Some(ScanOutcome::FindingsPresent), _) => {
                    println!("   - {}: findings present", result.account_name);
                }
                (Some(ScanOutcome::Failed(code)), _) => {
                    println!("   - {}: failed (exit code {})", result.account_name, code);
                }
                (None, Some(error)) => {
                    println!("   - {}: {}", result.account_name, error);
                }
                (None, None) => {}
            }
        }

        println!("\n{}\n", "=".repeat(60));
    }
}
