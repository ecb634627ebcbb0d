//! Prowler Mass Scan CLI
//!
//! Sequential multi-account AWS scanning: for every row of the account
//! CSV, install that account's credentials as the default profile and
//! run one Prowler scan, streaming its output to the console.

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use prowler_mass_scan::{CredentialInstaller, MassScanner, ProwlerRunner, ScanError};
use std::path::PathBuf;
use std::process;

const USAGE: &str = "Usage: prowler-mass-scan <path_to_csv> <aws_region>";

/// Sequential Prowler scans across a CSV of AWS accounts
#[derive(Parser)]
#[command(name = "prowler-mass-scan")]
#[command(version = "0.1.0")]
#[command(about = "Sequential Prowler scans across a CSV of AWS accounts", long_about = None)]
struct Cli {
    /// CSV with Account Name, Access Key ID and Secret Access Key columns
    #[arg(value_name = "PATH_TO_CSV")]
    csv_path: PathBuf,

    /// AWS region to scan (e.g. us-east-1), passed through to Prowler
    #[arg(value_name = "AWS_REGION")]
    region: String,
}

#[tokio::main]
async fn main() {
    let result = run().await;

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("\n❌ Error");
            eprintln!("{}", e);
            if let Some(scan_error) = e.downcast_ref::<ScanError>() {
                for action in scan_error.suggested_actions() {
                    eprintln!("  💡 {}", action);
                }
            }
            process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(0);
        }
        Err(_) => {
            // Wrong arity: usage on stdout, non-zero exit, no side effects
            println!("{}", USAGE);
            return Ok(1);
        }
    };

    println!("\n🛡️  prowler-mass-scan\n");

    let installer = CredentialInstaller::new()?;
    let mut scanner = MassScanner::new(installer, Box::new(ProwlerRunner::new()));

    match scanner.sweep(&cli.csv_path, &cli.region).await {
        Ok(_report) => {
            // Per-account scan failures are reported in the summary but
            // do not fail the run; only argument/input errors do
            Ok(0)
        }
        Err(e) => {
            eprintln!("\n❌ {}", e);
            for action in e.suggested_actions() {
                eprintln!("  💡 {}", action);
            }
            Ok(1)
        }
    }
}
