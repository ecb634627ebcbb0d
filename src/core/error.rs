//! Error handling for the credential sweep
//!
//! This module provides the error taxonomy for the sweep workflow
//! using the thiserror crate for ergonomic error handling. Fatal errors
//! abort the whole run; recoverable errors are logged and the next
//! account still gets its own attempt.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sweep operations
#[derive(Error, Debug)]
pub enum ScanError {
    // Input errors
    #[error("CSVファイルが見つかりません: {}", path.display())]
    CsvNotFound { path: PathBuf },

    #[error("CSVファイルを読み込めませんでした: {}: {source}", path.display())]
    CsvUnreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // Environment errors
    #[error("ホームディレクトリを特定できませんでした")]
    HomeDirNotFound,

    // Credential file errors
    #[error("認証情報ファイルの書き込みに失敗しました: {}: {source}", path.display())]
    CredentialWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("認証情報ファイルの読み戻しに失敗しました: {}: {source}", path.display())]
    CredentialReadBack {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Check if this error aborts the whole run
    ///
    /// Fatal errors surface immediately with a non-zero process exit;
    /// everything else is logged and the next account still gets its own
    /// attempt.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CsvNotFound { .. } | Self::CsvUnreadable { .. } | Self::HomeDirNotFound
        )
    }

    /// Get suggested actions for this error
    pub fn suggested_actions(&self) -> Vec<&'static str> {
        match self {
            Self::CsvNotFound { .. } => vec![
                "CSVファイルのパスを確認してください",
                "使い方: prowler-mass-scan <path-to-csv> <aws-region>",
            ],
            Self::CsvUnreadable { .. } => vec![
                "ファイルの読み取り権限を確認してください",
                "ヘッダー行（Account Name, Access Key ID, Secret Access Key）を確認してください",
            ],
            Self::HomeDirNotFound => {
                vec!["HOME環境変数が設定されているか確認してください"]
            }
            Self::CredentialWrite { .. } => vec![
                "~/.aws ディレクトリの書き込み権限を確認してください",
                "ディスク容量を確認してください",
            ],
            Self::CredentialReadBack { .. } => {
                vec!["~/.aws/credentials の読み取り権限を確認してください"]
            }
        }
    }

    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::CsvNotFound { .. } => "CSV_NOT_FOUND",
            Self::CsvUnreadable { .. } => "CSV_UNREADABLE",
            Self::HomeDirNotFound => "HOME_DIR_NOT_FOUND",
            Self::CredentialWrite { .. } => "CREDENTIAL_WRITE",
            Self::CredentialReadBack { .. } => "CREDENTIAL_READ_BACK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_not_found_error() {
        let error = ScanError::CsvNotFound {
            path: PathBuf::from("accounts.csv"),
        };

        assert!(error.is_fatal());
        assert_eq!(error.code(), "CSV_NOT_FOUND");
        assert!(error.to_string().contains("accounts.csv"));
        assert!(error.suggested_actions().len() >= 2);
    }

    #[test]
    fn test_csv_unreadable_is_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = ScanError::CsvUnreadable {
            path: PathBuf::from("accounts.csv"),
            source: csv::Error::from(io),
        };

        assert!(error.is_fatal());
        assert_eq!(error.code(), "CSV_UNREADABLE");
    }

    #[test]
    fn test_home_dir_not_found_is_fatal() {
        let error = ScanError::HomeDirNotFound;

        assert!(error.is_fatal());
        assert_eq!(error.code(), "HOME_DIR_NOT_FOUND");
        assert!(error.suggested_actions().iter().any(|a| a.contains("HOME")));
    }

    #[test]
    fn test_credential_write_is_recoverable() {
        let error = ScanError::CredentialWrite {
            path: PathBuf::from("/home/op/.aws/credentials"),
            source: std::io::Error::other("disk full"),
        };

        assert!(!error.is_fatal());
        assert_eq!(error.code(), "CREDENTIAL_WRITE");
        assert!(error.to_string().contains("credentials"));
    }

    #[test]
    fn test_credential_read_back_is_recoverable() {
        let error = ScanError::CredentialReadBack {
            path: PathBuf::from("/home/op/.aws/credentials"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };

        assert!(!error.is_fatal());
        assert_eq!(error.code(), "CREDENTIAL_READ_BACK");
    }

    #[test]
    fn test_error_display_includes_source() {
        let error = ScanError::CredentialWrite {
            path: PathBuf::from("/tmp/creds"),
            source: std::io::Error::other("disk full"),
        };

        let display = format!("{}", error);
        assert!(display.contains("/tmp/creds"));
        assert!(display.contains("disk full"));
    }
}
