//! Record Source - Parses account records out of the input CSV
//!
//! The input is a header-addressed CSV; the three required columns are
//! looked up by name, so column order and any extra columns are
//! irrelevant. Rows with a missing or empty required field are skipped,
//! never processed partially.

use crate::core::error::ScanError;
use secrecy::SecretString;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Required column: account display name
pub const ACCOUNT_NAME_COLUMN: &str = "Account Name";
/// Required column: AWS access key ID
pub const ACCESS_KEY_COLUMN: &str = "Access Key ID";
/// Required column: AWS secret access key
pub const SECRET_KEY_COLUMN: &str = "Secret Access Key";

/// One account's credential and label tuple parsed from the CSV
///
/// A record is only ever constructed with all three fields non-empty;
/// incomplete rows are reported as [`RowOutcome::Skipped`] instead.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    /// Display name, used as the scan output label
    pub account_name: String,

    /// Opaque credential material
    pub access_key_id: String,

    /// Opaque credential material, kept out of debug output and logs
    pub secret_access_key: SecretString,
}

/// A data row that failed field validation and was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data row number (the header row is not counted)
    pub row: usize,

    /// Human-readable reason naming the offending columns
    pub reason: String,
}

/// Outcome of validating one data row
#[derive(Debug, Clone)]
pub enum RowOutcome {
    Valid(AccountRecord),
    Skipped(SkippedRow),
}

/// Resolved header positions of the required columns
///
/// A column absent from the header leaves its index `None`, which makes
/// every data row skip with a warning rather than aborting the run.
#[derive(Debug, Clone, Copy)]
struct ColumnIndexes {
    account_name: Option<usize>,
    access_key: Option<usize>,
    secret_key: Option<usize>,
}

/// Lazy sequence of account records read from a CSV file
///
/// Finite and not restartable once consumed. Yields one item per data
/// row; a read error mid-stream is fatal and ends the sequence.
pub struct RecordSource {
    records: csv::StringRecordsIntoIter<File>,
    columns: ColumnIndexes,
    path: PathBuf,
    row: usize,
}

impl RecordSource {
    /// Open a CSV file and resolve the required columns from its header
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::CsvUnreadable`] if the file cannot be opened
    /// or the header row cannot be read.
    pub fn open(path: &Path) -> Result<Self, ScanError> {
        let unreadable = |source| ScanError::CsvUnreadable {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(unreadable)?;

        let headers = reader.headers().map_err(unreadable)?.clone();
        let position = |name: &str| headers.iter().position(|h| h == name);

        Ok(Self {
            columns: ColumnIndexes {
                account_name: position(ACCOUNT_NAME_COLUMN),
                access_key: position(ACCESS_KEY_COLUMN),
                secret_key: position(SECRET_KEY_COLUMN),
            },
            records: reader.into_records(),
            path: path.to_path_buf(),
            row: 0,
        })
    }

    /// Validate one raw row against the required columns
    fn validate_row(&self, record: &csv::StringRecord) -> RowOutcome {
        let field = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");

        let account_name = field(self.columns.account_name);
        let access_key = field(self.columns.access_key);
        let secret_key = field(self.columns.secret_key);

        let mut missing = Vec::new();
        if account_name.is_empty() {
            missing.push(ACCOUNT_NAME_COLUMN);
        }
        if access_key.is_empty() {
            missing.push(ACCESS_KEY_COLUMN);
        }
        if secret_key.is_empty() {
            missing.push(SECRET_KEY_COLUMN);
        }

        if !missing.is_empty() {
            return RowOutcome::Skipped(SkippedRow {
                row: self.row,
                reason: format!("missing or empty: {}", missing.join(", ")),
            });
        }

        RowOutcome::Valid(AccountRecord {
            account_name: account_name.to_string(),
            access_key_id: access_key.to_string(),
            secret_access_key: SecretString::new(secret_key.to_string().into()),
        })
    }
}

impl Iterator for RecordSource {
    type Item = Result<RowOutcome, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.row += 1;

        match record {
            Ok(record) => Some(Ok(self.validate_row(&record))),
            Err(source) => Some(Err(ScanError::CsvUnreadable {
                path: self.path.clone(),
                source,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("accounts.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_valid_rows_parsed() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Account Name,Access Key ID,Secret Access Key\n\
             acme,AKIA1,secret1\n\
             gamma,AKIA3,secret3\n",
        );

        let outcomes: Vec<_> = RecordSource::open(&path)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        let RowOutcome::Valid(record) = &outcomes[0] else {
            panic!("first row should be valid");
        };
        assert_eq!(record.account_name, "acme");
        assert_eq!(record.access_key_id, "AKIA1");
        assert_eq!(record.secret_access_key.expose_secret(), "secret1");
    }

    #[test]
    fn test_incomplete_row_skipped_with_reason() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Account Name,Access Key ID,Secret Access Key\n\
             acme,AKIA1,secret1\n\
             beta,,secret2\n\
             gamma,AKIA3,secret3\n",
        );

        let outcomes: Vec<_> = RecordSource::open(&path)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(outcomes.len(), 3);
        let RowOutcome::Skipped(skip) = &outcomes[1] else {
            panic!("beta row should be skipped");
        };
        assert_eq!(skip.row, 2);
        assert!(skip.reason.contains(ACCESS_KEY_COLUMN));
        assert!(!skip.reason.contains(SECRET_KEY_COLUMN));
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Secret Access Key,Account Name,Access Key ID\n\
             secret1,acme,AKIA1\n",
        );

        let outcomes: Vec<_> = RecordSource::open(&path)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let RowOutcome::Valid(record) = &outcomes[0] else {
            panic!("row should be valid");
        };
        assert_eq!(record.account_name, "acme");
        assert_eq!(record.access_key_id, "AKIA1");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Account Name,Email,Access Key ID,Secret Access Key,Notes\n\
             acme,ops@acme.example,AKIA1,secret1,production\n",
        );

        let outcomes: Vec<_> = RecordSource::open(&path)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], RowOutcome::Valid(_)));
    }

    #[test]
    fn test_missing_required_column_skips_every_row() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Account Name,Access Key ID\n\
             acme,AKIA1\n\
             gamma,AKIA3\n",
        );

        let outcomes: Vec<_> = RecordSource::open(&path)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            let RowOutcome::Skipped(skip) = outcome else {
                panic!("rows without a secret key column should be skipped");
            };
            assert!(skip.reason.contains(SECRET_KEY_COLUMN));
        }
    }

    #[test]
    fn test_short_row_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Account Name,Access Key ID,Secret Access Key\n\
             acme,AKIA1\n",
        );

        let outcomes: Vec<_> = RecordSource::open(&path)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert!(matches!(outcomes[0], RowOutcome::Skipped(_)));
    }

    #[test]
    fn test_header_only_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Account Name,Access Key ID,Secret Access Key\n");

        let mut source = RecordSource::open(&path).unwrap();
        assert!(source.next().is_none());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-file.csv");

        let result = RecordSource::open(&path);
        assert!(matches!(result, Err(ScanError::CsvUnreadable { .. })));
    }

    #[test]
    fn test_secret_not_exposed_by_debug() {
        let record = AccountRecord {
            account_name: "acme".to_string(),
            access_key_id: "AKIA1".to_string(),
            secret_access_key: SecretString::new("secret1".to_string().into()),
        };

        let debug = format!("{:?}", record);
        assert!(!debug.contains("secret1"));
    }
}
