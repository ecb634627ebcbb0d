//! Credential Installer - Owns the default AWS credential slot
//!
//! The scanner reads whatever identity sits in the `[default]` profile
//! of the AWS credentials file, so each account's key material is
//! installed there before its scan. The write is destructive and
//! non-additive: the whole file is replaced with a single `[default]`
//! section, and any other profile an operator kept in that file is
//! lost. That is intentional for a single-active-identity sweep, but it
//! is an operational hazard the orchestrator announces up front.
//!
//! There is no file locking. Two concurrent instances racing on the
//! same credentials file would corrupt the correspondence between the
//! installed identity and the account being scanned; single-instance,
//! sequential execution is a documented constraint of this tool.

use crate::core::error::ScanError;
use crate::core::records::AccountRecord;
use crate::credentials::masker::mask_credentials_file;
use secrecy::ExposeSecret;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Installs one account's key material as the default AWS profile
///
/// Exposes the single-writer slot as a narrow interface: `install`
/// performs the full overwrite, `read_back` re-reads the file for
/// operator verification. Tests point the installer at a tempdir via
/// [`CredentialInstaller::with_path`].
#[derive(Debug)]
pub struct CredentialInstaller {
    credentials_path: PathBuf,
}

impl CredentialInstaller {
    /// Create an installer targeting `~/.aws/credentials`
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::HomeDirNotFound`] if the home directory
    /// cannot be resolved.
    pub fn new() -> Result<Self, ScanError> {
        let home = dirs::home_dir().ok_or(ScanError::HomeDirNotFound)?;
        Ok(Self::with_path(home.join(".aws").join("credentials")))
    }

    /// Create an installer targeting an explicit credentials file path
    pub fn with_path<P: Into<PathBuf>>(credentials_path: P) -> Self {
        Self {
            credentials_path: credentials_path.into(),
        }
    }

    /// Path of the credential file this installer owns
    pub fn path(&self) -> &Path {
        &self.credentials_path
    }

    /// Overwrite the credentials file with the record's key material
    ///
    /// Ensures the parent directory exists (idempotent), then replaces
    /// the entire file with exactly one `[default]` profile holding the
    /// two supplied fields. The file is fully written and closed before
    /// this returns, so a scan started afterwards observes exactly this
    /// record's identity.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::CredentialWrite`] if the directory or file
    /// cannot be written.
    pub async fn install(&self, record: &AccountRecord) -> Result<(), ScanError> {
        let write_failed = |source| ScanError::CredentialWrite {
            path: self.credentials_path.clone(),
            source,
        };

        if let Some(parent) = self.credentials_path.parent() {
            fs::create_dir_all(parent).await.map_err(write_failed)?;
        }

        let profile = format!(
            "[default]\naws_access_key_id = {}\naws_secret_access_key = {}\n",
            record.access_key_id,
            record.secret_access_key.expose_secret()
        );

        fs::write(&self.credentials_path, profile)
            .await
            .map_err(write_failed)
    }

    /// Re-read the credentials file for operator verification
    ///
    /// Returns the file content with the secret key value masked, ready
    /// to echo to the console. A failure here does not change the
    /// outcome of a preceding write and must not abort the record's
    /// processing; the caller logs it and the scan still proceeds.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::CredentialReadBack`] if the file cannot be
    /// read.
    pub async fn read_back(&self) -> Result<String, ScanError> {
        let content = fs::read_to_string(&self.credentials_path)
            .await
            .map_err(|source| ScanError::CredentialReadBack {
                path: self.credentials_path.clone(),
                source,
            })?;

        Ok(mask_credentials_file(content.trim_end()))
    }
}
