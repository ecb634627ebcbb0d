pub mod installer;
pub mod masker;

pub use installer::CredentialInstaller;
pub use masker::{mask_credentials_file, mask_secret};
