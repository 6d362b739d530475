//! Writing issued certificates and their keys to disk.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::CliError;

/// Mode of the certificate file.
pub const CERTIFICATE_MODE: u32 = 0o600;
/// Mode of the private key file.
pub const PRIVATE_KEY_MODE: u32 = 0o400;

/// Output locations for an issued certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateFiles {
    pub certificate: PathBuf,
    pub private_key: PathBuf,
}

impl CertificateFiles {
    pub fn new(certificate: impl Into<PathBuf>, private_key: impl Into<PathBuf>) -> Self {
        Self {
            certificate: certificate.into(),
            private_key: private_key.into(),
        }
    }

    /// Write the certificate, then the key.
    ///
    /// If the key cannot be written the certificate is removed again, so a
    /// failed run never leaves a certificate without its key.
    pub fn persist(&self, certificate_pem: &str, private_key_pem: &str) -> Result<(), CliError> {
        info!("Saving certificate...");
        write_with_mode(&self.certificate, certificate_pem.as_bytes(), CERTIFICATE_MODE)
            .map_err(|e| write_error(&self.certificate, e))?;

        if let Err(e) = write_with_mode(&self.private_key, private_key_pem.as_bytes(), PRIVATE_KEY_MODE)
        {
            if let Err(cleanup) = fs::remove_file(&self.certificate) {
                warn!(
                    path = %self.certificate.display(),
                    error = %cleanup,
                    "Failed to remove certificate after key write failure"
                );
            }
            return Err(write_error(&self.private_key, e));
        }

        info!("Certificate saved to {}", self.certificate.display());
        info!("Private key saved to {}", self.private_key.display());
        Ok(())
    }
}

fn write_error(path: &Path, e: std::io::Error) -> CliError {
    CliError::output(format!("failed to write {}: {e}", path.display()))
}

/// Write `contents` next to `path` and rename the result into place.
///
/// Renaming replaces an existing read-only file, which opening it for
/// writing would not.
fn write_with_mode(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    let staged = staged_path(path);
    remove_if_exists(&staged)?;

    let result = write_new(&staged, contents, mode).and_then(|()| fs::rename(&staged, path));
    if result.is_err() {
        let _ = fs::remove_file(&staged);
    }
    result
}

fn staged_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

fn write_new(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;

    // The create mode is subject to the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}
