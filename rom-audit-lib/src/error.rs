use std::path::PathBuf;

use thiserror::Error;

use rom_audit_dat::DatError;

/// Errors that can occur while auditing a ROM directory.
///
/// Validation outcomes (missing or mismatched sub-roms, games absent from the
/// DAT) are data in the report, not errors; only problems that make the run
/// itself unusable surface here.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The DAT catalog could not be loaded.
    #[error(transparent)]
    Dat(#[from] DatError),

    /// The ROM directory could not be walked.
    #[error("read rom directory {}: {source}", path.display())]
    RomDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The walk finished but found nothing to audit.
    #[error("no rom archives found under {}", path.display())]
    NoArchives { path: PathBuf },

    /// The primary archive or an existing parent archive could not be opened.
    #[error("open archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The archive extension is neither `.zip` nor `.7z`.
    #[error("unsupported archive format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The cancellation token fired between archives.
    #[error("audit cancelled")]
    Cancelled,
}

impl AuditError {
    pub(crate) fn archive(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Archive {
            path: path.into(),
            source: source.into(),
        }
    }
}
