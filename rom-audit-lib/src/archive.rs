//! Archive entry enumeration for `.zip` and `.7z` containers.
//!
//! The audit only consults container metadata (entry name, uncompressed size,
//! stored CRC-32) and never inflates payload bytes. Handles are released when
//! enumeration returns, so callers never hold an archive open across
//! iterations.

use std::fs::File;
use std::path::Path;

use serde::Serialize;
use sevenz_rust::{Password, SevenZReader};
use zip::ZipArchive;

use crate::error::AuditError;

/// One entry inside a physical archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveFile {
    /// Entry path exactly as stored in the archive.
    pub name: String,
    /// Uncompressed size.
    pub size: u64,
    /// Stored CRC-32 of the uncompressed payload.
    pub crc32: u32,
}

/// Enumerate the entries of the archive at `path`.
///
/// Directory entries are passed through as-is; the matcher tolerates them.
/// Extensions other than `zip`/`7z` yield [`AuditError::UnsupportedFormat`].
pub fn read_entries(path: &Path) -> Result<Vec<ArchiveFile>, AuditError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "zip" => read_zip(path),
        "7z" => read_7z(path),
        _ => Err(AuditError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn read_zip(path: &Path) -> Result<Vec<ArchiveFile>, AuditError> {
    let file = File::open(path).map_err(|e| AuditError::archive(path, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| AuditError::archive(path, e))?;

    let mut entries = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        // raw access reads central-directory metadata without inflating data
        let entry = zip
            .by_index_raw(i)
            .map_err(|e| AuditError::archive(path, e))?;
        entries.push(ArchiveFile {
            name: entry.name().to_string(),
            size: entry.size(),
            crc32: entry.crc32(),
        });
    }
    Ok(entries)
}

fn read_7z(path: &Path) -> Result<Vec<ArchiveFile>, AuditError> {
    let reader =
        SevenZReader::open(path, Password::empty()).map_err(|e| AuditError::archive(path, e))?;

    let entries = reader
        .archive()
        .files
        .iter()
        .map(|entry| ArchiveFile {
            name: entry.name().to_string(),
            size: entry.size(),
            crc32: entry.crc as u32,
        })
        .collect();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        for (name, data) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn zip_entries_expose_size_and_crc() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.zip");
        write_zip(&path, &[("a.bin", "abc"), ("sub/b.bin", "defg")]);

        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.bin");
        assert_eq!(entries[0].size, 3);
        assert_eq!(entries[0].crc32, crc32fast::hash(b"abc"));
        assert_eq!(entries[1].name, "sub/b.bin");
        assert_eq!(entries[1].size, 4);
        assert_eq!(entries[1].crc32, crc32fast::hash(b"defg"));
    }

    #[test]
    fn sevenz_entries_expose_size_and_crc() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("a.bin"), b"abc").unwrap();

        let path = dir.path().join("game.7z");
        sevenz_rust::compress_to_path(&src, &path).unwrap();

        let entries = read_entries(&path).unwrap();
        let file = entries
            .iter()
            .find(|e| e.name.ends_with("a.bin"))
            .expect("a.bin entry");
        assert_eq!(file.size, 3);
        assert_eq!(file.crc32, crc32fast::hash(b"abc"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.rar");
        std::fs::write(&path, b"not an archive").unwrap();

        let err = read_entries(&path).unwrap_err();
        assert!(matches!(err, AuditError::UnsupportedFormat { .. }));
    }

    #[test]
    fn open_failure_names_the_archive() {
        let err = read_entries(Path::new("/nope/missing.zip")).unwrap_err();
        assert!(err.to_string().contains("missing.zip"));
    }

    #[test]
    fn truncated_zip_is_an_archive_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.zip");
        std::fs::write(&path, b"PK\x03\x04definitely truncated").unwrap();

        let err = read_entries(&path).unwrap_err();
        assert!(matches!(err, AuditError::Archive { .. }));
    }
}
