//! Audit orchestration: the [`TestSdk`] entry point.
//!
//! An SDK instance owns one immutable [`DefinitionCatalog`]; every
//! [`TestSdk::test_dir`] call walks the ROM directory sequentially and
//! produces a fresh report. Archives are processed one at a time and their
//! handles never outlive the iteration that opened them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rom_audit_dat::{self as dat, DatError, DefinitionCatalog, SubRomFile};

use crate::archive;
use crate::cancel::CancelToken;
use crate::error::AuditError;
use crate::matcher::{self, SubRomTestResult, TestState};
use crate::report::{ParentInfo, RomFileTestResult, RomTestReport};
use crate::scanner;

pub struct TestSdk {
    catalog: DefinitionCatalog,
}

impl TestSdk {
    /// Build an SDK from a FinalBurn Neo DAT.
    pub fn from_fbneo(dat_path: impl AsRef<Path>) -> Result<Self, DatError> {
        Ok(Self {
            catalog: dat::from_fbneo(dat_path)?,
        })
    }

    /// Build an SDK from a MAME DAT.
    pub fn from_mame(dat_path: impl AsRef<Path>) -> Result<Self, DatError> {
        Ok(Self {
            catalog: dat::from_mame(dat_path)?,
        })
    }

    pub fn catalog(&self) -> &DefinitionCatalog {
        &self.catalog
    }

    /// Audit every archive under `rom_dir` against the catalog.
    ///
    /// `bios_dir` optionally supplies parent/BIOS archives; its walk errors
    /// are tolerated (a missing BIOS directory just leaves parent chains
    /// unresolved). `extensions` filters the walk; empty accepts everything.
    pub fn test_dir(
        &self,
        rom_dir: &Path,
        bios_dir: Option<&Path>,
        extensions: &[String],
        cancel: &CancelToken,
    ) -> Result<RomTestReport, AuditError> {
        self.test_dir_with_progress(rom_dir, bios_dir, extensions, cancel, |_| {})
    }

    /// Like [`TestSdk::test_dir`], invoking `progress` with each archive path
    /// before it is audited.
    pub fn test_dir_with_progress(
        &self,
        rom_dir: &Path,
        bios_dir: Option<&Path>,
        extensions: &[String],
        cancel: &CancelToken,
        mut progress: impl FnMut(&Path),
    ) -> Result<RomTestReport, AuditError> {
        let exts = scanner::normalize_extensions(extensions);

        let rom_paths =
            scanner::collect_archives(rom_dir, &exts).map_err(|e| AuditError::RomDir {
                path: rom_dir.to_path_buf(),
                source: e,
            })?;
        if rom_paths.is_empty() {
            return Err(AuditError::NoArchives {
                path: rom_dir.to_path_buf(),
            });
        }

        let mut index = scanner::index_by_game(&rom_paths);
        if let Some(bios) = bios_dir {
            // a ROM-dir entry always beats a same-named BIOS entry
            if let Ok(bios_paths) = scanner::collect_archives(bios, &exts) {
                scanner::merge_index(&mut index, scanner::index_by_game(&bios_paths));
            }
        }

        log::debug!(
            "auditing {} archives against {} definitions",
            rom_paths.len(),
            self.catalog.len()
        );

        let mut report = RomTestReport::default();
        for path in &rom_paths {
            if cancel.is_cancelled() {
                return Err(AuditError::Cancelled);
            }
            progress(path);
            report.results.push(self.test_one(path, &index, bios_dir)?);
        }
        Ok(report)
    }

    /// Audit a single archive: aggregate its entries with every existing
    /// parent's, then classify each declared sub-rom.
    fn test_one(
        &self,
        path: &Path,
        index: &HashMap<String, PathBuf>,
        bios_dir: Option<&Path>,
    ) -> Result<RomFileTestResult, AuditError> {
        let rom_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let Some(def) = self.catalog.get(&rom_name) else {
            return Ok(not_in_catalog(path, rom_name));
        };

        let mut aggregate = archive::read_entries(path)?;
        let mut parents = Vec::new();
        for parent_name in self.catalog.parent_chain(def) {
            match index.get(&parent_name.to_lowercase()) {
                Some(parent_path) => {
                    aggregate.extend(archive::read_entries(parent_path)?);
                    parents.push(ParentInfo {
                        name: parent_path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or_default()
                            .to_string(),
                        exist: true,
                        is_bios: bios_dir.is_some_and(|b| parent_path.starts_with(b)),
                    });
                }
                None => parents.push(ParentInfo {
                    name: format!("{parent_name}.zip"),
                    exist: false,
                    is_bios: false,
                }),
            }
        }

        log::debug!(
            "{}: {} aggregated entries, {} parents",
            rom_name,
            aggregate.len(),
            parents.len()
        );

        let results = matcher::classify_definition(def, &aggregate);
        Ok(RomFileTestResult {
            file_path: path.to_path_buf(),
            rom_name,
            parents,
            results,
        })
    }
}

/// Synthesized all-Red result for an archive the DAT knows nothing about.
fn not_in_catalog(path: &Path, rom_name: String) -> RomFileTestResult {
    let message = format!("game {rom_name} not found in dat");
    let sub_rom = SubRomFile {
        name: rom_name.clone(),
        ..Default::default()
    };
    RomFileTestResult {
        file_path: path.to_path_buf(),
        rom_name,
        parents: Vec::new(),
        results: vec![SubRomTestResult {
            sub_rom,
            state: TestState::Red,
            message,
        }],
    }
}

#[cfg(test)]
#[path = "tests/sdk_tests.rs"]
mod tests;
