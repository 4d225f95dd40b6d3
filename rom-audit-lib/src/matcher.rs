//! Three-tier sub-rom matching and Green/Yellow/Red classification.
//!
//! For every sub-file a definition declares, the matcher searches the
//! aggregated entry list (the archive's own entries followed by each existing
//! parent's, in chain order) by full path, then basename, then declared CRC,
//! stopping at the first tier that classifies. A matched archive entry is not
//! consumed: one entry may satisfy several definition entries, which is legal
//! for merge aliases and duplicated DAT rows.

use std::collections::HashMap;

use serde::Serialize;

use rom_audit_dat::{RomDefinition, SubRomFile};

use crate::archive::ArchiveFile;

/// Audit verdict for one sub-rom (or one whole archive, taken as the worst of
/// its sub-roms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TestState {
    /// Present with agreeing size and CRC.
    Green,
    /// Repairable: mismatched candidate, misnamed file, or missing optional.
    Yellow,
    /// Required and missing.
    Red,
}

/// Classification of one declared sub-rom.
#[derive(Debug, Clone, Serialize)]
pub struct SubRomTestResult {
    pub sub_rom: SubRomFile,
    pub state: TestState,
    /// Diagnostic for non-Green states; empty when Green.
    pub message: String,
}

impl SubRomTestResult {
    fn green(sub: &SubRomFile) -> Self {
        Self {
            sub_rom: sub.clone(),
            state: TestState::Green,
            message: String::new(),
        }
    }

    fn yellow(sub: &SubRomFile, message: String) -> Self {
        Self {
            sub_rom: sub.clone(),
            state: TestState::Yellow,
            message,
        }
    }

    fn red(sub: &SubRomFile, message: String) -> Self {
        Self {
            sub_rom: sub.clone(),
            state: TestState::Red,
            message,
        }
    }
}

/// Case-insensitive lookup indices over the aggregated entry list.
struct FileIndex<'a> {
    /// Full entry path → first entry with that path.
    full: HashMap<String, &'a ArchiveFile>,
    /// Basename → every matching entry, aggregate order preserved.
    base: HashMap<String, Vec<&'a ArchiveFile>>,
    /// Zero-padded lowercase 8-hex CRC-32 → every matching entry.
    crc: HashMap<String, Vec<&'a ArchiveFile>>,
}

impl<'a> FileIndex<'a> {
    fn build(files: &'a [ArchiveFile]) -> Self {
        let mut full: HashMap<String, &ArchiveFile> = HashMap::new();
        let mut base: HashMap<String, Vec<&ArchiveFile>> = HashMap::new();
        let mut crc: HashMap<String, Vec<&ArchiveFile>> = HashMap::new();

        for file in files {
            let lower = file.name.to_lowercase();
            let basename = lower
                .rsplit(['/', '\\'])
                .next()
                .unwrap_or(lower.as_str())
                .to_string();
            full.entry(lower).or_insert(file);
            base.entry(basename).or_default().push(file);
            crc.entry(format!("{:08x}", file.crc32)).or_default().push(file);
        }

        Self { full, base, crc }
    }
}

/// Classify every sub-rom of `def` against the aggregated `files`.
///
/// Results come back in DAT declaration order, one per declared sub-rom.
pub fn classify_definition(def: &RomDefinition, files: &[ArchiveFile]) -> Vec<SubRomTestResult> {
    let index = FileIndex::build(files);
    def.roms
        .iter()
        .map(|sub| classify_sub_rom(sub, &index))
        .collect()
}

fn classify_sub_rom(sub: &SubRomFile, index: &FileIndex<'_>) -> SubRomTestResult {
    let wanted = sub.normalized_name().to_lowercase();

    // Tier 1: full entry path.
    if let Some(file) = index.full.get(&wanted) {
        if let Some(result) = reconcile(sub, file) {
            return result;
        }
    }

    // Tier 2: basename; first candidate with any agreement wins.
    if let Some(candidates) = index.base.get(&wanted) {
        for file in candidates {
            if let Some(result) = reconcile(sub, file) {
                return result;
            }
        }
    }

    // Tier 3: declared CRC, size permitting. First qualifying candidate wins.
    if !sub.crc.is_empty() {
        if let Some(candidates) = index.crc.get(&sub.crc) {
            for file in candidates {
                if sub.size != 0 && file.size != sub.size {
                    continue;
                }
                return SubRomTestResult::yellow(
                    sub,
                    format!(
                        "name mismatch expected {} found {}",
                        sub.normalized_name(),
                        file.name
                    ),
                );
            }
        }
    }

    if sub.optional {
        return SubRomTestResult::yellow(sub, "optional missing".to_string());
    }
    SubRomTestResult::red(sub, format!("missing rom: {}", sub.normalized_name()))
}

/// Compare one candidate against the declaration.
///
/// Both size and CRC agree (an unspecified field always agrees): Green.
/// Exactly one agrees: Yellow with the mismatch spelled out. Neither agrees:
/// not a match at all, and the caller keeps scanning.
fn reconcile(sub: &SubRomFile, file: &ArchiveFile) -> Option<SubRomTestResult> {
    let size_match = sub.size == 0 || file.size == sub.size;
    let file_crc = format!("{:08x}", file.crc32);
    let crc_match = sub.crc.is_empty() || file_crc == sub.crc;

    match (size_match, crc_match) {
        (true, true) => Some(SubRomTestResult::green(sub)),
        (false, true) => Some(SubRomTestResult::yellow(
            sub,
            format!("size mismatch need {} got {}", sub.size, file.size),
        )),
        (true, false) => Some(SubRomTestResult::yellow(
            sub,
            format!("crc mismatch need {} got {}", sub.crc, file_crc),
        )),
        (false, false) => None,
    }
}
