//! Per-archive and per-run audit results.

use std::path::PathBuf;

use serde::Serialize;

use crate::matcher::{SubRomTestResult, TestState};

/// One resolved link of an archive's parent chain, nearest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentInfo {
    /// Base filename of the parent archive on disk, or a synthesized
    /// `<parent>.zip` placeholder when the archive is missing.
    pub name: String,
    pub exist: bool,
    /// True iff the resolved archive lives under the BIOS directory.
    pub is_bios: bool,
}

/// Audit outcome for one archive.
///
/// Sub-rom results keep DAT declaration order in a single list; the
/// state-filtered accessors bucket on read, so every declared sub-rom lands
/// in exactly one of Green/Yellow/Red.
#[derive(Debug, Clone, Serialize)]
pub struct RomFileTestResult {
    pub file_path: PathBuf,
    /// Archive basename without its extension.
    pub rom_name: String,
    /// Parent chain, nearest parent first, root last.
    pub parents: Vec<ParentInfo>,
    pub results: Vec<SubRomTestResult>,
}

impl RomFileTestResult {
    pub fn green(&self) -> impl Iterator<Item = &SubRomTestResult> {
        self.by_state(TestState::Green)
    }

    pub fn yellow(&self) -> impl Iterator<Item = &SubRomTestResult> {
        self.by_state(TestState::Yellow)
    }

    pub fn red(&self) -> impl Iterator<Item = &SubRomTestResult> {
        self.by_state(TestState::Red)
    }

    fn by_state(&self, state: TestState) -> impl Iterator<Item = &SubRomTestResult> {
        self.results.iter().filter(move |r| r.state == state)
    }

    /// The archive's overall verdict: the worst of its sub-rom states.
    pub fn state(&self) -> TestState {
        self.results
            .iter()
            .map(|r| r.state)
            .max()
            .unwrap_or(TestState::Green)
    }
}

/// Ordered audit outcomes, one per archive visited.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RomTestReport {
    pub results: Vec<RomFileTestResult>,
}

impl RomTestReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RomFileTestResult> {
        self.results.iter()
    }

    /// Number of archives whose overall verdict is `state`.
    pub fn count(&self, state: TestState) -> usize {
        self.results.iter().filter(|r| r.state() == state).count()
    }
}

#[cfg(test)]
mod tests {
    use rom_audit_dat::SubRomFile;

    use super::*;

    fn result(state: TestState) -> SubRomTestResult {
        SubRomTestResult {
            sub_rom: SubRomFile::default(),
            state,
            message: String::new(),
        }
    }

    fn archive_result(states: &[TestState]) -> RomFileTestResult {
        RomFileTestResult {
            file_path: PathBuf::from("/roms/g.zip"),
            rom_name: "g".into(),
            parents: Vec::new(),
            results: states.iter().map(|s| result(*s)).collect(),
        }
    }

    #[test]
    fn overall_state_is_the_worst_sub_state() {
        assert_eq!(
            archive_result(&[TestState::Green, TestState::Green]).state(),
            TestState::Green
        );
        assert_eq!(
            archive_result(&[TestState::Green, TestState::Yellow]).state(),
            TestState::Yellow
        );
        assert_eq!(
            archive_result(&[TestState::Yellow, TestState::Red]).state(),
            TestState::Red
        );
        // no declared sub-roms still reads as complete
        assert_eq!(archive_result(&[]).state(), TestState::Green);
    }

    #[test]
    fn buckets_partition_the_results() {
        let r = archive_result(&[TestState::Green, TestState::Yellow, TestState::Red]);
        assert_eq!(
            r.green().count() + r.yellow().count() + r.red().count(),
            r.results.len()
        );
    }

    #[test]
    fn report_counts_by_overall_state() {
        let report = RomTestReport {
            results: vec![
                archive_result(&[TestState::Green]),
                archive_result(&[TestState::Green, TestState::Red]),
            ],
        };
        assert_eq!(report.count(TestState::Green), 1);
        assert_eq!(report.count(TestState::Red), 1);
        assert_eq!(report.count(TestState::Yellow), 0);
    }
}
